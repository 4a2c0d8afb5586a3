//! Password hashing and strength validation.

pub mod hasher;
pub mod strength;

pub use hasher::PasswordHasher;
pub use strength::validate_strength;
