//! Spot service.

pub mod service;

pub use service::{SpotDetail, SpotService};
