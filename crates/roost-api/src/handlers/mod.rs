//! Route handlers, one module per resource.

pub mod booking;
pub mod health;
pub mod image;
pub mod review;
pub mod session;
pub mod spot;
pub mod user;

use validator::Validate;

use roost_core::error::AppError;

/// Runs a DTO's derived validations, mapping failures into a 400.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string().replace('\n', "; ")))
}
