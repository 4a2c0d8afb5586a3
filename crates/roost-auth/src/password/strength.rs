//! Password strength policy for signup and password resets.

use zxcvbn::{Score, zxcvbn};

use roost_core::error::AppError;

/// Reject passwords below this zxcvbn score.
const MIN_SCORE: Score = Score::Two;

/// Validates a candidate password against the configured minimum length
/// and a zxcvbn strength estimate.
pub fn validate_strength(password: &str, min_length: usize) -> Result<(), AppError> {
    if password.len() < min_length {
        return Err(AppError::validation(format!(
            "Password must be at least {min_length} characters"
        )));
    }

    let estimate = zxcvbn(password, &[]);
    if estimate.score() < MIN_SCORE {
        return Err(AppError::validation(
            "Password is too weak; avoid common words and short patterns",
        ));
    }

    Ok(())
}
