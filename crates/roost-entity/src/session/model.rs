//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A login session backing issued JWT pairs.
///
/// Access tokens are only honored while their session row is live, which
/// makes logout effective immediately even for unexpired tokens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier (embedded in JWT claims).
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// When the session expires (extended on token refresh).
    pub expires_at: DateTime<Utc>,
    /// Whether the session has been revoked by logout.
    pub revoked: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still usable.
    pub fn is_live(&self) -> bool {
        !self.revoked && Utc::now() < self.expires_at
    }
}
