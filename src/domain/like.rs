//! Like rows. (user_id, artwork_id) uniqueness is a database constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A like row as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub artwork_id: Uuid,
    pub created_at: DateTime<Utc>,
}
