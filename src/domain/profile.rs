//! Artist profile types. A profile's id equals the backend auth user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::Artwork;

/// A profile row as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a user may change on their own profile. Absent fields are left
/// untouched by the upsert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    #[schema(example = "inkwell")]
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
}

/// Public profile page payload: the profile plus the artist's live listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileView {
    pub profile: Profile,
    pub artworks: Vec<Artwork>,
}
