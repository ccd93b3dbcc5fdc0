//! Artwork listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Listing visibility, enforced by the database default and policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    #[default]
    Active,
    Inactive,
}

impl ArtworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkStatus::Active => "active",
            ArtworkStatus::Inactive => "inactive",
        }
    }
}

/// An artwork row as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Artwork {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Listing price; passed through as-is, never computed on
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub artist_id: Option<Uuid>,
    #[serde(default)]
    pub status: ArtworkStatus,
    #[serde(default)]
    pub likes: i64,
}

/// Payload for creating a listing. Title and price are the only fields the
/// server checks itself; everything else is backend-enforced.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewArtwork {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Sunset over the harbor")]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be zero or positive"))]
    #[schema(example = 120.0)]
    pub price: f64,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ArtworkStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&ArtworkStatus::Inactive).unwrap(), "\"inactive\"");
    }

    #[test]
    fn new_artwork_requires_title_and_valid_price() {
        let missing_title = NewArtwork {
            title: String::new(),
            description: None,
            price: 10.0,
            image_url: None,
        };
        assert!(validator::Validate::validate(&missing_title).is_err());

        let negative_price = NewArtwork {
            title: "Untitled".to_string(),
            description: None,
            price: -1.0,
            image_url: None,
        };
        assert!(validator::Validate::validate(&negative_price).is_err());
    }

    #[test]
    fn artwork_deserializes_with_missing_optionals() {
        let row = serde_json::json!({
            "id": "5f0f1a5e-3f83-4b94-9b6a-8f2e40c9ab11",
            "title": "Quiet study",
            "price": 45.5,
            "created_at": "2024-04-01T12:00:00+00:00"
        });
        let artwork: Artwork = serde_json::from_value(row).unwrap();
        assert_eq!(artwork.status, ArtworkStatus::Active);
        assert_eq!(artwork.likes, 0);
        assert!(artwork.artist_id.is_none());
    }
}
