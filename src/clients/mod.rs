//! Clients for the managed backend, one per concern: database rows over
//! PostgREST, token verification against GoTrue, and object storage.
//!
//! Handlers depend on the seam traits below so tests can swap in mocks;
//! the concrete types talk plain HTTP via reqwest.

mod auth;
mod postgrest;
mod storage;

pub use auth::{AuthUser, SupabaseAuth};
pub use postgrest::SupabaseDb;
pub use storage::{parse_public_object_url, CleanupOutcome, ObjectRef, SupabaseStorage};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Artwork, Like, NewArtwork, Profile, ProfileUpdate};
use crate::errors::AppResult;

/// Row operations against the managed database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Database: Send + Sync {
    async fn list_artworks(&self) -> AppResult<Vec<Artwork>>;
    async fn insert_artwork(&self, new: NewArtwork) -> AppResult<Artwork>;
    async fn find_artwork(&self, id: Uuid) -> AppResult<Option<Artwork>>;
    async fn delete_artwork(&self, id: Uuid) -> AppResult<()>;

    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;
    async fn active_artworks_by_artist(&self, artist_id: Uuid) -> AppResult<Vec<Artwork>>;
    async fn upsert_profile(&self, user_id: Uuid, fields: ProfileUpdate) -> AppResult<Profile>;

    async fn find_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<Option<Like>>;
    async fn insert_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<()>;
    async fn delete_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<()>;

    /// Counter functions live in the database; the server only invokes them.
    async fn increment_likes(&self, artwork_id: Uuid) -> AppResult<()>;
    async fn decrement_likes(&self, artwork_id: Uuid) -> AppResult<()>;
}

/// Verification of end-user bearer tokens against the managed auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns `None` for an invalid or expired token.
    async fn verify(&self, token: &str) -> AppResult<Option<AuthUser>>;
}

/// Best-effort object removal in the managed storage service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Never a hard error; the outcome says whether the object was removed,
    /// the URL was not ours to clean up, or the call failed.
    async fn remove_public_object(&self, public_url: &str) -> CleanupOutcome;
}
