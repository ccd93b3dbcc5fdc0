//! PostgREST client for the managed database.
//!
//! Every call is a single round trip: filters go in the query string,
//! the service-role key goes in `apikey`/`Authorization`, and writes ask
//! for `return=representation` when the caller needs the row back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ValidCredentials;
use crate::domain::{Artwork, ArtworkStatus, Like, NewArtwork, Profile, ProfileUpdate};
use crate::errors::{AppError, AppResult};

use super::Database;

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Database client over the backend's REST interface.
pub struct SupabaseDb {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseDb {
    pub fn new(credentials: &ValidCredentials) -> Self {
        Self {
            http: Client::new(),
            base_url: credentials.base_url.as_str().trim_end_matches('/').to_string(),
            service_key: credentials.service_key.clone(),
        }
    }

    fn table(&self, name: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, name)
    }

    fn rpc(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// Service-role auth headers expected by PostgREST.
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Turn a non-2xx response into an upstream error carrying the
    /// backend's own message.
    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<PostgrestError>(&body)
                .map(|e| e.message)
                .unwrap_or(body),
            Err(_) => status.to_string(),
        };
        Err(AppError::upstream(format!("{status}: {message}")))
    }

    async fn rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<Vec<T>> {
        let response = self.authed(request).send().await?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::upstream(format!("invalid backend response: {e}")))
    }

    async fn execute(&self, request: RequestBuilder) -> AppResult<()> {
        let response = self.authed(request).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Writes with `return=representation` answer with an array of rows.
    async fn single_row<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        self.rows::<T>(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream("backend returned no row".to_string()))
    }
}

/// Profile row shape sent on upsert. Absent fields stay out of the payload
/// so the merge only touches what the caller set.
#[derive(Debug, Serialize)]
struct ProfileRow {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct LikeRow {
    user_id: Uuid,
    artwork_id: Uuid,
}

#[derive(Debug, Serialize)]
struct LikeRpcArgs {
    artwork_id: Uuid,
}

#[async_trait]
impl Database for SupabaseDb {
    async fn list_artworks(&self) -> AppResult<Vec<Artwork>> {
        let request = self
            .http
            .get(self.table("artworks"))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.rows(request).await
    }

    async fn insert_artwork(&self, new: NewArtwork) -> AppResult<Artwork> {
        let request = self
            .http
            .post(self.table("artworks"))
            .header("Prefer", "return=representation")
            .json(&new);
        self.single_row(request).await
    }

    async fn find_artwork(&self, id: Uuid) -> AppResult<Option<Artwork>> {
        let request = self
            .http
            .get(self.table("artworks"))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))]);
        Ok(self.rows(request).await?.into_iter().next())
    }

    async fn delete_artwork(&self, id: Uuid) -> AppResult<()> {
        let request = self
            .http
            .delete(self.table("artworks"))
            .query(&[("id", format!("eq.{id}"))]);
        self.execute(request).await
    }

    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let request = self
            .http
            .get(self.table("profiles"))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{user_id}"))]);
        Ok(self.rows(request).await?.into_iter().next())
    }

    async fn active_artworks_by_artist(&self, artist_id: Uuid) -> AppResult<Vec<Artwork>> {
        let request = self.http.get(self.table("artworks")).query(&[
            ("select", "*".to_string()),
            ("artist_id", format!("eq.{artist_id}")),
            ("status", format!("eq.{}", ArtworkStatus::Active.as_str())),
            ("order", "created_at.desc".to_string()),
        ]);
        self.rows(request).await
    }

    async fn upsert_profile(&self, user_id: Uuid, fields: ProfileUpdate) -> AppResult<Profile> {
        let row = ProfileRow {
            id: user_id,
            username: fields.username,
            full_name: fields.full_name,
            bio: fields.bio,
            website: fields.website,
            updated_at: Utc::now(),
        };
        let request = self
            .http
            .post(self.table("profiles"))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(&row);
        self.single_row(request).await
    }

    async fn find_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<Option<Like>> {
        let request = self.http.get(self.table("artwork_likes")).query(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("artwork_id", format!("eq.{artwork_id}")),
        ]);
        Ok(self.rows(request).await?.into_iter().next())
    }

    async fn insert_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<()> {
        let request = self
            .http
            .post(self.table("artwork_likes"))
            .json(&LikeRow { user_id, artwork_id });
        self.execute(request).await
    }

    async fn delete_like(&self, user_id: Uuid, artwork_id: Uuid) -> AppResult<()> {
        let request = self.http.delete(self.table("artwork_likes")).query(&[
            ("user_id", format!("eq.{user_id}")),
            ("artwork_id", format!("eq.{artwork_id}")),
        ]);
        self.execute(request).await
    }

    async fn increment_likes(&self, artwork_id: Uuid) -> AppResult<()> {
        let request = self
            .http
            .post(self.rpc("increment_likes"))
            .json(&LikeRpcArgs { artwork_id });
        self.execute(request).await
    }

    async fn decrement_likes(&self, artwork_id: Uuid) -> AppResult<()> {
        let request = self
            .http
            .post(self.rpc("decrement_likes"))
            .json(&LikeRpcArgs { artwork_id });
        self.execute(request).await
    }
}
