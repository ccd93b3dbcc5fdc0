//! Object storage cleanup for deleted listings.
//!
//! Images are referenced by the public URL the front end uploaded them
//! under. Cleanup is best effort: a URL that doesn't point into our
//! storage is skipped, a failed delete is reported, and in every case the
//! caller proceeds with the database row.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ValidCredentials;

use super::ObjectStore;

/// Marker segment of a public storage URL, e.g.
/// `https://<project>.supabase.co/storage/v1/object/public/<bucket>/<path>`.
const PUBLIC_OBJECT_PREFIX: &str = "/object/public/";

/// What happened to the stored object during a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The object was removed from storage.
    Removed,
    /// There was nothing for us to remove (no image, foreign URL, bad URL).
    Skipped { reason: String },
    /// The storage call itself failed; the object may be orphaned.
    Failed { error: String },
}

impl CleanupOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, CleanupOutcome::Removed)
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        CleanupOutcome::Skipped { reason: reason.into() }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        CleanupOutcome::Failed { error: error.into() }
    }
}

/// Bucket and object path extracted from a public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub path: String,
}

/// Extract the object reference from a public storage URL. Returns `None`
/// for anything that doesn't match the expected shape.
pub fn parse_public_object_url(raw: &str) -> Option<ObjectRef> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let (_, rest) = url.path().split_once(PUBLIC_OBJECT_PREFIX)?;
    let (bucket, path) = rest.split_once('/')?;
    if bucket.is_empty() || path.is_empty() {
        return None;
    }

    Some(ObjectRef {
        bucket: bucket.to_string(),
        path: path.to_string(),
    })
}

/// Storage client for the backend's object API.
pub struct SupabaseStorage {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(credentials: &ValidCredentials) -> Self {
        Self {
            http: Client::new(),
            base_url: credentials.base_url.as_str().trim_end_matches('/').to_string(),
            service_key: credentials.service_key.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn remove_public_object(&self, public_url: &str) -> CleanupOutcome {
        let Some(object) = parse_public_object_url(public_url) else {
            return CleanupOutcome::skipped("not a recognized public object URL");
        };

        let endpoint = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, object.bucket, object.path
        );
        let result = self
            .http
            .delete(&endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => CleanupOutcome::Removed,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                CleanupOutcome::failed(format!("{status}: {body}"))
            }
            Err(e) => CleanupOutcome::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_public_object_url() {
        let object = parse_public_object_url(
            "https://abcdefgh.supabase.co/storage/v1/object/public/artworks/user-1/sunset.png",
        )
        .unwrap();
        assert_eq!(object.bucket, "artworks");
        assert_eq!(object.path, "user-1/sunset.png");
    }

    #[test]
    fn ignores_query_and_keeps_nested_path() {
        let object = parse_public_object_url(
            "https://abcdefgh.supabase.co/storage/v1/object/public/artworks/a/b/c.jpg?download=1",
        )
        .unwrap();
        assert_eq!(object.path, "a/b/c.jpg");
    }

    #[test]
    fn rejects_foreign_urls() {
        assert!(parse_public_object_url("https://cdn.example.com/images/foo.png").is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_public_object_url("not a url at all").is_none());
        assert!(parse_public_object_url("ftp://host/object/public/bucket/file").is_none());
        assert!(parse_public_object_url("https://host/storage/v1/object/public/bucket").is_none());
        assert!(parse_public_object_url("https://host/storage/v1/object/public//file").is_none());
    }

    #[tokio::test]
    async fn unmatched_url_is_skipped_without_a_storage_call() {
        let creds = crate::config::validate_credentials("https://unit.supabase.co", "key").unwrap();
        let storage = SupabaseStorage::new(&creds);

        let outcome = storage
            .remove_public_object("https://cdn.example.com/images/foo.png")
            .await;
        assert!(matches!(outcome, CleanupOutcome::Skipped { .. }));
    }
}
