//! Application configuration loaded from environment variables.
//!
//! Backend credentials are validated once at startup. The server keeps
//! running with an unconfigured backend when they are rejected; API routes
//! then answer with a fixed error instead of retrying.

use std::env;

use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Values that ship in hosting templates and must never reach the backend.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-project",
    "your_project",
    "your-anon-key",
    "your-service-role-key",
    "placeholder",
    "changeme",
];

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Backend project URL (browser-safe, also served to the front end)
    pub supabase_url: String,
    /// Privileged backend key, server-side only
    pub service_role_key: String,
    /// Public backend key, served to the front end
    pub anon_key: String,
    /// Shared secret for the artwork delete route
    pub admin_api_key: Option<String>,
    /// HTTP listen port
    pub port: u16,
    /// Directory served as the static front end
    pub public_dir: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"[REDACTED]")
            .field("anon_key", &"[REDACTED]")
            .field("admin_api_key", &"[REDACTED]")
            .field("port", &self.port)
            .field("public_dir", &self.public_dir)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            admin_api_key: env::var("ADMIN_API_KEY").ok().filter(|k| !k.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_string()),
        }
    }

    /// Validate the backend credential pair.
    pub fn credentials(&self) -> Result<ValidCredentials, CredentialError> {
        validate_credentials(&self.supabase_url, &self.service_role_key)
    }
}

/// A credential pair that passed validation.
#[derive(Debug, Clone)]
pub struct ValidCredentials {
    pub base_url: Url,
    pub service_key: String,
}

/// Why a credential pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("SUPABASE_URL is not set")]
    MissingUrl,

    #[error("SUPABASE_SERVICE_ROLE_KEY is not set")]
    MissingServiceKey,

    #[error("SUPABASE_URL is not a valid http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("SUPABASE_URL still holds a template placeholder")]
    PlaceholderUrl,

    #[error("SUPABASE_SERVICE_ROLE_KEY still holds a template placeholder")]
    PlaceholderServiceKey,
}

/// Check a URL/key pair once, producing a typed verdict.
pub fn validate_credentials(url: &str, service_key: &str) -> Result<ValidCredentials, CredentialError> {
    if url.trim().is_empty() {
        return Err(CredentialError::MissingUrl);
    }
    if service_key.trim().is_empty() {
        return Err(CredentialError::MissingServiceKey);
    }
    if looks_like_placeholder(url) {
        return Err(CredentialError::PlaceholderUrl);
    }
    if looks_like_placeholder(service_key) {
        return Err(CredentialError::PlaceholderServiceKey);
    }

    let base_url = Url::parse(url).map_err(|e| CredentialError::InvalidUrl(e.to_string()))?;
    match base_url.scheme() {
        "http" | "https" => {}
        other => return Err(CredentialError::InvalidUrl(format!("unsupported scheme '{other}'"))),
    }

    Ok(ValidCredentials {
        base_url,
        service_key: service_key.to_string(),
    })
}

fn looks_like_placeholder(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|marker| value.contains(marker))
}
