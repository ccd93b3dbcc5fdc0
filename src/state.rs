//! Application state for dependency injection.
//!
//! The backend client bundle is constructed once at startup. Rejected
//! credentials produce an explicit `Unconfigured` state instead of a
//! nullable global; routes that need the backend then answer with a fixed
//! error and no retry.

use std::sync::Arc;

use tracing::error;

use crate::clients::{Database, ObjectStore, SupabaseAuth, SupabaseDb, SupabaseStorage, TokenVerifier};
use crate::config::{Config, CredentialError};
use crate::errors::{AppError, AppResult};

/// Backend clients, one per concern.
#[derive(Clone)]
pub struct BackendServices {
    pub db: Arc<dyn Database>,
    pub auth: Arc<dyn TokenVerifier>,
    pub storage: Arc<dyn ObjectStore>,
}

/// Whether the server has a usable backend.
pub enum Backend {
    Configured(BackendServices),
    Unconfigured(CredentialError),
}

impl Backend {
    /// Build backend clients from validated credentials, or record why the
    /// pair was rejected.
    pub fn from_config(config: &Config) -> Self {
        match config.credentials() {
            Ok(credentials) => Backend::Configured(BackendServices {
                db: Arc::new(SupabaseDb::new(&credentials)),
                auth: Arc::new(SupabaseAuth::new(&credentials)),
                storage: Arc::new(SupabaseStorage::new(&credentials)),
            }),
            Err(err) => {
                error!("backend credentials rejected: {err}; API routes will return a fixed error");
                Backend::Unconfigured(err)
            }
        }
    }

    /// The client bundle, or the fixed not-configured error.
    pub fn services(&self) -> AppResult<&BackendServices> {
        match self {
            Backend::Configured(services) => Ok(services),
            Backend::Unconfigured(_) => Err(AppError::NotConfigured),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Backend::Configured(_))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new app state.
    pub fn new(backend: Backend, config: Config) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(url: &str, key: &str) -> Config {
        Config {
            supabase_url: url.to_string(),
            service_role_key: key.to_string(),
            anon_key: "anon".to_string(),
            admin_api_key: None,
            port: 3000,
            public_dir: "public".to_string(),
        }
    }

    #[test]
    fn valid_credentials_configure_the_backend() {
        let backend = Backend::from_config(&config_with("https://unit.supabase.co", "service-key"));
        assert!(backend.is_configured());
        assert!(backend.services().is_ok());
    }

    #[test]
    fn rejected_credentials_leave_backend_unconfigured() {
        let backend = Backend::from_config(&config_with("", ""));
        assert!(!backend.is_configured());
        assert!(matches!(
            backend.services(),
            Err(AppError::NotConfigured)
        ));
        assert!(matches!(
            backend,
            Backend::Unconfigured(CredentialError::MissingUrl)
        ));
    }
}
