//! Token verification against the managed auth service (GoTrue).
//!
//! Tokens are opaque to this server; a user lookup with the token as the
//! bearer either resolves to an identity or it doesn't.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::ValidCredentials;
use crate::errors::{AppError, AppResult};

use super::TokenVerifier;

/// The authenticated identity behind a bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    email: Option<String>,
}

/// Auth client for the backend's `/auth/v1/user` endpoint.
pub struct SupabaseAuth {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseAuth {
    pub fn new(credentials: &ValidCredentials) -> Self {
        Self {
            http: Client::new(),
            base_url: credentials.base_url.as_str().trim_end_matches('/').to_string(),
            service_key: credentials.service_key.clone(),
        }
    }
}

#[async_trait]
impl TokenVerifier for SupabaseAuth {
    async fn verify(&self, token: &str) -> AppResult<Option<AuthUser>> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: GoTrueUser = response
                    .json()
                    .await
                    .map_err(|e| AppError::upstream(format!("invalid auth response: {e}")))?;
                Ok(Some(AuthUser {
                    id: user.id,
                    email: user.email,
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("auth service rejected bearer token");
                Ok(None)
            }
            status => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(AppError::upstream(format!("{status}: {message}")))
            }
        }
    }
}
