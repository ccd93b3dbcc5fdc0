//! Meta endpoints: browser-safe config and a connectivity probe.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Browser-tier backend configuration. The service-role key never appears
/// here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/// Probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestResponse {
    pub message: String,
}

/// Create meta routes.
pub fn meta_routes() -> Router<AppState> {
    Router::new()
        .route("/public-config", get(public_config))
        .route("/test", get(test_endpoint))
}

/// Browser-safe backend configuration
#[utoipa::path(
    get,
    path = "/api/public-config",
    tag = "Meta",
    responses(
        (status = 200, description = "Public backend URL and anon key, possibly empty", body = PublicConfig)
    )
)]
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(PublicConfig {
        supabase_url: state.config.supabase_url.clone(),
        supabase_anon_key: state.config.anon_key.clone(),
    })
}

/// Connectivity probe, answers whether or not the backend is configured
#[utoipa::path(
    get,
    path = "/api/test",
    tag = "Meta",
    responses((status = 200, description = "Server is up", body = TestResponse))
)]
pub async fn test_endpoint() -> Json<TestResponse> {
    Json(TestResponse {
        message: "Backend working".to_string(),
    })
}
