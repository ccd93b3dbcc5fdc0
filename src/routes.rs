//! Route configuration.

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{artwork_routes, meta_routes, profile_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // The front end may be opened from anywhere during development
    let api = Router::new()
        .merge(meta_routes())
        .nest("/artworks", artwork_routes(state.clone()))
        .nest("/profile", profile_routes(state.clone()))
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api", api)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Static front end; `/` resolves to index.html
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .with_state(state)
}
