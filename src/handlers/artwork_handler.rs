//! Artwork handlers: listing, upload, admin delete, like toggle.

use axum::{
    extract::{Extension, Path, State},
    http::HeaderMap,
    middleware,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::clients::CleanupOutcome;
use crate::config::Config;
use crate::domain::{Artwork, NewArtwork};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::extractors::ValidatedJson;
use crate::middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;

/// Delete confirmation body.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Like toggle result.
#[derive(Debug, Serialize, ToSchema)]
pub struct LikeStatus {
    pub liked: bool,
}

/// Create artwork routes.
pub fn artwork_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_artworks).post(create_artwork))
        .route("/:id", delete(delete_artwork))
        .route(
            "/:id/like",
            post(toggle_like).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// List all artworks, newest first
#[utoipa::path(
    get,
    path = "/api/artworks",
    tag = "Artworks",
    responses(
        (status = 200, description = "All artwork rows, newest first; empty when the backend is unconfigured", body = Vec<Artwork>)
    )
)]
pub async fn list_artworks(State(state): State<AppState>) -> AppResult<Json<Vec<Artwork>>> {
    match state.backend.services() {
        Ok(services) => Ok(Json(services.db.list_artworks().await?)),
        // An unconfigured gallery is empty, not broken
        Err(_) => {
            debug!("listing artworks without a configured backend");
            Ok(Json(Vec::new()))
        }
    }
}

/// Create an artwork listing
#[utoipa::path(
    post,
    path = "/api/artworks",
    tag = "Artworks",
    request_body = NewArtwork,
    responses(
        (status = 200, description = "Inserted artwork row", body = Artwork),
        (status = 400, description = "Missing or invalid title/price")
    )
)]
pub async fn create_artwork(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewArtwork>,
) -> AppResult<Json<Artwork>> {
    let services = state.backend.services()?;
    let artwork = services.db.insert_artwork(new).await?;
    Ok(Json(artwork))
}

/// Delete an artwork (admin key required)
#[utoipa::path(
    delete,
    path = "/api/artworks/{id}",
    tag = "Artworks",
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Row deleted; stored image removed best-effort", body = DeleteResponse),
        (status = 403, description = "Missing or wrong x-admin-key header"),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn delete_artwork(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AppResult<Json<DeleteResponse>> {
    require_admin_key(&state.config, &headers)?;

    let services = state.backend.services()?;
    let artwork = services.db.find_artwork(id).await?.ok_or_not_found()?;

    // Storage first, row second. The row goes away regardless of how the
    // storage call went; the outcome is logged so orphans stay visible.
    let cleanup = match artwork.image_url.as_deref() {
        Some(url) => services.storage.remove_public_object(url).await,
        None => CleanupOutcome::skipped("artwork has no stored image"),
    };
    match &cleanup {
        CleanupOutcome::Removed => debug!(artwork = %id, "removed stored image"),
        CleanupOutcome::Skipped { reason } => {
            debug!(artwork = %id, %reason, "skipped storage cleanup")
        }
        CleanupOutcome::Failed { error } => {
            warn!(artwork = %id, %error, "storage cleanup failed, deleting row anyway")
        }
    }

    services.db.delete_artwork(id).await?;
    Ok(Json(DeleteResponse { ok: true }))
}

/// Toggle the caller's like on an artwork
#[utoipa::path(
    post,
    path = "/api/artworks/{id}/like",
    tag = "Artworks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "New like state for the caller", body = LikeStatus),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(artwork_id): Path<Uuid>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<LikeStatus>> {
    let services = state.backend.services()?;

    let liked = match services.db.find_like(current_user.id, artwork_id).await? {
        Some(_) => {
            services.db.delete_like(current_user.id, artwork_id).await?;
            services.db.decrement_likes(artwork_id).await?;
            false
        }
        None => {
            services.db.insert_like(current_user.id, artwork_id).await?;
            services.db.increment_likes(artwork_id).await?;
            true
        }
    };

    Ok(Json(LikeStatus { liked }))
}

/// Check the shared admin secret. An unset server-side key rejects every
/// delete rather than accepting every header.
fn require_admin_key(config: &Config, headers: &HeaderMap) -> AppResult<()> {
    let presented = headers.get("x-admin-key").and_then(|v| v.to_str().ok());
    match (config.admin_api_key.as_deref(), presented) {
        (Some(expected), Some(given)) if expected == given => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}
