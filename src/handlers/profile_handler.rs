//! Artist profile handlers.

use axum::{
    extract::{Extension, Path, State},
    middleware,
    response::Json,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::domain::{Profile, ProfileUpdate, ProfileView};
use crate::errors::{AppResult, OptionExt};
use crate::extractors::ValidatedJson;
use crate::middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;

/// Create profile routes.
pub fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(view_profile))
        .route(
            "/",
            put(update_profile).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Public profile page: the profile plus the artist's active listings
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    tag = "Profiles",
    params(("user_id" = Uuid, Path, description = "Artist user ID")),
    responses(
        (status = 200, description = "Profile and active artworks", body = ProfileView),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn view_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ProfileView>> {
    let services = state.backend.services()?;

    let profile = services.db.find_profile(user_id).await?.ok_or_not_found()?;
    let artworks = services.db.active_artworks_by_artist(user_id).await?;

    Ok(Json(ProfileView { profile, artworks }))
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Upserted profile row", body = Profile),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(fields): ValidatedJson<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    let services = state.backend.services()?;
    let profile = services.db.upsert_profile(current_user.id, fields).await?;
    Ok(Json(profile))
}
