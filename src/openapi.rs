//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::domain::{Artwork, ArtworkStatus, NewArtwork, Profile, ProfileUpdate, ProfileView};
use crate::handlers::artwork_handler::{DeleteResponse, LikeStatus};
use crate::handlers::meta_handler::{PublicConfig, TestResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::meta_handler::public_config,
        crate::handlers::meta_handler::test_endpoint,
        crate::handlers::artwork_handler::list_artworks,
        crate::handlers::artwork_handler::create_artwork,
        crate::handlers::artwork_handler::delete_artwork,
        crate::handlers::artwork_handler::toggle_like,
        crate::handlers::profile_handler::view_profile,
        crate::handlers::profile_handler::update_profile,
    ),
    components(
        schemas(
            Artwork,
            ArtworkStatus,
            NewArtwork,
            Profile,
            ProfileUpdate,
            ProfileView,
            DeleteResponse,
            LikeStatus,
            PublicConfig,
            TestResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Meta", description = "Server status and public configuration"),
        (name = "Artworks", description = "Artwork listings and likes"),
        (name = "Profiles", description = "Artist profiles"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
