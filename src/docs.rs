use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;
use scpl_core::pagination::ListQuery;
use scpl_core::roles::Role;
use scpl_models::{
    AccessTokenResponse, CreatePlaylistRequest, LoginRequest, MessageResponse, PlaylistDetail,
    PlaylistItem, PlaylistSummary, Screen, ScreenStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::revoke_all,
        crate::modules::screens::controller::list_screens,
        crate::modules::screens::controller::toggle_screen,
        crate::modules::playlists::controller::list_playlists,
        crate::modules::playlists::controller::create_playlist,
        crate::modules::playlists::controller::get_playlist,
        crate::modules::health::controller::health,
    ),
    components(
        schemas(
            LoginRequest,
            AccessTokenResponse,
            MessageResponse,
            ErrorResponse,
            Role,
            Screen,
            ScreenStatus,
            PlaylistItem,
            PlaylistSummary,
            PlaylistDetail,
            CreatePlaylistRequest,
            ListQuery,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and refresh-token session endpoints"),
        (name = "Screens", description = "Display devices"),
        (name = "Playlists", description = "Ordered media playlists"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "scpl API",
        version = "0.1.0",
        description = "Digital signage backend: screens, playlists and cookie-based refresh sessions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

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
            )
        }
    }
}
