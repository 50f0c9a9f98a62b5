use std::sync::Arc;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::health::router::init_health_router;
use crate::modules::playlists::router::init_playlists_router;
use crate::modules::screens::router::init_screens_router;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use scpl_config::CorsConfig;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if config.mirrors_request_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the application. Stages run outermost first: security headers,
/// CORS, request logging, metrics, rate limiting, body limit, routes.
pub fn init_router(state: AppState) -> Router {
    let mut api = Router::new()
        .nest("/auth", init_auth_router())
        .nest("/screens", init_screens_router())
        .nest("/playlists", init_playlists_router())
        .merge(init_health_router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES));

    if let Some(governor) = state.rate_limit_config.governor_config() {
        api = api.layer(GovernorLayer::new(Arc::new(governor)));
    } else {
        tracing::debug!("Rate limiting disabled");
    }

    let cors = cors_layer(&state.cors_config);

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(cors)
                .layer(middleware::from_fn(logging_middleware))
                .layer(middleware::from_fn(metrics_middleware)),
        )
}
