use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use scpl_config::Environment;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging stage: assigns a request id, logs the request and its
/// outcome (info for success, warn for 4xx, error for 5xx) and echoes the id
/// back in `x-request-id`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let mut response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Default filter directives when `RUST_LOG` is unset. `LOG_LEVEL` overrides
/// the level for this application's crates.
fn default_directives(environment: Environment, log_level: Option<String>) -> String {
    let level = log_level
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| {
            if environment.is_production() {
                "info".to_string()
            } else {
                "debug".to_string()
            }
        });

    format!(
        "{level},{}={level},scpl_db={level},scpl_cli={level},tower_http=warn,sqlx=warn,hyper=info,axum::rejection=trace",
        env!("CARGO_CRATE_NAME")
    )
}

/// Installs the global subscriber writing to stdout through a non-blocking
/// writer. Production emits JSON lines; other environments emit compact
/// human-readable lines. Keep the returned guard alive for the process
/// lifetime or buffered lines are lost.
pub fn init_tracing(environment: Environment) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_directives(
            environment,
            std::env::var("LOG_LEVEL").ok(),
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if environment.is_production() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(writer),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .compact()
                    .with_writer(writer),
            )
            .init();
    }

    info!(%environment, "Tracing initialized");

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_follows_environment() {
        assert!(default_directives(Environment::Production, None).starts_with("info,"));
        assert!(default_directives(Environment::Development, None).starts_with("debug,"));
    }

    #[test]
    fn test_log_level_overrides_default() {
        let directives = default_directives(Environment::Production, Some("warn".into()));
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("tower_http=warn"));
    }
}
