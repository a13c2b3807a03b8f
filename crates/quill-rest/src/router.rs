//! Main application router.

use crate::{
    controllers::{
        auth_controller, category_controller, health_controller, notification_controller,
        post_controller, user_controller,
    },
    middleware::{auth_middleware, require_auth, AuthMiddlewareState},
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use quill_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
///
/// Routes under `/api/v1` run behind the auth middleware; everything except
/// `/auth`, `/feed`, and category listing additionally requires an
/// authenticated caller.
pub fn create_router(state: AppState, auth_state: AuthMiddlewareState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let protected = Router::new()
        .nest("/users", user_controller::router())
        .nest("/posts", post_controller::router())
        .nest("/notifications", notification_controller::router())
        .layer(middleware::from_fn(require_auth));

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/categories", category_controller::router())
        .route("/feed", get(post_controller::feed))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Router created with REST and SSE endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
///
/// A literal `*` origin means permissive; otherwise only the configured
/// origins are allowed.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins(
            &server_config.cors_origins,
        )))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Parses the configured origins, dropping any that are not valid header
/// values.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect()
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Quill API v1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_origins_are_parsed() {
        let origins = vec![
            "https://quill.example".to_string(),
            "http://localhost:3000".to_string(),
        ];
        let parsed = allowed_origins(&origins);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], "https://quill.example");
    }

    #[test]
    fn malformed_origins_are_dropped() {
        let origins = vec![
            "https://quill.example".to_string(),
            "https://bad\norigin".to_string(),
        ];
        let parsed = allowed_origins(&origins);
        assert_eq!(
            parsed,
            vec![HeaderValue::from_static("https://quill.example")]
        );
    }
}
