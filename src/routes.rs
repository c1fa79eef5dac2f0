// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, quiz, topics, users},
    state::AppState,
    utils::jwt::auth_middleware,
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Public routes: auth, topic listings, stats, leaderboard.
/// * Bearer-protected routes: practice questions, quiz submission, profile.
/// * Global middleware: Trace, CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let public_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/topic", get(topics::list_topics))
        .route("/important", get(topics::important_topics))
        .route("/health", get(topics::health))
        .route("/api/stats", get(topics::get_stats))
        .route("/api/leaderboard", get(users::get_leaderboard));

    let protected_routes = Router::new()
        .route("/questions/{topic}", get(topics::topic_questions))
        .route("/api/quiz/submit", post(quiz::submit_quiz))
        .route("/api/report-error", post(quiz::report_error))
        .route("/api/weak-areas", get(quiz::weak_areas))
        .route("/api/user/profile", get(users::get_profile))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::Request, http::StatusCode};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            // Never touched by the routes below.
            pool: SqlitePool::connect_lazy("sqlite::memory:").unwrap(),
            config: Config {
                database_url: "sqlite::memory:".to_string(),
                jwt_secret: "routes_test_secret".to_string(),
                jwt_expiration: 60,
                rust_log: "error".to_string(),
                port: 0,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get("/api/weak-areas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }
}
