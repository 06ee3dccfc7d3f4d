use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_account::get_account;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::verify_email::verify_email;
use super::middleware::authenticate as auth_middleware;
use super::pages::VerificationPages;
use crate::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub token_service: Arc<TokenService>,
    pub pages: Arc<VerificationPages>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    token_service: Arc<TokenService>,
    pages: VerificationPages,
) -> Router {
    let state = AppState {
        account_service,
        token_service,
        pages: Arc::new(pages),
    };

    let public_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify", get(verify_email));

    let protected_routes = Router::new()
        .route("/api/account", get(get_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Query strings are left out of spans: verification links carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
