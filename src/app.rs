//! HTTP application wiring: shared state and route composition.
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::auth::{self, TokenIssuer};
use crate::handlers;
use crate::services::booking::BookingPolicy;
use crate::services::mirror::Mirror;
use crate::store::HospitalStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HospitalStore>,
    /// Present when routes are protected and `/login` is served.
    pub tokens: Option<TokenIssuer>,
    pub mirror: Option<Mirror>,
    pub booking_policy: BookingPolicy,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self {
            store,
            tokens: None,
            mirror: None,
            booking_policy: BookingPolicy::default(),
            cors_origins: Vec::new(),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}

pub fn build_router(state: AppState) -> Router {
    let mut protected: Router<AppState> = Router::new()
        .route(
            "/doctors",
            get(handlers::doctors::list_doctors).post(handlers::doctors::add_doctor),
        )
        .route(
            "/appointments",
            post(handlers::appointments::book_appointment),
        );

    let mut router: Router<AppState> = Router::new().route("/", get(handlers::index));

    if state.tokens.is_some() {
        protected = protected.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_bearer,
        ));
        router = router.route("/login", post(handlers::login::login));
    }

    router
        .merge(protected)
        .layer(cors_layer(&state.cors_origins))
        .with_state(state)
}
