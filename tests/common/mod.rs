#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use chrono::Duration;
use hospital::app::{build_router, AppState};
use hospital::auth::TokenIssuer;
use hospital::db::models::NewMember;
use hospital::store::memory::MemoryStore;
use hospital::store::HospitalStore;

pub const SECRET: &str = "integration-secret";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "s3cret";

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {token}").parse().expect("header"),
    );
    request
}

/// Router without authentication over a fresh in-memory store.
pub fn open_app() -> (axum::Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    (build_router(state), store)
}

/// Router requiring bearer tokens, with one member able to log in.
pub async fn protected_app() -> (axum::Router, Arc<MemoryStore>, TokenIssuer) {
    let store = Arc::new(MemoryStore::new());
    store
        .create_member(NewMember {
            name: "Ada".to_string(),
            email: EMAIL.to_string(),
            password_hash: bcrypt::hash(PASSWORD, 4).expect("hash"),
        })
        .await
        .expect("member");
    let tokens = TokenIssuer::new(SECRET, Duration::minutes(60));
    let mut state = AppState::new(store.clone());
    state.tokens = Some(tokens.clone());
    (build_router(state), store, tokens)
}
