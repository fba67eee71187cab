//! Stub of the Discord REST endpoints used by the sign-in flow.
#![allow(dead_code)]

use axum::extract::Form;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use lct_domain::config::JwtConfig;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;

pub const GUILD_ID: &str = "777";

pub fn jwt_config() -> JwtConfig {
    JwtConfig { secret: "integration-secret".to_owned(), ..JwtConfig::default() }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer tok-good")
}

async fn token(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    match form.get("code").map(String::as_str) {
        Some("good" | "outsider") if form.get("grant_type").map(String::as_str) == Some("authorization_code") => {
            let token = if form["code"] == "good" { "tok-good" } else { "tok-outsider" };
            Json(json!({ "access_token": token, "token_type": "Bearer" })).into_response()
        },
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" }))).into_response(),
    }
}

async fn me() -> impl IntoResponse {
    Json(json!({ "id": "42", "username": "mira", "global_name": "Mira", "avatar": null }))
}

async fn guilds(headers: HeaderMap) -> impl IntoResponse {
    if authorized(&headers) {
        Json(json!([{ "id": "1", "name": "Other" }, { "id": GUILD_ID, "name": "Lyrian Chronicles" }]))
    } else {
        Json(json!([{ "id": "1", "name": "Other" }]))
    }
}

async fn member() -> impl IntoResponse {
    Json(json!({ "roles": ["officer"], "nick": null }))
}

pub async fn discord_stub() -> SocketAddr {
    let app = Router::new()
        .route("/oauth2/token", post(token))
        .route("/users/@me", get(me))
        .route("/users/@me/guilds", get(guilds))
        .route("/users/@me/guilds/{id}/member", get(member));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}
