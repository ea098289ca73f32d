//! API-key authentication middleware. Checks `X-API-Key`, then `Authorization:
//! Bearer <key>`, then the `api_key` query parameter, in that precedence
//! order — the first one present is the one validated, even if a later one
//! would also have been wrong. `OPTIONS` requests always bypass auth so CORS
//! preflight succeeds regardless of configuration.
//!

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::AppState;

fn extract_presented_key(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get("x-api-key") {
        return value.to_str().ok().map(str::to_string);
    }
    if let Some(value) = req.headers().get(axum::http::header::AUTHORIZATION) {
        if let Ok(s) = value.to_str() {
            if let Some(token) = s.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }
    let query = req.uri().query().unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("api_key=") {
            return Some(value.to_string());
        }
    }
    None
}

pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_ref() else {
        return Ok(next.run(req).await);
    };
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    match extract_presented_key(&req) {
        None => Err(ApiError::Unauthorized),
        Some(presented) if &presented == expected => Ok(next.run(req).await),
        Some(_) => Err(ApiError::Forbidden),
    }
}
