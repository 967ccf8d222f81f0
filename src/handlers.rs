use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Prefix of every request forwarded to the backend.
pub const API_PREFIX: &str = "/api";

#[derive(Clone)]
pub struct ProxyState {
    pub target: Arc<str>,
    pub http: reqwest::Client,
}

impl ProxyState {
    pub fn new(target: &str) -> Self {
        Self {
            target: Arc::from(target.trim_end_matches('/')),
            http: reqwest::Client::new(),
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX || path.starts_with("/api/")
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "host"
            | "transfer-encoding"
            | "content-length"
            | "upgrade"
            | "te"
            | "trailer"
            | "proxy-authorization"
    )
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Relays `/api` requests to the backend and its answer back to the caller.
pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    if !is_api_path(uri.path()) {
        return Err(AppError::not_found(format!("{} is not proxied", uri.path())));
    }

    let path_and_query = uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or_else(|| uri.path());
    let url = format!("{}{path_and_query}", state.target);
    debug!(%method, %url, "forwarding");

    let upstream = state
        .http
        .request(method, &url)
        .headers(forwardable(&headers))
        .body(body)
        .send()
        .await
        .map_err(|err| {
            warn!("upstream request to {url} failed: {err}");
            AppError::bad_gateway(err)
        })?;

    let status = upstream.status();
    let response_headers = forwardable(upstream.headers());
    let payload = upstream.bytes().await.map_err(AppError::bad_gateway)?;

    Ok((status, response_headers, payload).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn only_api_paths_are_proxied() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/tracks/all"));
        assert!(!is_api_path("/apix"));
        assert!(!is_api_path("/track/t1"));
    }

    #[test]
    fn hop_by_hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:5173"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::TE, HeaderValue::from_static("trailers"));
        headers.insert(
            HeaderName::from_static("keep-alive"),
            HeaderValue::from_static("timeout=5"),
        );
        headers.insert(header::PROXY_AUTHORIZATION, HeaderValue::from_static("Basic eA=="));

        let forwarded = forwardable(&headers);
        assert_eq!(forwarded.len(), 2);
        assert!(forwarded.contains_key(header::AUTHORIZATION));
        assert!(forwarded.contains_key(header::CONTENT_TYPE));
    }
}
