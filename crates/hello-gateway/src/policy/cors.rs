//! CORS (Cross-Origin Resource Sharing) middleware.
//!
//! Answers preflight requests and adds `Access-Control-*` headers to actual
//! responses. Credentials are never allowed.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use hello_core::error::HelloError;

use crate::api::ApiError;
use crate::config::CorsSection;

const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";

/// Compiled CORS rules.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Empty = any origin.
    origins: Vec<String>,
    max_age_secs: u32,
}

impl CorsPolicy {
    pub fn from_config(cfg: &CorsSection) -> Self {
        let origins = if cfg.allow_origins.iter().any(|o| o == "*") {
            Vec::new()
        } else {
            cfg.allow_origins.clone()
        };
        Self {
            origins,
            max_age_secs: cfg.max_age_secs,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allows_any_origin() || self.origins.iter().any(|o| o == origin)
    }

    fn add_cors_headers(&self, headers: &mut HeaderMap, origin: &str) {
        if self.allows_any_origin() {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        } else if let Ok(v) = HeaderValue::from_str(origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, v);
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }
    }

    fn preflight(&self, req_headers: &HeaderMap, origin: &str) -> Response {
        let mut res = StatusCode::NO_CONTENT.into_response();
        let headers = res.headers_mut();
        self.add_cors_headers(headers, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        // Echo requested headers: no header restrictions apply.
        if let Some(requested) = req_headers.get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        }
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age_secs));
        res
    }
}

fn is_preflight(req: &Request) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

pub async fn cors(State(policy): State<Arc<CorsPolicy>>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // No origin header = same-origin request, skip CORS
    let Some(origin) = origin else {
        return next.run(req).await;
    };

    if !policy.is_origin_allowed(&origin) {
        tracing::debug!(%origin, "cors origin rejected");
        let err = HelloError::Forbidden(format!("CORS origin not allowed: {origin}"));
        return ApiError::from(err).into_response();
    }

    if is_preflight(&req) {
        return policy.preflight(req.headers(), &origin);
    }

    let mut res = next.run(req).await;
    policy.add_cors_headers(res.headers_mut(), &origin);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_admits_everything() {
        let p = CorsPolicy::from_config(&CorsSection::default());
        assert!(p.allows_any_origin());
        assert!(p.is_origin_allowed("http://example.com"));
    }

    #[test]
    fn explicit_list_is_exact_match() {
        let p = CorsPolicy::from_config(&CorsSection {
            allow_origins: vec!["https://app.example.com".into()],
            max_age_secs: 60,
        });
        assert!(p.is_origin_allowed("https://app.example.com"));
        assert!(!p.is_origin_allowed("http://app.example.com"));
    }
}
