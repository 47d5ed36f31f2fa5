//! Security headers added to every response.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
        HeaderMap, HeaderValue,
    },
    middleware::{self, Next},
    response::Response,
    Extension, Router,
};

use crate::config::{HstsConfig, SecurityHeadersConfig};

fn hsts_value(hsts: &HstsConfig) -> String {
    let mut value = format!("max-age={}", hsts.max_age_secs);
    if hsts.include_subdomains {
        value.push_str("; includeSubDomains");
    }
    value
}

/// Header set for `config`, built once and shared across requests.
///
/// Free-text values that are not valid header text are left out with a
/// warning.
#[must_use]
pub fn build_security_headers(config: &SecurityHeadersConfig) -> Arc<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    headers.insert(
        X_FRAME_OPTIONS,
        HeaderValue::from_static(config.frame_options.as_str()),
    );

    let mut configured = vec![
        (CONTENT_SECURITY_POLICY, config.content_security_policy.clone()),
        (REFERRER_POLICY, config.referrer_policy.clone()),
    ];
    if config.hsts.enabled {
        configured.push((STRICT_TRANSPORT_SECURITY, hsts_value(&config.hsts)));
    }

    for (name, value) in configured {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(_) => tracing::warn!(header = name.as_str(), "skipping invalid security header value"),
        }
    }

    Arc::new(headers)
}

/// Copy the shared header set onto the response.
pub async fn security_headers_middleware(
    Extension(headers): Extension<Arc<HeaderMap>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let response_headers = response.headers_mut();
    for (name, value) in headers.iter() {
        response_headers.insert(name.clone(), value.clone());
    }
    response
}

/// Wrap `router` so every response carries the configured headers.
///
/// Apply it last so the headers cover every route and layer beneath it.
/// Returns `router` unchanged when the headers are disabled.
#[must_use]
pub fn with_security_headers(router: Router, config: &SecurityHeadersConfig) -> Router {
    if !config.enabled {
        tracing::info!("Security headers disabled");
        return router;
    }
    tracing::info!("Security headers enabled");
    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(Extension(build_security_headers(config)))
}
