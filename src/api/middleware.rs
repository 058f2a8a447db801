//! API Middleware
//!
//! Registration lookup and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::WizardError;
use crate::error::AppError;

use super::state::{AppState, WizardHandle};

/// Header carrying the registration key issued at start
pub const REGISTRATION_KEY_HEADER: &str = "x-registration-key";

/// The registration named by the request, and its wizard
#[derive(Clone)]
pub struct CurrentRegistration {
    pub key: String,
    pub handle: WizardHandle,
}

// =========================================================================
// Registration lookup
// =========================================================================

/// Resolve `X-Registration-Key` to its wizard.
///
/// No header, or a key this server never issued, means there is no
/// session to operate on.
pub async fn registration_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .headers()
        .get(REGISTRATION_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string);

    let registration = match key {
        Some(key) => state
            .wizard(&key)
            .await
            .map(|handle| CurrentRegistration { key, handle }),
        None => None,
    };

    let Some(registration) = registration else {
        tracing::error!(uri = %request.uri(), "Request without a known registration");
        return Err(WizardError::SessionMissing.into());
    };

    request.extensions_mut().insert(registration);
    Ok(next.run(request).await)
}

// =========================================================================
// mask_headers_for_logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &[
    REGISTRATION_KEY_HEADER,
    "authorization",
    "cookie",
    "set-cookie",
];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = mask_headers_for_logging(request.headers());

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );

    response
}
