//! Edge middleware: locale negotiation for every request.
//!
//! Runs before routing. The resolved locale is attached to the forwarded
//! request as an internal header so handlers can read it without
//! re-deriving it, and an explicit locale choice in the path is persisted
//! as a cookie for subsequent locale-agnostic requests. The middleware
//! never rejects a request; every signal failure falls through to the
//! default locale.

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::i18n::{resolver, Locale, LOCALE_COOKIE_NAME};

/// Internal request header carrying the resolved locale.
pub const LOCALE_HEADER: &str = "x-site-locale";

/// One year, matching how long a visitor's locale choice is remembered.
const COOKIE_MAX_AGE_SECONDS: u32 = 60 * 60 * 24 * 365;

pub async fn locale_middleware(mut request: Request, next: Next) -> Response {
    let segment = resolver::path_locale_segment(request.uri().path()).map(str::to_string);
    let cookie_value = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(resolver::cookie_locale)
        .map(str::to_string);

    let locale = resolver::resolve(segment.as_deref(), cookie_value.as_deref());
    request
        .headers_mut()
        .insert(LOCALE_HEADER, HeaderValue::from_static(locale.code()));

    let mut response = next.run(request).await;

    // Only an explicit locale prefix in the path counts as a choice worth
    // remembering.
    if let Some(segment) = segment.filter(|segment| resolver::is_locale_segment(segment)) {
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            LOCALE_COOKIE_NAME, segment, COOKIE_MAX_AGE_SECONDS
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Read the locale the middleware resolved for this request.
///
/// Total: a missing or mangled header normalizes to the default locale.
pub fn locale_from_headers(headers: &HeaderMap) -> Locale {
    Locale::normalize(
        headers
            .get(LOCALE_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}
