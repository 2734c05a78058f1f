//! Locale resolution: pick the effective locale for an inbound request.
//!
//! Precedence is strict: a supported first path segment wins, then a
//! supported cookie value, then the registry default. Resolution never
//! fails; anything unrecognized falls through to the next signal.
//!
//! A path segment that happens to collide with a locale code but was meant
//! as a content slug is not disambiguated here; the router is expected to
//! only send locale-prefixed paths through locale-aware handlers.

use crate::i18n::locale::Locale;
use crate::i18n::registry::LocaleRegistry;

/// Resolve the effective locale from the two request signals.
pub fn resolve(path_segment: Option<&str>, cookie_value: Option<&str>) -> Locale {
    if let Some(segment) = path_segment {
        if let Ok(locale) = Locale::from_code(segment) {
            return locale;
        }
    }

    if let Some(value) = cookie_value {
        if let Ok(locale) = Locale::from_code(value) {
            return locale;
        }
    }

    Locale::default_locale()
}

/// Extract the first path segment from a request path.
///
/// `/fr/blog/my-post` -> `Some("fr")`, `/` -> `None`.
pub fn path_locale_segment(path: &str) -> Option<&str> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Find the locale cookie's value in a raw `Cookie` header.
///
/// Returns the value verbatim; validation against the registry happens in
/// `resolve`.
pub fn cookie_locale(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == crate::i18n::registry::LOCALE_COOKIE_NAME {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Check whether a path segment is itself a supported locale code.
///
/// The middleware uses this to decide whether to persist the choice as a
/// cookie.
pub fn is_locale_segment(segment: &str) -> bool {
    LocaleRegistry::get().is_supported(segment)
}
