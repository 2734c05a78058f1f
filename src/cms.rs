//! HTTP client for the headless content backend.
//!
//! Content lookups go through `cms_fetch`, which builds the bracketed query
//! string, attaches the bearer token, and maps the response into the error
//! taxonomy the pages rely on: 404 is a `None` result rather than an error,
//! upstream failures carry status and body, and during the static build
//! phase any failure degrades to `None` so an unreachable CMS cannot fail
//! the build.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::query::build_query_string;

#[derive(Debug, Error)]
pub enum CmsError {
    /// Missing or refused credentials in a context that requires them.
    #[error("CMS configuration error: {0}")]
    Config(String),

    /// Non-2xx, non-404 response from the content backend.
    #[error("CMS request failed ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Network-level or response-decoding failure.
    #[error("CMS request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Options for a single content fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions<'a> {
    /// Nested query structure, serialized with bracket notation.
    pub query: Option<Value>,
    /// Injected as a top-level `locale` query parameter when present.
    pub locale: Option<&'a str>,
    /// Attach the configured bearer token. Defaults to true.
    pub auth: bool,
}

impl Default for FetchOptions<'_> {
    fn default() -> Self {
        Self {
            query: None,
            locale: None,
            auth: true,
        }
    }
}

/// Fetch a path from the content backend.
///
/// Returns `Ok(None)` when the content is absent (HTTP 404) or when any
/// failure happens during the build phase; otherwise the parsed JSON body.
pub async fn cms_fetch(
    config: &Config,
    path: &str,
    options: FetchOptions<'_>,
) -> Result<Option<Value>, CmsError> {
    // Silently serving unauthenticated content in production would look like
    // an empty site; fail fast instead.
    if config.production {
        if !options.auth {
            return Err(CmsError::Config(
                "unauthenticated CMS access is not allowed in production".to_string(),
            ));
        }
        if config.cms_api_token.is_none() {
            return Err(CmsError::Config(
                "CMS_API_TOKEN is required in production".to_string(),
            ));
        }
    }

    let mut query = options.query.unwrap_or_else(|| json!({}));
    if let Some(locale) = options.locale {
        if let Some(map) = query.as_object_mut() {
            map.insert("locale".to_string(), Value::String(locale.to_string()));
        }
    }

    let url = format!(
        "{}{}{}",
        config.cms_url,
        normalize_path(path),
        build_query_string(&query)
    );
    debug!("CMS fetch: {}", url);

    let client = reqwest::Client::new();
    let mut request = client
        .get(&url)
        .header(reqwest::header::CONTENT_TYPE, "application/json");

    if options.auth {
        if let Some(token) = &config.cms_api_token {
            request = request.bearer_auth(token);
        }
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            if config.build_phase {
                warn!("CMS unreachable during build phase, degrading to empty: {}", e);
                return Ok(None);
            }
            return Err(e.into());
        }
    };

    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if config.build_phase {
            warn!(
                "CMS returned {} during build phase, degrading to empty",
                status
            );
            return Ok(None);
        }
        return Err(CmsError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let body: Value = response.json().await?;
    Ok(Some(body))
}

/// Resolve a media URL from the CMS into an absolute URL.
///
/// The CMS returns relative paths for locally-hosted uploads and absolute
/// URLs for external providers.
pub fn media_url(config: &Config, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", config.cms_url, url)
    }
}

/// Collection paths are addressed relative to the CMS `/api` prefix;
/// absolute paths pass through untouched.
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/api/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            cms_url: "http://localhost:1337".to_string(),
            cms_api_token: None,
            cms_enabled: true,
            legacy_api_url: "http://localhost:3000".to_string(),
            production: false,
            build_phase: false,
            port: 8080,
        }
    }

    // ==================== Path Normalization Tests ====================

    #[test]
    fn test_collection_path_gets_api_prefix() {
        assert_eq!(normalize_path("blog-posts"), "/api/blog-posts");
    }

    #[test]
    fn test_absolute_path_passes_through() {
        assert_eq!(normalize_path("/custom/route"), "/custom/route");
    }

    // ==================== Media URL Tests ====================

    #[test]
    fn test_media_url_relative() {
        let config = test_config();
        assert_eq!(
            media_url(&config, "/uploads/cover.jpg"),
            "http://localhost:1337/uploads/cover.jpg"
        );
    }

    #[test]
    fn test_media_url_absolute_untouched() {
        let config = test_config();
        assert_eq!(
            media_url(&config, "https://cdn.example.com/cover.jpg"),
            "https://cdn.example.com/cover.jpg"
        );
        assert_eq!(
            media_url(&config, "http://cdn.example.com/cover.jpg"),
            "http://cdn.example.com/cover.jpg"
        );
    }

    // ==================== Production Enforcement Tests ====================

    #[tokio::test]
    async fn test_production_without_token_is_config_error() {
        let config = Config {
            production: true,
            ..test_config()
        };

        let result = cms_fetch(&config, "blog-posts", FetchOptions::default()).await;
        assert!(matches!(result, Err(CmsError::Config(_))));
    }

    #[tokio::test]
    async fn test_production_unauthenticated_request_is_config_error() {
        let config = Config {
            production: true,
            cms_api_token: Some("token".to_string()),
            ..test_config()
        };

        let options = FetchOptions {
            auth: false,
            ..FetchOptions::default()
        };
        let result = cms_fetch(&config, "blog-posts", options).await;
        assert!(matches!(result, Err(CmsError::Config(_))));
    }

    // ==================== Error Display Tests ====================

    #[test]
    fn test_upstream_error_carries_status_and_body() {
        let error = CmsError::Upstream {
            status: 500,
            body: "internal error".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("500"));
        assert!(message.contains("internal error"));
    }
}
