//! JSON API surface over the content pipeline.
//!
//! Every route sits behind the locale middleware; handlers read the
//! resolved locale from the internal header instead of re-deriving it.
//! When the CMS integration is disabled the legacy adapter answers
//! instead, through the same normalized shapes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::blog::{
    find_post_locale, get_blog_post_by_slug, get_blog_post_previews, resolve_sibling_slug,
};
use crate::cms::CmsError;
use crate::config::Config;
use crate::i18n::LocaleRegistry;
use crate::legacy::{get_legacy_blog_post_by_slug, get_legacy_blog_post_previews};
use crate::middleware::{locale_from_headers, locale_middleware};

pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/blog/posts", get(list_posts))
        .route("/api/blog/posts/:slug", get(get_post))
        .route("/api/blog/resolve-slug", get(resolve_slug))
        .layer(from_fn(locale_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

/// Upstream and configuration failures mapped onto HTTP statuses. The page
/// layer renders these as a graceful error view, never a raw failure.
struct ApiError(CmsError);

impl From<CmsError> for ApiError {
    fn from(error: CmsError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("content request failed: {}", self.0);
        let status = match &self.0 {
            CmsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CmsError::Upstream { .. } | CmsError::Request(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": "content backend unavailable" }))).into_response()
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn list_posts(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let locale = locale_from_headers(&headers);

    let previews = if config.cms_enabled {
        get_blog_post_previews(&config, Some(locale.code())).await?
    } else {
        get_legacy_blog_post_previews(&config).await
    };

    Ok(Json(previews).into_response())
}

async fn get_post(
    State(config): State<Arc<Config>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let locale = locale_from_headers(&headers);

    if !config.cms_enabled {
        return Ok(match get_legacy_blog_post_by_slug(&config, &slug).await {
            Some(post) => Json(post).into_response(),
            None => not_found(None),
        });
    }

    if let Some(post) = get_blog_post_by_slug(&config, &slug, Some(locale.code())).await? {
        return Ok(Json(post).into_response());
    }

    // The slug may exist under another locale; offer a redirect target
    // instead of a bare miss. Failure of this second pass must not mask the
    // 404 itself.
    let redirect = find_post_locale(&config, &slug).await.ok().flatten();
    Ok(not_found(redirect.map(|target| json!(target))))
}

fn not_found(redirect: Option<serde_json::Value>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "post not found",
            "redirect": redirect,
        })),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct ResolveSlugParams {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

async fn resolve_slug(
    State(config): State<Arc<Config>>,
    Query(params): Query<ResolveSlugParams>,
) -> Result<Response, ApiError> {
    let registry = LocaleRegistry::get();
    if params.slug.is_empty()
        || !registry.is_supported(&params.from)
        || !registry.is_supported(&params.to)
    {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "slug": null }))).into_response());
    }

    if !config.cms_enabled {
        return Ok((StatusCode::NOT_FOUND, Json(json!({ "slug": null }))).into_response());
    }

    let source = get_blog_post_by_slug(&config, &params.slug, Some(&params.from)).await?;
    let Some(document_id) = source.and_then(|post| post.preview.document_id) else {
        return Ok((StatusCode::NOT_FOUND, Json(json!({ "slug": null }))).into_response());
    };

    let resolved = resolve_sibling_slug(&config, &document_id, &params.to).await?;
    Ok(Json(json!({ "slug": resolved })).into_response())
}
