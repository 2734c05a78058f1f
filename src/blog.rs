//! Blog content: stable post/preview shapes and the CMS lookups that
//! produce them.
//!
//! Raw entities from the content backend pass through the normalizer and a
//! type-guarded field extraction; whatever shape the backend used, the same
//! `BlogPostPreview`/`BlogPost` comes out. The full post keeps its `content`
//! payload untouched (string or structured block tree) since rendering it is
//! a display concern.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::cms::{cms_fetch, media_url, CmsError, FetchOptions};
use crate::config::Config;
use crate::i18n::{Locale, LocaleRegistry};
use crate::normalize::{normalize_entity, normalize_relation};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub name: String,
    pub slug: String,
}

/// A sibling document in another locale, used for cross-locale navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogLocalization {
    pub locale: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// The reduced projection of a post used in listing views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPreview {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub locale: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BlogCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub localizations: Vec<BlogLocalization>,
}

/// A full post: the preview fields plus the unmodified content payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub preview: BlogPostPreview,
    pub content: Value,
}

/// Where to send a reader whose requested locale/slug combination missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectTarget {
    pub locale: String,
    pub slug: String,
}

/// Resolve the locale a normalized entity belongs to.
///
/// The entity's own `locale` field wins when it is a supported value, which
/// also catches a backend silently answering in the wrong locale; otherwise
/// the requested locale, normalized, applies.
fn entity_locale(entity: &Map<String, Value>, requested: Option<&str>) -> String {
    match entity.get("locale").and_then(Value::as_str) {
        Some(code) if LocaleRegistry::get().is_supported(code) => code.to_string(),
        _ => Locale::normalize(requested).code().to_string(),
    }
}

/// Identity fields arrive as numbers from the legacy wrapper shape and as
/// strings from the flat one.
fn stringify_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(entity: &Map<String, Value>, key: &str) -> Option<String> {
    entity.get(key).and_then(Value::as_str).map(String::from)
}

/// Map a raw entity to the preview shape. `None` for null or unusable input.
pub fn map_blog_post_preview(
    config: &Config,
    raw: &Value,
    requested_locale: Option<&str>,
) -> Option<BlogPostPreview> {
    let entity = normalize_entity(raw)?;

    let locale = entity_locale(&entity, requested_locale);
    let document_id = stringify_id(entity.get("documentId"));
    let slug = string_field(&entity, "slug").unwrap_or_default();
    let title = string_field(&entity, "title").unwrap_or_default();

    let localizations = normalize_relation(entity.get("localizations").unwrap_or(&Value::Null))
        .many()
        .into_iter()
        .filter_map(|entry| {
            let entry_locale = entry.get("locale").and_then(Value::as_str)?;
            let entry_slug = entry.get("slug").and_then(Value::as_str)?;
            if !LocaleRegistry::get().is_supported(entry_locale) {
                return None;
            }
            Some(BlogLocalization {
                locale: entry_locale.to_string(),
                slug: entry_slug.to_string(),
                document_id: stringify_id(entry.get("documentId"))
                    .or_else(|| stringify_id(entry.get("id"))),
            })
        })
        .collect();

    let category = normalize_relation(entity.get("category").unwrap_or(&Value::Null))
        .one()
        .and_then(|category| {
            let name = category.get("name").and_then(Value::as_str)?;
            Some(BlogCategory {
                document_id: stringify_id(category.get("documentId")),
                name: name.to_string(),
                slug: string_field(&category, "slug").unwrap_or_default(),
            })
        });

    let cover_image_url = normalize_relation(entity.get("coverImage").unwrap_or(&Value::Null))
        .one()
        .and_then(|image| {
            image
                .get("url")
                .and_then(Value::as_str)
                .map(|url| media_url(config, url))
        });

    Some(BlogPostPreview {
        id: stringify_id(entity.get("id"))
            .or_else(|| document_id.clone())
            .unwrap_or_else(|| slug.clone()),
        document_id,
        locale,
        slug,
        title,
        excerpt: string_field(&entity, "excerpt"),
        category,
        author_name: string_field(&entity, "authorName"),
        published_at: string_field(&entity, "publishedAt"),
        featured: entity.get("featured").and_then(Value::as_bool).unwrap_or(false),
        cover_image_url,
        reading_time: entity
            .get("readingTime")
            .and_then(Value::as_u64)
            .map(|n| n as u32),
        localizations,
    })
}

/// Map a raw entity to the full post shape.
pub fn map_blog_post(
    config: &Config,
    raw: &Value,
    requested_locale: Option<&str>,
) -> Option<BlogPost> {
    // The content payload is read from the normalized entity before the
    // preview mapping discards unknown fields.
    let content = normalize_entity(raw)
        .and_then(|entity| entity.get("content").cloned())
        .unwrap_or(Value::Null);

    let preview = map_blog_post_preview(config, raw, requested_locale)?;
    Some(BlogPost { preview, content })
}

fn preview_fields() -> Value {
    json!([
        "documentId",
        "slug",
        "title",
        "excerpt",
        "featured",
        "publishedAt",
        "authorName",
        "readingTime",
        "locale",
    ])
}

fn collection_entries(response: Option<Value>) -> Vec<Value> {
    response
        .and_then(|body| body.get("data").cloned())
        .and_then(|data| match data {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}

/// Fetch the preview list for a locale, newest first.
pub async fn get_blog_post_previews(
    config: &Config,
    locale: Option<&str>,
) -> Result<Vec<BlogPostPreview>, CmsError> {
    let query = json!({
        "sort": ["publishedAt:desc"],
        "fields": preview_fields(),
        "populate": {
            "category": true,
            "coverImage": true,
            "localizations": { "fields": ["slug", "locale"] },
        },
    });

    let response = cms_fetch(
        config,
        "blog-posts",
        FetchOptions {
            query: Some(query),
            locale,
            ..FetchOptions::default()
        },
    )
    .await?;

    Ok(collection_entries(response)
        .iter()
        .filter_map(|entry| map_blog_post_preview(config, entry, locale))
        .filter(|preview| locale.map_or(true, |requested| preview.locale == requested))
        .collect())
}

/// Fetch a single post by slug. A post that resolves to a different locale
/// than the requested one counts as a miss.
pub async fn get_blog_post_by_slug(
    config: &Config,
    slug: &str,
    locale: Option<&str>,
) -> Result<Option<BlogPost>, CmsError> {
    if slug.is_empty() {
        warn!("get_blog_post_by_slug called without a slug");
        return Ok(None);
    }

    let query = json!({
        "filters": { "slug": { "$eq": slug } },
        "fields": [
            "documentId",
            "slug",
            "title",
            "excerpt",
            "content",
            "featured",
            "publishedAt",
            "authorName",
            "readingTime",
            "locale",
        ],
        "populate": {
            "category": true,
            "coverImage": true,
            "localizations": { "fields": ["slug", "locale"] },
        },
        "pagination": { "pageSize": 1 },
    });

    let response = cms_fetch(
        config,
        "blog-posts",
        FetchOptions {
            query: Some(query),
            locale,
            ..FetchOptions::default()
        },
    )
    .await?;

    let entries = collection_entries(response);
    let post = entries
        .first()
        .and_then(|entry| map_blog_post(config, entry, locale));

    match (post, locale) {
        (Some(post), Some(requested)) if post.preview.locale != requested => Ok(None),
        (post, _) => Ok(post),
    }
}

/// Find the localized home of a slug that missed in its requested locale.
///
/// A locale-agnostic slug lookup first recovers the stable document
/// identity, then a bounded sequential scan over the fixed locale set asks
/// each locale for that document, early-exiting on the first hit — per-locale
/// slugs can differ, so the sibling's slug comes from the hit, not from the
/// input. When no identity can be recovered, each locale's preview list is
/// rescanned for a literal slug match. Sequential on purpose, so the scan
/// stops at the first hit without fanning out needless calls.
pub async fn find_post_locale(
    config: &Config,
    slug: &str,
) -> Result<Option<RedirectTarget>, CmsError> {
    if slug.is_empty() {
        warn!("find_post_locale called without a slug");
        return Ok(None);
    }

    let query = json!({
        "filters": { "slug": { "$eq": slug } },
        "fields": ["slug", "locale", "documentId"],
        "pagination": { "pageSize": 1 },
    });

    let response = cms_fetch(
        config,
        "blog-posts",
        FetchOptions {
            query: Some(query),
            locale: None,
            ..FetchOptions::default()
        },
    )
    .await?;

    let document_id = collection_entries(response)
        .first()
        .and_then(normalize_entity)
        .and_then(|entity| stringify_id(entity.get("documentId")));

    if let Some(document_id) = document_id {
        for candidate in LocaleRegistry::get().list() {
            if let Some(sibling_slug) =
                resolve_sibling_slug(config, &document_id, candidate.code).await?
            {
                return Ok(Some(RedirectTarget {
                    locale: candidate.code.to_string(),
                    slug: sibling_slug,
                }));
            }
        }
    } else {
        warn!(
            "no document identity found for '{}', falling back to list scan",
            slug
        );
    }

    for candidate in LocaleRegistry::get().list() {
        let previews = get_blog_post_previews(config, Some(candidate.code)).await?;
        if let Some(preview) = previews.into_iter().find(|preview| preview.slug == slug) {
            return Ok(Some(RedirectTarget {
                locale: candidate.code.to_string(),
                slug: preview.slug,
            }));
        }
    }

    Ok(None)
}

/// Translate a slug from one locale to another: resolve the source post,
/// then ask for its sibling document's slug. `None` when either half misses.
pub async fn resolve_localized_slug(
    config: &Config,
    slug: &str,
    from: &str,
    to: &str,
) -> Result<Option<String>, CmsError> {
    let Some(source) = get_blog_post_by_slug(config, slug, Some(from)).await? else {
        return Ok(None);
    };
    let Some(document_id) = source.preview.document_id else {
        return Ok(None);
    };

    resolve_sibling_slug(config, &document_id, to).await
}

/// Look up the slug a document carries in another locale, by stable
/// document identity.
pub async fn resolve_sibling_slug(
    config: &Config,
    document_id: &str,
    to: &str,
) -> Result<Option<String>, CmsError> {
    let query = json!({
        "filters": { "documentId": { "$eq": document_id } },
        "fields": ["slug", "locale", "documentId"],
        "pagination": { "pageSize": 1 },
    });

    let response = cms_fetch(
        config,
        "blog-posts",
        FetchOptions {
            query: Some(query),
            locale: Some(to),
            ..FetchOptions::default()
        },
    )
    .await?;

    let entries = collection_entries(response);
    Ok(entries
        .first()
        .and_then(normalize_entity)
        .and_then(|entity| string_field(&entity, "slug")))
}
