//! Fallback adapter over the legacy CRUD API.
//!
//! When the CMS integration is switched off, posts still come from the old
//! document-database CRUD endpoints. Their flat shape is re-mapped into the
//! same normalized contract the CMS path produces, so pages never see the
//! difference. This path is a best-effort compatibility shim: any failure
//! yields an empty list or `None`, never an error.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

use crate::blog::{BlogCategory, BlogPost, BlogPostPreview};
use crate::config::Config;
use crate::i18n::Locale;

static NON_ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();

/// Derive a URL slug from free text: lowercase, non-alphanumeric runs
/// collapsed to a single hyphen, leading/trailing hyphens trimmed.
pub fn slugify(value: &str) -> String {
    let pattern =
        NON_ALPHANUMERIC.get_or_init(|| Regex::new("[^a-z0-9]+").expect("pattern is valid"));
    pattern
        .replace_all(&value.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Word-count based reading time: `max(1, ceil(words / 200))` minutes.
pub fn estimate_reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(200).max(1)
}

fn string_field(post: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    post.get(key).and_then(Value::as_str).map(String::from)
}

/// Map a legacy flat post document into the normalized post contract.
pub fn map_legacy_post(raw: &Value) -> Option<BlogPost> {
    let post = raw.as_object()?;

    let category_name =
        string_field(post, "category").unwrap_or_else(|| "Uncategorized".to_string());
    let category = BlogCategory {
        document_id: None,
        name: category_name.clone(),
        slug: slugify(&category_name),
    };

    let slug = string_field(post, "slug").unwrap_or_default();
    let content = post.get("content").cloned().unwrap_or(Value::Null);

    let reading_time = post
        .get("readingTime")
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .or_else(|| content.as_str().map(estimate_reading_time));

    let preview = BlogPostPreview {
        id: string_field(post, "_id")
            .or_else(|| string_field(post, "id"))
            .unwrap_or_else(|| slug.clone()),
        document_id: None,
        // Legacy documents carry no locale; they belong to the site default.
        locale: Locale::default_locale().code().to_string(),
        slug,
        title: string_field(post, "title").unwrap_or_default(),
        excerpt: string_field(post, "excerpt"),
        category: Some(category),
        author_name: string_field(post, "author").or_else(|| string_field(post, "authorName")),
        published_at: string_field(post, "publishedAt"),
        featured: post.get("featured").and_then(Value::as_bool).unwrap_or(false),
        cover_image_url: string_field(post, "imageUrl"),
        reading_time,
        localizations: Vec::new(),
    };

    Some(BlogPost { preview, content })
}

/// Fetch all posts from the legacy list endpoint. Empty on any failure.
pub async fn get_legacy_blog_posts(config: &Config) -> Vec<BlogPost> {
    let url = format!("{}/api/posts", config.legacy_api_url);

    let response = match reqwest::Client::new().get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Legacy posts fetch failed: {}", e);
            return Vec::new();
        }
    };

    if !response.status().is_success() {
        warn!("Legacy posts endpoint returned {}", response.status());
        return Vec::new();
    }

    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Legacy posts response was not valid JSON: {}", e);
            return Vec::new();
        }
    };

    match body {
        Value::Array(items) => items.iter().filter_map(map_legacy_post).collect(),
        _ => {
            warn!("Legacy posts endpoint returned a non-list body");
            Vec::new()
        }
    }
}

/// Preview projections of the legacy posts.
pub async fn get_legacy_blog_post_previews(config: &Config) -> Vec<BlogPostPreview> {
    get_legacy_blog_posts(config)
        .await
        .into_iter()
        .map(|post| post.preview)
        .collect()
}

/// Find a single legacy post by slug. `None` on miss or any failure.
pub async fn get_legacy_blog_post_by_slug(config: &Config, slug: &str) -> Option<BlogPost> {
    get_legacy_blog_posts(config)
        .await
        .into_iter()
        .find(|post| post.preview.slug == slug)
}
