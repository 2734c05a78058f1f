//! Locale-aware content pipeline for a multilingual movement archive site.
//!
//! The pipeline sits between page rendering and the external content
//! backend: the edge middleware resolves each request's locale, the CMS
//! client fetches raw entities, and the normalizer collapses the backend's
//! divergent shapes into one stable post contract. A legacy CRUD adapter
//! provides the same contract when the CMS integration is disabled.

pub mod blog;
pub mod cms;
pub mod config;
pub mod i18n;
pub mod legacy;
pub mod middleware;
pub mod normalize;
pub mod query;
pub mod server;
