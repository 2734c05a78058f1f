//! Internationalization (i18n) module.
//!
//! Everything locale-related lives here:
//!
//! - `registry`: single source of truth for the supported locale set,
//!   default locale, and text direction
//! - `locale`: validated `Locale` type used throughout the pipeline
//! - `resolver`: pure request-signal resolution (path segment, cookie)

pub mod locale;
pub mod registry;
pub mod resolver;

pub use locale::Locale;
pub use registry::{Direction, LocaleConfig, LocaleRegistry, LOCALE_COOKIE_NAME};
