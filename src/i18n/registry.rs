//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is a singleton backed by `OnceLock` so that every part of
//! the application (middleware, CMS client, normalizer) agrees on the same
//! locale set and default.

use std::sync::OnceLock;

/// Name of the cookie that remembers the visitor's locale choice.
pub const LOCALE_COOKIE_NAME: &str = "site_locale";

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// The value used in HTML `dir` attributes ("ltr" / "rtl").
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "ltr",
            Direction::RightToLeft => "rtl",
        }
    }
}

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 language code (e.g., "ar", "fr", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Arabic", "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "العربية", "Français")
    pub native_name: &'static str,

    /// Text direction, derived from a static mapping (never stored per-entity)
    pub direction: Direction,

    /// Whether this is the site's default locale (exactly one should be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Check if a locale code belongs to the supported set.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All supported locales, default first.
    pub fn list(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// The site's default locale configuration.
    ///
    /// # Panics
    /// Panics if zero or multiple default locales are defined (a
    /// configuration error in `default_locales`).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

/// The supported locale set. Arabic is the site's default and the only
/// right-to-left locale.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            direction: Direction::RightToLeft,
            is_default: true,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            direction: Direction::LeftToRight,
            is_default: false,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: Direction::LeftToRight,
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_arabic() {
        let registry = LocaleRegistry::get();
        let config = registry.get_by_code("ar").expect("Arabic should exist");

        assert_eq!(config.code, "ar");
        assert_eq!(config.name, "Arabic");
        assert_eq!(config.direction, Direction::RightToLeft);
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_french() {
        let registry = LocaleRegistry::get();
        let config = registry.get_by_code("fr").expect("French should exist");

        assert_eq!(config.code, "fr");
        assert_eq!(config.direction, Direction::LeftToRight);
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LocaleRegistry::get();
        assert!(registry.get_by_code("es").is_none());
    }

    #[test]
    fn test_is_supported() {
        let registry = LocaleRegistry::get();
        assert!(registry.is_supported("ar"));
        assert!(registry.is_supported("fr"));
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("es"));
        assert!(!registry.is_supported(""));
    }

    #[test]
    fn test_list_contains_all_three() {
        let registry = LocaleRegistry::get();
        let all = registry.list();

        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|locale| locale.code == "ar"));
        assert!(all.iter().any(|locale| locale.code == "fr"));
        assert!(all.iter().any(|locale| locale.code == "en"));
    }

    #[test]
    fn test_exactly_one_default() {
        let registry = LocaleRegistry::get();
        let defaults: Vec<_> = registry
            .list()
            .into_iter()
            .filter(|locale| locale.is_default)
            .collect();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].code, "ar");
    }

    #[test]
    fn test_default_locale_is_arabic() {
        let registry = LocaleRegistry::get();
        let default = registry.default_locale();

        assert_eq!(default.code, "ar");
        assert!(default.is_default);
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::LeftToRight.as_str(), "ltr");
        assert_eq!(Direction::RightToLeft.as_str(), "rtl");
    }
}
