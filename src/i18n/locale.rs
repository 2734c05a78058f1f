//! Locale type: validated, copyable locale representation.
//!
//! A `Locale` can only hold a code that exists in the registry, so code
//! holding a `Locale` never has to re-validate it.

use crate::i18n::registry::{Direction, LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// ISO 639-1 language code (e.g., "ar", "fr", "en")
    code: &'static str,
}

impl Locale {
    pub const ARABIC: Locale = Locale { code: "ar" };
    pub const FRENCH: Locale = Locale { code: "fr" };
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Create a Locale from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is in the supported set
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unsupported locale code: '{}'", code),
        }
    }

    /// Normalize an arbitrary (possibly absent) value to a valid locale.
    ///
    /// Total: any unrecognized or missing input maps to the default locale.
    pub fn normalize(value: Option<&str>) -> Locale {
        value
            .and_then(|code| Self::from_code(code).ok())
            .unwrap_or_else(Self::default_locale)
    }

    /// The site's default locale.
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// Get the ISO 639-1 locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not found in the registry, which cannot happen
    /// for a properly constructed `Locale`.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// English name of the locale (e.g., "Arabic").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the locale (e.g., "العربية").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Text direction for this locale.
    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    /// Check if this is the site's default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_arabic_constant() {
        let arabic = Locale::ARABIC;
        assert_eq!(arabic.code(), "ar");
        assert_eq!(arabic.name(), "Arabic");
        assert_eq!(arabic.direction(), Direction::RightToLeft);
        assert!(arabic.is_default());
    }

    #[test]
    fn test_french_constant() {
        let french = Locale::FRENCH;
        assert_eq!(french.code(), "fr");
        assert_eq!(french.direction(), Direction::LeftToRight);
        assert!(!french.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        for code in ["ar", "fr", "en"] {
            let locale = Locale::from_code(code).expect("Should succeed");
            assert_eq!(locale.code(), code);
        }
    }

    #[test]
    fn test_from_code_unsupported() {
        let result = Locale::from_code("es");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
    }

    // ==================== normalize Tests ====================

    #[test]
    fn test_normalize_supported_is_identity() {
        for code in ["ar", "fr", "en"] {
            assert_eq!(Locale::normalize(Some(code)).code(), code);
        }
    }

    #[test]
    fn test_normalize_unsupported_falls_back_to_default() {
        assert_eq!(Locale::normalize(Some("es")), Locale::ARABIC);
        assert_eq!(Locale::normalize(Some("EN")), Locale::ARABIC);
        assert_eq!(Locale::normalize(Some("")), Locale::ARABIC);
    }

    #[test]
    fn test_normalize_absent_falls_back_to_default() {
        assert_eq!(Locale::normalize(None), Locale::ARABIC);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_locale_equality() {
        let locale = Locale::from_code("fr").unwrap();
        assert_eq!(locale, Locale::FRENCH);
        assert_ne!(locale, Locale::ENGLISH);
    }

    #[test]
    fn test_locale_copy() {
        let locale = Locale::ARABIC;
        let copied = locale;
        assert_eq!(locale, copied);
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::FRENCH.to_string(), "fr");
    }

    // ==================== Config Access Tests ====================

    #[test]
    fn test_native_names() {
        assert_eq!(Locale::ENGLISH.native_name(), "English");
        assert_eq!(Locale::FRENCH.native_name(), "Français");
        assert_eq!(Locale::ARABIC.native_name(), "العربية");
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(Locale::default_locale(), Locale::ARABIC);
    }
}
