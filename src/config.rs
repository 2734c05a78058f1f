use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // CMS (headless content backend)
    pub cms_url: String,
    pub cms_api_token: Option<String>,
    pub cms_enabled: bool,

    // Legacy CRUD API (fallback when the CMS is disabled)
    pub legacy_api_url: String,

    // Runtime mode
    pub production: bool,
    pub build_phase: bool,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let cms_api_token = std::env::var("CMS_API_TOKEN").ok().filter(|v| !v.is_empty());

        // The CMS rejects unauthenticated requests in production; catch the
        // misconfiguration at startup instead of on the first page load.
        if production && cms_api_token.is_none() {
            anyhow::bail!("CMS_API_TOKEN not set (required when APP_ENV=production)");
        }

        Ok(Self {
            cms_url: std::env::var("CMS_URL")
                .unwrap_or_else(|_| "http://localhost:1337".to_string()),
            cms_api_token,
            cms_enabled: std::env::var("CMS_ENABLED")
                .map(|v| v == "true")
                .unwrap_or(false),

            legacy_api_url: std::env::var("LEGACY_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            production,
            build_phase: std::env::var("BUILD_PHASE")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false),

            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "CMS_URL",
            "CMS_API_TOKEN",
            "CMS_ENABLED",
            "LEGACY_API_URL",
            "BUILD_PHASE",
            "PORT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load with defaults");
        assert_eq!(config.cms_url, "http://localhost:1337");
        assert!(config.cms_api_token.is_none());
        assert!(!config.cms_enabled);
        assert_eq!(config.legacy_api_url, "http://localhost:3000");
        assert!(!config.production);
        assert!(!config.build_phase);
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_production_requires_token() {
        clear_env();
        std::env::set_var("APP_ENV", "production");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("CMS_API_TOKEN"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_with_token() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CMS_API_TOKEN", "secret-token");

        let config = Config::from_env().expect("Should load");
        assert!(config.production);
        assert_eq!(config.cms_api_token.as_deref(), Some("secret-token"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_token_treated_as_missing() {
        clear_env();
        std::env::set_var("CMS_API_TOKEN", "");

        let config = Config::from_env().expect("Should load");
        assert!(config.cms_api_token.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_cms_enabled_flag() {
        clear_env();
        std::env::set_var("CMS_ENABLED", "true");

        let config = Config::from_env().expect("Should load");
        assert!(config.cms_enabled);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let result = Config::from_env();
        assert!(result.is_err());

        clear_env();
    }
}
