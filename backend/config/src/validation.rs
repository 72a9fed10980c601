//! Config validation with user-friendly error messages.

use crate::schema::FilehostConfig;
use thiserror::Error;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate a normalized config.
pub fn validate(config: &FilehostConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.uploadpath.trim().is_empty() {
        report.error("uploadpath", "Upload path cannot be empty");
    }
    if config.uri == "/" {
        report.error("uri", "Base URI cannot be the root path");
    }
    if config.authenticate && config.jwt_secret.is_empty() {
        report.warn(
            "jwt_secret",
            "No signing secret configured; uploads will only check that a credential is present",
        );
    }
    if let Some(site) = &config.website {
        if !site.is_empty() && !site.starts_with("http://") && !site.starts_with("https://") {
            report.warn("website", "Public URL does not start with http:// or https://");
        }
    }
    if config.listen.parse::<std::net::SocketAddr>().is_err() {
        report.error("listen", format!("Not a valid socket address: {}", config.listen));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_with_secret_warning() {
        let mut cfg = FilehostConfig::default();
        cfg.normalize();
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "jwt_secret"));
    }

    #[test]
    fn bad_listen_address_is_an_error() {
        let cfg = FilehostConfig {
            listen: "not-an-addr".to_string(),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.path == "listen"));
    }

    #[test]
    fn schemeless_website_warns() {
        let cfg = FilehostConfig {
            website: Some("irc.example.net/upload".to_string()),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.warnings.iter().any(|w| w.path == "website"));
    }
}
