//! Environment-sourced configuration.
//!
//! All settings come from `SAMOVAR_*` environment variables with sensible
//! defaults; there is no configuration file and no persisted state.

use std::env;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Credentials for the remote services
    pub services: ServiceConfig,

    /// Listener settings for the MCP endpoint
    pub server: ServerConfig,

    /// Calendar behavior
    pub calendar: CalendarConfig,

    /// Disk behavior
    pub disk: DiskConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// OAuth token for Yandex Calendar
    pub calendar_token: String,

    /// OAuth token for Yandex Disk
    pub disk_token: String,

    /// API key for Yandex Translate
    pub translate_key: String,
}

impl ServiceConfig {
    /// Check if a credential is configured (not a placeholder)
    fn is_configured(value: &str) -> bool {
        !value.is_empty() && !value.starts_with("your_")
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host for the HTTP listener
    pub host: String,

    /// Bind port for the HTTP listener
    pub port: u16,
}

/// Which calendar to use when the account has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarSelection {
    /// First calendar in upstream listing order (reference behavior)
    #[default]
    First,
    /// First calendar flagged primary, falling back to the first listed
    Primary,
}

#[derive(Debug, Clone, Default)]
pub struct CalendarConfig {
    /// Selection policy when no explicit calendar id is set
    pub selection: CalendarSelection,

    /// Pin a specific calendar id, overriding the selection policy
    pub calendar_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DiskConfig {
    /// Maximum number of entries fetched per file listing
    pub list_limit: u32,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DISK_LIST_LIMIT: u32 = 15;

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServiceConfig {
                calendar_token: "your_calendar_token".to_string(),
                disk_token: "your_disk_token".to_string(),
                translate_key: "your_translate_key".to_string(),
            },
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            calendar: CalendarConfig::default(),
            disk: DiskConfig {
                list_limit: DEFAULT_DISK_LIST_LIMIT,
            },
        }
    }
}

impl Config {
    /// Build configuration from `SAMOVAR_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(token) = env::var("SAMOVAR_CALENDAR_TOKEN") {
            config.services.calendar_token = token;
        }
        if let Ok(token) = env::var("SAMOVAR_DISK_TOKEN") {
            config.services.disk_token = token;
        }
        if let Ok(key) = env::var("SAMOVAR_TRANSLATE_KEY") {
            config.services.translate_key = key;
        }

        if let Ok(host) = env::var("SAMOVAR_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("SAMOVAR_PORT") {
            match port.parse() {
                Ok(port) => config.server.port = port,
                Err(_) => {
                    tracing::warn!("Ignoring invalid SAMOVAR_PORT value: {}", port);
                }
            }
        }

        if let Ok(selection) = env::var("SAMOVAR_CALENDAR_SELECTION") {
            match selection.to_lowercase().as_str() {
                "first" => config.calendar.selection = CalendarSelection::First,
                "primary" => config.calendar.selection = CalendarSelection::Primary,
                other => {
                    tracing::warn!("Ignoring unknown SAMOVAR_CALENDAR_SELECTION: {}", other);
                }
            }
        }
        if let Ok(id) = env::var("SAMOVAR_CALENDAR_ID") {
            if !id.is_empty() {
                config.calendar.calendar_id = Some(id);
            }
        }

        if let Ok(limit) = env::var("SAMOVAR_DISK_LIMIT") {
            match limit.parse() {
                Ok(limit) => config.disk.list_limit = limit,
                Err(_) => {
                    tracing::warn!("Ignoring invalid SAMOVAR_DISK_LIMIT value: {}", limit);
                }
            }
        }

        config
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.host.is_empty() {
            result.add_error("server.host", "Bind host must not be empty");
        }
        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        if !ServiceConfig::is_configured(&self.services.calendar_token) {
            result.add_warning(
                "services.calendar_token",
                "Calendar token not configured - fetch_events will fail",
            );
        }
        if !ServiceConfig::is_configured(&self.services.disk_token) {
            result.add_warning(
                "services.disk_token",
                "Disk token not configured - fetch_files will fail",
            );
        }
        if !ServiceConfig::is_configured(&self.services.translate_key) {
            result.add_warning(
                "services.translate_key",
                "Translate key not configured - translate will fail",
            );
        }

        if self.disk.list_limit == 0 {
            result.add_error("disk.list_limit", "Listing limit must be greater than 0");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_placeholder_credentials_warn() {
        let config = Config::default();
        let result = config.validate();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "services.calendar_token"));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "services.translate_key"));
    }

    #[test]
    fn test_zero_port_is_error() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "server.port"));
    }

    #[test]
    fn test_zero_disk_limit_is_error() {
        let mut config = Config::default();
        config.disk.list_limit = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "disk.list_limit"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
