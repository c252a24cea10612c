// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading and processing for navgate.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and pick the format from its extension
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders in the raw text
//! 3. Parse YAML / TOML / JSON into [`NavgateConfig`]
//! 4. Apply environment variable overrides
//! 5. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! NAVGATE_LOGIN_ROUTE=sign-in
//! NAVGATE_LANDING_ROUTE=home
//! NAVGATE_BYPASS_ROLE=Administrador
//! NAVGATE_EXPIRED_MESSAGE="Session expired"
//! NAVGATE_LOG_LEVEL=debug
//! ```

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{LogLevel, NavgateConfig};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "NAVGATE";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for navgate.
///
/// # Examples
///
/// ```no_run
/// use navgate_config::loader::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// let config = loader.load("config/navgate.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to resolve environment variables in values.
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable resolution and overrides.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads configuration from a file.
    ///
    /// The file format is determined by the file extension:
    /// - `.yaml` or `.yml` - YAML format
    /// - `.toml` - TOML format
    /// - `.json` - JSON format
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<NavgateConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;
        let mut config = self.parse_content(&content, format, path)?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!(
            routes = config.routes.len(),
            navigation = config.navigation.len(),
            permissions = config.catalog.entries().count(),
            "Configuration contents"
        );

        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> ConfigResult<NavgateConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)?
        } else {
            content.to_string()
        };
        let mut config = parse_str(&content, format)?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<NavgateConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)?
        } else {
            content.to_string()
        };

        parse_str(&content, format).map_err(|e| match e {
            ConfigError::Parse { message, line, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
                line,
            },
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })
    }

    /// Resolves environment variable placeholders in content.
    ///
    /// Supports the format: `${VAR_NAME}` or `${VAR_NAME:default}`
    fn resolve_env_placeholders(&self, content: &str) -> ConfigResult<String> {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                result.push(c);
                continue;
            }
            chars.next();

            let mut var_content = String::new();
            let mut found_close = false;
            for c in chars.by_ref() {
                if c == '}' {
                    found_close = true;
                    break;
                }
                var_content.push(c);
            }

            if !found_close {
                result.push_str("${");
                result.push_str(&var_content);
                continue;
            }

            let (var_name, default_value) = match var_content.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (var_content.as_str(), None),
            };

            match (env::var(var_name), default_value) {
                (Ok(value), _) => result.push_str(&value),
                (Err(_), Some(default)) => result.push_str(default),
                (Err(_), None) => {
                    warn!("Environment variable '{}' not found", var_name);
                    result.push_str(&format!("${{{}}}", var_name));
                }
            }
        }

        Ok(result)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&self, config: &mut NavgateConfig) -> ConfigResult<()> {
        let guard = &mut config.guard;
        for (suffix, target) in [
            ("LOGIN_ROUTE", &mut guard.login_route),
            ("LANDING_ROUTE", &mut guard.landing_route),
            ("BYPASS_ROLE", &mut guard.bypass_role),
            ("EXPIRED_MESSAGE", &mut guard.expired_message),
        ] {
            let name = format!("{}_{}", self.env_prefix, suffix);
            if let Ok(value) = env::var(&name) {
                debug!(variable = %name, "Applying environment override");
                *target = value;
            }
        }

        let name = format!("{}_LOG_LEVEL", self.env_prefix);
        if let Ok(value) = env::var(&name) {
            config.logging.level = LogLevel::parse(&value)
                .ok_or_else(|| ConfigError::invalid_env_var(&name, "expected a log level"))?;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<NavgateConfig> {
    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
            let line = e.location().map(|l| l.line());
            ConfigError::Parse {
                path: "<string>".into(),
                message: e.to_string(),
                line,
            }
        }),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
            line: Some(e.line()),
        }),
    }
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
///
/// # Examples
///
/// ```no_run
/// use navgate_config::loader::load_config;
///
/// let config = load_config("config/navgate.yaml").unwrap();
/// ```
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<NavgateConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<NavgateConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_test_yaml() -> String {
        r#"
guard:
  bypass_role: Administrator

routes:
  - name: index
    path: /
    redirect: session-landing
  - name: login
    path: /login
    meta:
      unauthenticatedOnly: true
  - name: dashboard
    path: /dashboard
    meta:
      requiresAuth: true
      requiresPermission: SHOW_REPORT_GRAPHICS

navigation:
  - title: Dashboard
    to:
      name: dashboard
    meta:
      requiresPermission: SHOW_REPORT_GRAPHICS

catalog:
  - name: Dashboard
    permissions:
      - name: Charts
        identifier: SHOW_REPORT_GRAPHICS
        operationId: 5

logging:
  level: info
"#
        .to_string()
    }

    #[test]
    fn test_load_yaml() {
        let yaml = create_test_yaml();
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loader = ConfigLoader::new().with_env_prefix("NAVGATE_TEST_LOAD_YAML");
        let config = loader.load(file.path()).unwrap();

        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.guard.login_route, "login");
        assert_eq!(config.navigation.len(), 1);
        assert!(config.catalog.contains("SHOW_REPORT_GRAPHICS"));
    }

    #[test]
    fn test_load_json() {
        let json = r#"{
            "routes": [
                {"name": "login", "path": "/login"},
                {"name": "dashboard", "path": "/dashboard"}
            ]
        }"#;
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = ConfigLoader::new().with_env_vars(false).load(file.path()).unwrap();
        assert!(config.routes.contains("dashboard"));
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
[guard]
landing_route = "home"

[[routes]]
name = "login"
path = "/login"

[[routes]]
name = "home"
path = "/home"
"#;
        let config = ConfigLoader::new()
            .with_env_vars(false)
            .load_from_str(toml, ConfigFormat::Toml)
            .unwrap();
        assert_eq!(config.guard.landing_route, "home");
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("navgate.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("navgate.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("navgate.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("navgate.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("navgate.txt")).is_err());
        assert!(ConfigFormat::from_path(Path::new("navgate")).is_err());
    }

    #[test]
    fn test_env_placeholder_with_default() {
        let loader = ConfigLoader::new();
        let result = loader
            .resolve_env_placeholders("role: ${NAVGATE_TEST_NONEXISTENT_VAR:Administrator}")
            .unwrap();
        assert_eq!(result, "role: Administrator");
    }

    #[test]
    fn test_env_placeholder_missing_kept() {
        let loader = ConfigLoader::new();
        let result = loader
            .resolve_env_placeholders("role: ${NAVGATE_TEST_NONEXISTENT_VAR}")
            .unwrap();
        assert_eq!(result, "role: ${NAVGATE_TEST_NONEXISTENT_VAR}");

        let unclosed = loader.resolve_env_placeholders("role: ${OPEN").unwrap();
        assert_eq!(unclosed, "role: ${OPEN");
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("NAVGATE_TEST_OVERRIDES_BYPASS_ROLE", "Root");
        std::env::set_var("NAVGATE_TEST_OVERRIDES_LOG_LEVEL", "debug");

        let loader = ConfigLoader::new().with_env_prefix("NAVGATE_TEST_OVERRIDES");
        let config = loader
            .load_from_str(&create_test_yaml(), ConfigFormat::Yaml)
            .unwrap();

        assert_eq!(config.guard.bypass_role, "Root");
        assert_eq!(config.logging.level, LogLevel::Debug);

        std::env::remove_var("NAVGATE_TEST_OVERRIDES_BYPASS_ROLE");
        std::env::remove_var("NAVGATE_TEST_OVERRIDES_LOG_LEVEL");
    }

    #[test]
    fn test_invalid_log_level_override() {
        std::env::set_var("NAVGATE_TEST_BAD_LEVEL_LOG_LEVEL", "loud");
        let loader = ConfigLoader::new().with_env_prefix("NAVGATE_TEST_BAD_LEVEL");
        let result = loader.load_from_str(&create_test_yaml(), ConfigFormat::Yaml);
        std::env::remove_var("NAVGATE_TEST_BAD_LEVEL_LOG_LEVEL");

        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn test_parse_error_carries_path() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(b"routes: [unclosed").unwrap();

        let result = ConfigLoader::new().with_env_vars(false).load(file.path());
        match result {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let result = ConfigLoader::new()
            .with_env_vars(false)
            .load_from_str("devices: []", ConfigFormat::Yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_not_found() {
        let loader = ConfigLoader::new();
        let result = loader.load("/nonexistent/path/navgate.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
