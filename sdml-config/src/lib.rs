//! Shared configuration loader for the sdml toolchain.
//!
//! `defaults/sdml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer a user file, `SDML_*`
//! environment variables and explicit overrides on top of those defaults via
//! [`Loader`] before deserializing into [`SdmlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError as Error;

const DEFAULT_TOML: &str = include_str!("../defaults/sdml.default.toml");

/// Environment variable -> configuration key.
const ENV_KEYS: &[(&str, &str)] = &[
    ("SDML_ENCODING", "encoding"),
    ("SDML_SOURCE_PATH", "source.path"),
    ("SDML_BUILD_PATH", "build.path"),
    ("SDML_COLOR_LOGS", "logging.color"),
    ("SDML_LOG_LEVEL", "logging.level"),
];

/// Top-level configuration consumed by sdml applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SdmlConfig {
    /// Source text encoding
    pub encoding: String,
    pub source: SourceConfig,
    pub build: BuildConfig,
    pub logging: LoggingConfig,
}

impl SdmlConfig {
    /// Only UTF-8 input is supported.
    pub fn is_supported_encoding(&self) -> bool {
        let encoding = self.encoding.to_ascii_lowercase();
        encoding == "utf-8" || encoding == "utf8"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// File or directory processed when none is named explicitly
    pub path: String,
    /// Extension of the files collected from a directory
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub color: bool,
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply the recognized `SDML_*` variables from `vars`. Unknown names are ignored.
    ///
    /// `SDML_COLOR_LOGS` enables colors only when it is exactly `TRUE`.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let Some((_, key)) = ENV_KEYS.iter().find(|(env, _)| *env == name.as_ref()) else {
                continue;
            };
            let value: String = value.into();
            self.builder = if *key == "logging.color" {
                self.builder.set_override(*key, value == "TRUE")?
            } else {
                self.builder.set_override(*key, value)?
            };
        }
        Ok(self)
    }

    /// Apply the `SDML_*` variables of the current process environment.
    pub fn with_environment(self) -> Result<Self, ConfigError> {
        self.with_env_vars(std::env::vars())
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SdmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SdmlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.encoding, "utf-8");
        assert_eq!(config.source.path, ".");
        assert_eq!(config.source.extension, "sdml");
        assert_eq!(config.build.path, "output");
        assert!(config.logging.color);
        assert_eq!(config.logging.level, "warn");
        assert!(config.is_supported_encoding());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("build.path", "dist")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.build.path, "dist");
    }

    #[test]
    fn maps_environment_variables() {
        let vars = vec![
            ("SDML_BUILD_PATH", "target/sdml"),
            ("SDML_COLOR_LOGS", "yes"),
            ("SDML_LOG_LEVEL", "debug"),
            ("UNRELATED", "ignored"),
        ];
        let config = Loader::new()
            .with_env_vars(vars)
            .expect("env to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.build.path, "target/sdml");
        assert!(!config.logging.color);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.source.path, ".");
    }

    #[test]
    fn color_logs_only_on_exact_true() {
        let config = Loader::new()
            .set_override("logging.color", false)
            .expect("override to apply")
            .with_env_vars([("SDML_COLOR_LOGS", "TRUE")])
            .expect("env to apply")
            .build()
            .expect("config to build");
        assert!(config.logging.color);
    }

    #[test]
    fn rejects_unsupported_encodings() {
        let config = Loader::new()
            .with_env_vars([("SDML_ENCODING", "latin-1")])
            .expect("env to apply")
            .build()
            .expect("config to build");
        assert!(!config.is_supported_encoding());

        let config = Loader::new()
            .set_override("encoding", "UTF8")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.is_supported_encoding());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/sdml.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/sdml.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.build.path, "output");
    }
}
