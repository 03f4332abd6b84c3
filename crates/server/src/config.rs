//! # Application Configuration
//!
//! This module defines the configuration structure for `nisa-server` and the
//! logic for loading it from a `config.yml` file and environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use nisa::constants::{gemini_api_url, DEFAULT_CLOUDINARY_API_BASE, DEFAULT_GEMINI_MODEL};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::sync::LazyLock;
use tracing::info;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("static regex is valid"));

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
    /// The configuration loaded but a required value is empty.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    pub cloudinary: CloudinaryConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    pub admin: AdminConfig,
}

fn default_port() -> u16 {
    9090
}

/// Realtime Database connection. Without a URL the server keeps its data in memory.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_base: String,
}

/// Trip search model. Without an API key, search answers with sample packages.
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
    /// Overrides the URL derived from `model_name`.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_GEMINI_MODEL.to_string(),
            api_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn resolved_api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| gemini_api_url(&self.model_name))
    }
}

#[derive(Deserialize, Clone)]
pub struct AdminConfig {
    pub password: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_PLACEHOLDER.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

// An unset `${VAR}` leaves an empty string behind; treat it as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `NISA_...` variables (e.g., `NISA_FIREBASE__DATABASE_URL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("port", i64::from(default_port()))?
        .set_default("cloudinary.api_base", DEFAULT_CLOUDINARY_API_BASE)?
        .set_default("gemini.model_name", DEFAULT_GEMINI_MODEL)?
        .set_default("admin.token_ttl_secs", 8 * 60 * 60)?;

    // Layer 2: Main config file.
    let main_config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => format!("{base_path}/config.yml"),
    };
    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'."
        ))
    })?;
    info!("Loading configuration from '{main_config_path}'.");
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        // Layer 3: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("NISA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.firebase.database_url = non_empty(config.firebase.database_url);
    config.firebase.auth_token = non_empty(config.firebase.auth_token);
    config.gemini.api_key = non_empty(config.gemini.api_key);
    config.gemini.api_url = non_empty(config.gemini.api_url);

    if config.admin.password.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "admin.password must be set (ADMIN_PASSWORD)".to_string(),
        ));
    }
    if config.admin.jwt_secret.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "admin.jwt_secret must be set (JWT_SECRET)".to_string(),
        ));
    }

    Ok(config)
}
