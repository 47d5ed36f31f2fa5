//! Layered service configuration.
//!
//! Sources, lowest priority first: struct defaults, `config.yaml` if present,
//! then `VOICES_`-prefixed environment variables with `__` between nesting
//! levels (`VOICES_REPRESENT__TIMEOUT_SECS=10`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

const ENV_PREFIX: &str = "VOICES_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub represent: RepresentConfig,
    pub templates: TemplatesConfig,
    pub cors: CorsConfig,
    pub security_headers: SecurityHeadersConfig,
    pub swagger: SwaggerConfig,
}

// ─── Sections ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Open North Represent API client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepresentConfig {
    /// Base URL without a trailing path, e.g. `https://represent.opennorth.ca`.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RepresentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://represent.opennorth.ca".to_string(),
            timeout_secs: 30,
            user_agent: "VoicesForIran/1.0".to_string(),
        }
    }
}

impl RepresentConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), String> {
        if !is_http_url(&self.base_url) {
            return Err(format!(
                "represent.base_url must start with http:// or https://, got: '{}'",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("represent.timeout_secs cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Where email templates and the party grouping table live on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding one `*.json` file per template.
    pub dir: PathBuf,
    pub party_mapping_file: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            party_mapping_file: PathBuf::from("party-mapping.json"),
        }
    }
}

/// Cross-origin access for the browser front end.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `"*"`, a list, or a comma-separated string (handy in env vars).
    /// Empty blocks every cross-origin request.
    #[serde(deserialize_with = "origin_list")]
    pub allowed_origins: Vec<String>,
}

fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

impl CorsConfig {
    fn validate(&self) -> Result<(), String> {
        match self
            .allowed_origins
            .iter()
            .find(|origin| *origin != "*" && !is_http_url(origin))
        {
            Some(origin) => Err(format!(
                "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
            )),
            None => Ok(()),
        }
    }
}

/// `X-Frame-Options` value. Parsed case-insensitively, so a bad value fails
/// configuration loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameOptions {
    #[default]
    Deny,
    SameOrigin,
}

impl FrameOptions {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

impl fmt::Display for FrameOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DENY" => Ok(Self::Deny),
            "SAMEORIGIN" => Ok(Self::SameOrigin),
            _ => Err(format!(
                "security_headers.frame_options must be 'DENY' or 'SAMEORIGIN', got: '{s}'"
            )),
        }
    }
}

impl TryFrom<String> for FrameOptions {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameOptions> for String {
    fn from(value: FrameOptions) -> Self {
        value.as_str().to_string()
    }
}

/// `Strict-Transport-Security`. Off by default; only enable behind HTTPS.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HstsConfig {
    pub enabled: bool,
    pub max_age_secs: u64,
    pub include_subdomains: bool,
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_age_secs: 31_536_000,
            include_subdomains: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityHeadersConfig {
    pub enabled: bool,
    pub hsts: HstsConfig,
    pub frame_options: FrameOptions,
    pub content_security_policy: String,
    pub referrer_policy: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hsts: HstsConfig::default(),
            frame_options: FrameOptions::Deny,
            content_security_policy: "default-src 'self'".to_string(),
            referrer_policy: "strict-origin-when-cross-origin".to_string(),
        }
    }
}

/// Swagger UI at `/swagger-ui`; off unless `VOICES_SWAGGER__ENABLED=true`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

// ─── Loading ────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load from defaults, `./config.yaml` and the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] for unreadable or mistyped values (including
    /// an unknown frame option), [`ConfigError::Validation`] otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// [`Config::load`] with a different YAML file. A missing file is skipped.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }
        self.represent.validate().map_err(ConfigError::Validation)?;
        self.cors.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }
}
