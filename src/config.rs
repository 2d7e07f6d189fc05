//! Configuration management for the AlchemyLanguage client.
//!
//! Supports configuration via CLI arguments, environment variables,
//! and JSON configuration files with sensible defaults.

use crate::endpoint::TextType;
use crate::error::{AlchemyError, Result};
use crate::params::{ContentSource, DEFAULT_URL_PLACEHOLDER};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://gateway-a.watsonplatform.net/calls";

/// CLI arguments for the `alchemy` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "alchemy",
    version,
    about = "Command-line client for the AlchemyLanguage text analysis API",
    after_help = "EXAMPLES:\n    \
        alchemy language --text \"Bonjour le monde\"\n    \
        alchemy entities --url https://example.com/article\n    \
        alchemy sentiment --text \"I love Paris\" --targets Paris\n    \
        alchemy text --url https://example.com --mode title"
)]
pub struct Args {
    /// AlchemyAPI key
    #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Service base URL
    #[arg(long, env = "ALCHEMY_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, env = "ALCHEMY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to a configuration file (JSON)
    #[arg(short, long, env = "ALCHEMY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, env = "ALCHEMY_VERBOSE")]
    pub verbose: bool,

    /// Output logs as JSON
    #[arg(long, env = "ALCHEMY_JSON_LOGS")]
    pub json_logs: bool,

    /// Analysis to run
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// One CLI subcommand per operation.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract named entities
    Entities(SourceArgs),
    /// Analyze document or targeted sentiment
    Sentiment {
        #[command(flatten)]
        source: SourceArgs,
        /// `|`-separated phrases for targeted sentiment
        #[arg(long)]
        targets: Option<String>,
    },
    /// Extract ranked keywords
    Keywords(SourceArgs),
    /// Tag concepts
    Concepts(SourceArgs),
    /// Extract subject-action-object relations
    Relations(SourceArgs),
    /// Classify into the taxonomy
    Taxonomy(SourceArgs),
    /// Extract page authors
    Authors(SourceArgs),
    /// Detect the language
    Language(SourceArgs),
    /// Extract page text or title
    Text {
        #[command(flatten)]
        source: SourceArgs,
        /// What to extract
        #[arg(long, value_enum, default_value_t = TextMode::Normal)]
        mode: TextMode,
    },
    /// Parse microformats
    Microformats(SourceArgs),
    /// Detect RSS/ATOM feed links
    Feeds(SourceArgs),
}

/// Exactly one content source per call.
#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// HTML document to analyze
    #[arg(long)]
    pub html: Option<String>,

    /// URL to analyze
    #[arg(long)]
    pub url: Option<String>,

    /// Plain text to analyze
    #[arg(long)]
    pub text: Option<String>,
}

impl SourceArgs {
    /// Turn the flags into a content source.
    pub fn into_source(self) -> Result<ContentSource> {
        match (self.html, self.url, self.text) {
            (Some(html), None, None) => Ok(ContentSource::Html(html)),
            (None, Some(url), None) => Ok(ContentSource::Url(url)),
            (None, None, Some(text)) => Ok(ContentSource::Text(text)),
            _ => Err(AlchemyError::InvalidConfig(
                "exactly one of --html, --url or --text is required".to_string(),
            )),
        }
    }
}

/// CLI spelling of [`TextType`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Cleaned page text
    Normal,
    /// All page text
    Raw,
    /// Page title
    Title,
}

impl From<TextMode> for TextType {
    fn from(mode: TextMode) -> Self {
        match mode {
            TextMode::Normal => TextType::Normal,
            TextMode::Raw => TextType::Raw,
            TextMode::Title => TextType::Title,
        }
    }
}

/// HTTP basic authentication credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Full client configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// AlchemyAPI key, sent as `apikey` with every call.
    pub api_key: String,

    /// Service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request settings.
    #[serde(default)]
    pub request: RequestConfig,

    /// Optional HTTP basic authentication.
    #[serde(default)]
    pub credentials: Option<Credentials>,

    /// `url` sent by microformats and feed detection when the caller
    /// supplies none. `None` leaves the key out.
    #[serde(default = "default_url_placeholder")]
    pub detection_url_placeholder: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request", &self.request)
            .field("credentials", &self.credentials)
            .field("detection_url_placeholder", &self.detection_url_placeholder)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_url_placeholder() -> Option<String> {
    Some(DEFAULT_URL_PLACEHOLDER.to_string())
}

/// Request-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Request timeout.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("alchemy-language/{}", crate::VERSION)
}

impl Config {
    /// Configuration for `api_key` with every other setting defaulted.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            request: RequestConfig::default(),
            credentials: None,
            detection_url_placeholder: default_url_placeholder(),
        }
    }

    /// Point the client at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AlchemyError::ConfigFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|e| AlchemyError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `ALCHEMY_API_KEY` and `ALCHEMY_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALCHEMY_API_KEY").map_err(|_| {
            AlchemyError::InvalidConfig("ALCHEMY_API_KEY is not set".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("ALCHEMY_BASE_URL") {
            config.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config {
            Self::from_file(config_path)?
        } else {
            let api_key = args.api_key.clone().ok_or_else(|| {
                AlchemyError::InvalidConfig(
                    "an API key is required (--api-key or ALCHEMY_API_KEY)".to_string(),
                )
            })?;
            Self::new(api_key)
        };

        // Explicit CLI values win over the file
        if let Some(api_key) = &args.api_key {
            config.api_key.clone_from(api_key);
        }
        if let Some(base_url) = &args.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(timeout) = args.timeout {
            config.request.timeout = Duration::from_secs(timeout);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AlchemyError::InvalidConfig(
                "API key cannot be empty".to_string(),
            ));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AlchemyError::InvalidConfig(format!(
                "base URL must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.request.timeout.is_zero() {
            return Err(AlchemyError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Custom serde module for humantime Duration parsing.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Supports "30s", "100ms", or just seconds as number
        if let Some(ms) = s.strip_suffix("ms") {
            ms.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(serde::de::Error::custom)
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(serde::de::Error::custom)
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request.timeout, Duration::from_secs(30));
        assert_eq!(config.detection_url_placeholder.as_deref(), Some("test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(Config::new("  ").validate().is_err());
        assert!(Config::new("key").with_base_url("ftp://x").validate().is_err());

        let mut config = Config::new("key");
        config.request.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "api_key": "file-key",
                "base_url": "http://localhost:9000/calls",
                "request": {{"timeout": "250ms"}},
                "detection_url_placeholder": null
            }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.base_url, "http://localhost:9000/calls");
        assert_eq!(config.request.timeout, Duration::from_millis(250));
        assert!(config.request.user_agent.starts_with("alchemy-language/"));
        assert_eq!(config.detection_url_placeholder, None);
    }

    #[test]
    fn test_from_file_errors() {
        let err = Config::from_file(Path::new("/nonexistent/alchemy.json")).unwrap_err();
        assert!(matches!(err, AlchemyError::ConfigFileRead { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AlchemyError::ConfigParse { .. }));
    }

    #[test]
    fn test_from_args_overrides() {
        let args = Args::parse_from([
            "alchemy",
            "--api-key",
            "cli-key",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout",
            "5",
            "language",
            "--text",
            "hello",
        ]);

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_source_args_are_exclusive() {
        let result = Args::try_parse_from([
            "alchemy", "--api-key", "k", "entities", "--text", "a", "--url", "http://b",
        ]);
        assert!(result.is_err());

        let result = Args::try_parse_from(["alchemy", "--api-key", "k", "entities"]);
        assert!(result.is_err());

        let args =
            Args::try_parse_from(["alchemy", "--api-key", "k", "feeds", "--url", "http://b"])
                .unwrap();
        let Command::Feeds(source) = args.command else {
            panic!("expected feeds subcommand");
        };
        assert_eq!(source.into_source().unwrap(), ContentSource::url("http://b"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let mut config = Config::new("very-secret-key");
        config.credentials = Some(Credentials {
            username: "user".to_string(),
            password: "hunter2".to_string(),
        });

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("user"));
    }

    #[test]
    fn test_duration_roundtrip_formats() {
        let json = serde_json::to_value(RequestConfig {
            timeout: Duration::from_millis(1500),
            user_agent: "ua".to_string(),
        })
        .unwrap();
        assert_eq!(json["timeout"], "1500ms");
    }
}
