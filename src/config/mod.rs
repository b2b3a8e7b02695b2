//! Environment-backed configuration.
//!
//! Credentials and the profile store endpoint are required and checked once at
//! startup. Everything else has a default; override with `SPEAKERMATCH_*`
//! environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBEDDING_MIN_DIM, DEFAULT_EMBEDDING_TIMEOUT, DEFAULT_HYDRATE_TIMEOUT,
    DEFAULT_LLM_TIMEOUT, DEFAULT_PROFILE_TIMEOUT, DEFAULT_SEARCH_TIMEOUT,
};

/// Default embedding endpoint (OpenAI-compatible `/embeddings`).
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1/embeddings";
/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Default chat-completion endpoint (OpenAI-compatible).
pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default re-ranking model.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Per-call budgets for each external round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Requester's own profile lookup.
    pub profile: Duration,
    /// Embedding provider call.
    pub embedding: Duration,
    /// Similarity-search procedure call.
    pub search: Duration,
    /// Batched candidate lookup.
    pub hydrate: Duration,
    /// Chat-completion call.
    pub llm: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE_TIMEOUT,
            embedding: DEFAULT_EMBEDDING_TIMEOUT,
            search: DEFAULT_SEARCH_TIMEOUT,
            hydrate: DEFAULT_HYDRATE_TIMEOUT,
            llm: DEFAULT_LLM_TIMEOUT,
        }
    }
}

/// Profile store (REST) connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint, e.g. `https://db.example.com/rest/v1`.
    pub url: String,
    /// Service credential sent as `apikey` and bearer token.
    pub api_key: String,
}

/// Embedding provider settings.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub url: String,
    pub api_key: String,
    pub model: String,
    /// Minimum accepted vector length (`D_min`).
    pub min_dim: usize,
}

/// Chat-completion provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub url: String,
    pub api_key: String,
    pub model: String,
}

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SPEAKERMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    pub store: StoreConfig,

    pub embedding: EmbeddingConfig,

    pub llm: LlmConfig,

    pub timeouts: Timeouts,
}

impl Config {
    const ENV_PORT: &'static str = "SPEAKERMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "SPEAKERMATCH_BIND_ADDR";
    const ENV_STORE_URL: &'static str = "SPEAKERMATCH_STORE_URL";
    const ENV_STORE_API_KEY: &'static str = "SPEAKERMATCH_STORE_API_KEY";
    const ENV_EMBEDDING_URL: &'static str = "SPEAKERMATCH_EMBEDDING_URL";
    const ENV_EMBEDDING_API_KEY: &'static str = "SPEAKERMATCH_EMBEDDING_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "SPEAKERMATCH_EMBEDDING_MODEL";
    const ENV_EMBEDDING_MIN_DIM: &'static str = "SPEAKERMATCH_EMBEDDING_MIN_DIM";
    const ENV_LLM_URL: &'static str = "SPEAKERMATCH_LLM_URL";
    const ENV_LLM_API_KEY: &'static str = "SPEAKERMATCH_LLM_API_KEY";
    const ENV_LLM_MODEL: &'static str = "SPEAKERMATCH_LLM_MODEL";
    const ENV_PROFILE_TIMEOUT_MS: &'static str = "SPEAKERMATCH_PROFILE_TIMEOUT_MS";
    const ENV_EMBEDDING_TIMEOUT_MS: &'static str = "SPEAKERMATCH_EMBEDDING_TIMEOUT_MS";
    const ENV_SEARCH_TIMEOUT_MS: &'static str = "SPEAKERMATCH_SEARCH_TIMEOUT_MS";
    const ENV_HYDRATE_TIMEOUT_MS: &'static str = "SPEAKERMATCH_HYDRATE_TIMEOUT_MS";
    const ENV_LLM_TIMEOUT_MS: &'static str = "SPEAKERMATCH_LLM_TIMEOUT_MS";

    /// Loads configuration from environment variables.
    ///
    /// Fails on the first missing credential or malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Timeouts::default();

        let port = Self::parse_port_from_env(8080)?;
        let bind_addr = Self::parse_bind_addr_from_env(IpAddr::V4(std::net::Ipv4Addr::new(
            127, 0, 0, 1,
        )))?;

        let store = StoreConfig {
            url: Self::required_from_env(Self::ENV_STORE_URL)?,
            api_key: Self::required_from_env(Self::ENV_STORE_API_KEY)?,
        };

        let embedding = EmbeddingConfig {
            url: Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, DEFAULT_EMBEDDING_URL),
            api_key: Self::required_from_env(Self::ENV_EMBEDDING_API_KEY)?,
            model: Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, DEFAULT_EMBEDDING_MODEL),
            min_dim: Self::parse_u64_from_env(
                Self::ENV_EMBEDDING_MIN_DIM,
                DEFAULT_EMBEDDING_MIN_DIM as u64,
            )? as usize,
        };

        let llm = LlmConfig {
            url: Self::parse_string_from_env(Self::ENV_LLM_URL, DEFAULT_LLM_URL),
            api_key: Self::required_from_env(Self::ENV_LLM_API_KEY)?,
            model: Self::parse_string_from_env(Self::ENV_LLM_MODEL, DEFAULT_LLM_MODEL),
        };

        let timeouts = Timeouts {
            profile: Self::parse_millis_from_env(Self::ENV_PROFILE_TIMEOUT_MS, defaults.profile)?,
            embedding: Self::parse_millis_from_env(
                Self::ENV_EMBEDDING_TIMEOUT_MS,
                defaults.embedding,
            )?,
            search: Self::parse_millis_from_env(Self::ENV_SEARCH_TIMEOUT_MS, defaults.search)?,
            hydrate: Self::parse_millis_from_env(Self::ENV_HYDRATE_TIMEOUT_MS, defaults.hydrate)?,
            llm: Self::parse_millis_from_env(Self::ENV_LLM_TIMEOUT_MS, defaults.llm)?,
        };

        Ok(Self {
            port,
            bind_addr,
            store,
            embedding,
            llm,
            timeouts,
        })
    }

    /// Validates URLs, budgets and the embedding floor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_url(Self::ENV_STORE_URL, &self.store.url)?;
        Self::validate_url(Self::ENV_EMBEDDING_URL, &self.embedding.url)?;
        Self::validate_url(Self::ENV_LLM_URL, &self.llm.url)?;

        if self.embedding.min_dim == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_EMBEDDING_MIN_DIM,
            });
        }

        let budgets = [
            (Self::ENV_PROFILE_TIMEOUT_MS, self.timeouts.profile),
            (Self::ENV_EMBEDDING_TIMEOUT_MS, self.timeouts.embedding),
            (Self::ENV_SEARCH_TIMEOUT_MS, self.timeouts.search),
            (Self::ENV_HYDRATE_TIMEOUT_MS, self.timeouts.hydrate),
            (Self::ENV_LLM_TIMEOUT_MS, self.timeouts.llm),
        ];
        for (name, budget) in budgets {
            if budget.is_zero() {
                return Err(ConfigError::ZeroValue { name });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
        match reqwest::Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::InvalidUrl {
                name,
                value: value.to_string(),
            }),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn required_from_env(var_name: &'static str) -> Result<String, ConfigError> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn parse_string_from_env(var_name: &str, default: &str) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        let millis = Self::parse_u64_from_env(var_name, default.as_millis() as u64)?;
        Ok(Duration::from_millis(millis))
    }
}
