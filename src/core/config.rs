use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub model: ModelConfig,
}

/// Local blob-store configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,
}

/// Hosted model API configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// API key; when absent the assistant is disabled and every call
    /// fails synchronously with a service-unavailable error
    pub api_key: Option<String>,
    /// Base URL of the generateContent-style REST API
    pub base_url: String,
    /// Model identifier
    pub model_name: String,
    /// Sampling temperature for structured requests
    pub temperature: f32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            storage: StorageConfig::from_env()?,
            model: ModelConfig::from_env()?,
        })
    }
}

impl StorageConfig {
    const DEFAULT_DATA_DIR: &'static str = ".fixfirst";

    pub fn from_env() -> Result<Self, String> {
        let data_dir = env::var("FIXFIRST_DATA_DIR")
            .unwrap_or_else(|_| Self::DEFAULT_DATA_DIR.to_string());

        if data_dir.trim().is_empty() {
            return Err("FIXFIRST_DATA_DIR must not be empty".to_string());
        }

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
        })
    }
}

impl ModelConfig {
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    const DEFAULT_MODEL_NAME: &'static str = "gemini-2.5-flash";
    const DEFAULT_TEMPERATURE: f32 = 0.4;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        // Only treat a non-empty value as a configured key
        let api_key = env::var("MODEL_API_KEY").ok().filter(|s| !s.is_empty());

        let base_url =
            env::var("MODEL_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let model_name =
            env::var("MODEL_NAME").unwrap_or_else(|_| Self::DEFAULT_MODEL_NAME.to_string());

        let temperature = env::var("MODEL_TEMPERATURE")
            .unwrap_or_else(|_| Self::DEFAULT_TEMPERATURE.to_string())
            .parse::<f32>()
            .map_err(|_| "MODEL_TEMPERATURE must be a valid number".to_string())?;

        let request_timeout_secs = env::var("MODEL_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MODEL_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            base_url,
            model_name,
            temperature,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Whether the assistant can issue requests at all
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
