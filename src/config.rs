use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://sign.mt";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "TRANSLATE_API_URL";
const ENV_PREFIX: &str = "SIGN_TRANSLATE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub limits: LimitsConfig,
}

/// Remote translation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Input limits applied before anything is sent upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_file_size: u64,
    pub max_text_length: usize,
    pub video_formats: Vec<String>,
    pub image_formats: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 12400,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024,
            max_text_length: 500,
            video_formats: ["mp4", "avi", "mov", "wmv", "webm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            image_formats: ["jpg", "jpeg", "png", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LimitsConfig {
    /// Whether `extension` is an accepted video or image format (case-insensitive).
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let ext = extension.to_lowercase();
        self.video_formats
            .iter()
            .chain(self.image_formats.iter())
            .any(|f| f.eq_ignore_ascii_case(&ext))
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Layers, lowest first: built-in defaults, the optional file at `path`,
    /// `SIGN_TRANSLATE__*` variables, then `TRANSLATE_API_URL`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::resolve(path, std::env::var(API_URL_ENV).ok())
    }

    /// Same layering as [`Config::load`] with the base URL override passed in.
    pub fn resolve(
        path: Option<&str>,
        api_url_override: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            let required = Path::new(path).exists();
            builder = builder.add_source(config::File::with_name(path).required(required));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("limits.video_formats")
                    .with_list_parse_key("limits.image_formats")
                    .try_parsing(true),
            )
            .set_override_option(
                "api.base_url",
                api_url_override.filter(|url| !url.trim().is_empty()),
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
