use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub tmdb: TmdbConfig,

    pub store: StoreConfig,

    pub appwrite: AppwriteConfig,

    pub search: SearchConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// v4 read access token, sent as a bearer credential.
    pub api_token: String,

    pub base_url: String,

    /// Prefix joined with `poster_path` to build poster URLs.
    pub image_base_url: String,

    pub request_timeout_seconds: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Appwrite,
    #[default]
    Sqlite,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "appwrite" => Ok(Self::Appwrite),
            "sqlite" => Ok(Self::Sqlite),
            other => anyhow::bail!("Unknown store backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Only used by the sqlite backend.
    pub database_path: String,

    pub trending_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_path: "sqlite:data/reelfinder.db".to_string(),
            trending_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppwriteConfig {
    pub endpoint: String,

    pub project_id: String,

    pub database_id: String,

    pub collection_id: String,

    /// Server API key. Optional: the collection grants read/write to anyone.
    pub api_key: Option<String>,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,

    pub max_results_displayed: usize,

    pub cards_per_row: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            max_results_displayed: 20,
            cards_per_row: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Credentials and store identifiers may come from the environment (or `.env`).
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(token) = lookup("TMDB_API_KEY") {
            self.tmdb.api_token = token;
        }
        if let Some(endpoint) = lookup("APPWRITE_ENDPOINT") {
            self.appwrite.endpoint = endpoint;
        }
        if let Some(project_id) = lookup("APPWRITE_PROJECT_ID") {
            self.appwrite.project_id = project_id;
        }
        if let Some(database_id) = lookup("APPWRITE_DATABASE_ID") {
            self.appwrite.database_id = database_id;
        }
        if let Some(collection_id) = lookup("APPWRITE_COLLECTION_ID") {
            self.appwrite.collection_id = collection_id;
        }
        if let Some(api_key) = lookup("APPWRITE_API_KEY") {
            self.appwrite.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Some(backend) = lookup("REELFINDER_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("reelfinder").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".reelfinder").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.debounce_ms == 0 {
            anyhow::bail!("search.debounce_ms must be > 0");
        }

        if self.store.trending_limit == 0 {
            anyhow::bail!("store.trending_limit must be > 0");
        }

        url::Url::parse(&self.tmdb.base_url).context("Invalid tmdb.base_url")?;
        url::Url::parse(&self.tmdb.image_base_url).context("Invalid tmdb.image_base_url")?;

        if self.store.backend == StoreBackend::Appwrite {
            url::Url::parse(&self.appwrite.endpoint).context("Invalid appwrite.endpoint")?;

            if self.appwrite.project_id.is_empty()
                || self.appwrite.database_id.is_empty()
                || self.appwrite.collection_id.is_empty()
            {
                anyhow::bail!(
                    "Appwrite backend requires project_id, database_id and collection_id"
                );
            }
        }

        Ok(())
    }

    /// Commands that talk to TMDB need a token; `trending` and `init` do not.
    pub fn validate_tmdb(&self) -> Result<()> {
        if self.tmdb.api_token.trim().is_empty() {
            anyhow::bail!("TMDB API token is missing. Set tmdb.api_token or TMDB_API_KEY");
        }
        Ok(())
    }
}
