//! Application configuration module / Módulo de configuração
//!
//! Manages configuration loaded from config.json.
//! Creates a default config file on first run.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Global configuration instance / Instância global
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream REST API configuration / API remota
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the FATEC data API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Base URL with any trailing slash removed
    pub fn api_base(&self) -> String {
        self.api.base_url.trim_end_matches('/').to_string()
    }
}

/// Get the config file path / Caminho do arquivo de configuração
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create a default one if not exists.
///
/// The `FATEC_API_URL` environment variable overrides the file value.
pub fn load_config() -> Result<AppConfig, String> {
    let config_path = get_config_path();

    let mut config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        config
    } else {
        let config = AppConfig::default();
        save_config(&config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        config
    };

    if let Ok(base_url) = std::env::var("FATEC_API_URL") {
        tracing::info!("FATEC_API_URL set, overriding api.base_url");
        config.api.base_url = base_url;
    }

    Url::parse(&config.api.base_url)
        .map_err(|e| format!("Invalid api.base_url {:?}: {}", config.api.base_url, e))?;

    Ok(config)
}

/// Save configuration to file / Salvar configuração
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Initialize the global config / Inicializar configuração global
pub fn init_config(config: AppConfig) {
    let _ = CONFIG.set(config);
}

/// Get the global config, falling back to defaults if never initialized
pub fn get_config() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}
