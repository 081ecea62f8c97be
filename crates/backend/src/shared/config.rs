use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:3000"
    pub bind: String,
    /// Directory with the built frontend (index.html, wasm bundle, chart scripts)
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// CSV export of orders
    pub orders_csv: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"
static_dir = "dist"

[data]
orders_csv = "data/orders.csv"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolve a configured path.
///
/// Absolute paths are used as is. Relative paths are looked up next to the
/// executable first, then relative to the working directory.
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidate = exe_dir.join(path);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    PathBuf::from(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.data.orders_csv, "data/orders.csv");
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let config: Result<Config, _> = toml::from_str("[server]\nbind = \"x\"\nstatic_dir = \"y\"\n");
        assert!(config.is_err());
    }

    #[test]
    fn test_resolve_absolute_path_unchanged() {
        let absolute = std::env::temp_dir().join("orders.csv");
        let resolved = resolve_path(absolute.to_str().unwrap());
        assert_eq!(resolved, absolute);
    }

    #[test]
    fn test_resolve_missing_relative_path_falls_back_to_cwd() {
        assert_eq!(
            resolve_path("no/such/dir/orders.csv"),
            PathBuf::from("no/such/dir/orders.csv")
        );
    }
}
