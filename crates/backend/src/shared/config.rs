use contracts::usecases::u101_bulk_import::{DEFAULT_MAX_FILE_BYTES, DEFAULT_MAX_ROWS};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

/// Ограничения CSV импорта (u101). Backend проверяет их сам,
/// frontend только показывает пользователю.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_rows: default_max_rows(),
        }
    }
}

fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[import]
max_file_bytes = 5242880
max_rows = 1000
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
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.import.max_rows == 0 {
        anyhow::bail!("import.max_rows must be greater than zero");
    }
    Ok(config)
}

static IMPORT_CONFIG: OnceCell<ImportConfig> = OnceCell::new();

/// Запомнить ограничения импорта при старте (повторный вызов игнорируется)
pub fn init_import_config(import: ImportConfig) {
    let _ = IMPORT_CONFIG.set(import);
}

/// Ограничения импорта; до инициализации действуют значения по умолчанию
pub fn import_config() -> ImportConfig {
    IMPORT_CONFIG.get().copied().unwrap_or_default()
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import, ImportConfig::default());
        assert_eq!(config.import.max_file_bytes, 5 * 1024 * 1024);
        assert_eq!(config.import.max_rows, 1000);
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config("[database]\npath = \"/tmp/app.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import.max_rows, 1000);
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/app.db")
        );
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        let toml = "[database]\npath = \"a.db\"\n[import]\nmax_rows = 0\n";
        assert!(parse_config(toml).is_err());
    }
}
