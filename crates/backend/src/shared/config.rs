use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Файл, из которого прочитана конфигурация (`None`: встроенная)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Пустая строка: секрет генерируется при запуске
    #[serde(default)]
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Пароль администратора, создаваемого при пустой таблице employee
    pub bootstrap_admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,sqlx=warn,sea_orm=warn".into(),
            dir: "target/logs".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
path = "target/db/backoffice.db"

[auth]
jwt_secret = ""
token_ttl_hours = 2
bootstrap_admin_password = "123456"

[logging]
filter = "info,sqlx=warn,sea_orm=warn"
dir = "target/logs"
"#;

pub const CONFIG_ENV: &str = "BACKOFFICE_CONFIG";

/// Верхняя граница срока жизни токена (1 год)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

/// Load configuration
///
/// Search order:
/// 1. Path from `BACKOFFICE_CONFIG`
/// 2. `config.toml` in the current directory
/// 3. `config.toml` next to the executable
/// 4. Embedded default config
///
/// Runs before tracing is initialized, so nothing is logged here;
/// the chosen file is kept in [`Config::source`].
pub fn load_config() -> anyhow::Result<Config> {
    match candidate_paths().into_iter().find(|path| path.exists()) {
        Some(path) => parse_file(&path),
        None => parse(DEFAULT_CONFIG),
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("config.toml"));
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    paths
}

fn parse_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config =
        parse(&contents).with_context(|| format!("Invalid config {}", path.display()))?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

fn parse(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    let ttl = config.auth.token_ttl_hours;
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&ttl) {
        anyhow::bail!(
            "auth.token_ttl_hours must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_HOURS,
            ttl
        );
    }
    Ok(config)
}

/// Get the database file path from configuration
/// Relative paths are resolved against the current directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(db_path))
}
