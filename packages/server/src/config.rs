use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. `["*"]` (the default) is fully permissive.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Reported by `/api/health`, nothing else keys off it.
    pub environment: String,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime: bare seconds ("604800") or a duration like "7d",
    /// "12h", "30m", "45s". Unparseable values fall back to 7 days.
    pub jwt_expire: String,
}

/// Bootstrap owner account, created on startup if missing.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_video_bytes: usize,
    pub max_thumbnail_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub profile_ttl_secs: u64,
    /// Zero disables the video detail cache.
    pub video_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub admin: Option<AdminConfig>,
    pub uploads: UploadConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.environment", "development")?
            .set_default("server.cors.allow_origins", vec!["*".to_string()])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.jwt_expire", "7d")?
            .set_default("uploads.max_video_bytes", 500 * 1024 * 1024)?
            .set_default("uploads.max_thumbnail_bytes", 10 * 1024 * 1024)?
            .set_default("cache.profile_ttl_secs", 300)?
            .set_default("cache.video_ttl_secs", 0)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., RUZMOVIE__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("RUZMOVIE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
