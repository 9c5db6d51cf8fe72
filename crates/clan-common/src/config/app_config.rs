//! Application configuration structs
//!
//! Loads configuration from environment variables, after reading a `.env`
//! file if one is present.

use clan_core::Tag;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub admins: AdminConfig,
    pub clash_api: ClashApiConfig,
    pub discord: Option<DiscordConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Per-statement timeout applied to every pooled connection
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
    /// SQL migrations applied at startup; the source tree's directory if unset
    #[serde(default)]
    pub migrations_dir: Option<PathBuf>,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Accounts that hold the global admin role
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub discord_ids: HashSet<String>,
}

impl AdminConfig {
    #[must_use]
    pub fn is_admin(&self, account_id: &str) -> bool {
        self.discord_ids.contains(account_id)
    }
}

/// Game data API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClashApiConfig {
    #[serde(default = "default_clash_api_url")]
    pub base_url: String,
    pub token: String,
    #[serde(default = "default_clash_api_timeout")]
    pub timeout_secs: u64,
    /// Outbound request budget shared by every call to the API
    #[serde(default = "default_clash_api_requests_per_second")]
    pub requests_per_second: u32,
}

/// Chat-platform role sync configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    pub guild_id: String,
    /// Chat role id per clan
    #[serde(default)]
    pub clan_roles: HashMap<Tag, String>,
    pub ex_member_role_id: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "clan-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_statement_timeout_ms() -> u64 {
    5000
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_clash_api_url() -> String {
    "https://api.clashofclans.com/v1".to_string()
}

fn default_clash_api_timeout() -> u64 {
    10
}

fn default_clash_api_requests_per_second() -> u32 {
    20
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Split a comma separated list, dropping empty entries
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `#TAG=roleId,#TAG=roleId`
fn parse_clan_roles(raw: &str) -> Result<HashMap<Tag, String>, ConfigError> {
    split_list(raw)
        .map(|entry| {
            let (tag, role) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidValue("DISCORD_CLAN_ROLES", entry.to_string()))?;
            let tag = Tag::parse(tag)
                .map_err(|_| ConfigError::InvalidValue("DISCORD_CLAN_ROLES", entry.to_string()))?;
            Ok((tag, role.trim().to_string()))
        })
        .collect()
}

/// A set, non-blank path
fn parse_dir(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn optional_parsed<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or a
    /// value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let discord = match env::var("DISCORD_BOT_TOKEN") {
            Ok(bot_token) if !bot_token.trim().is_empty() => Some(DiscordConfig {
                bot_token,
                guild_id: required("DISCORD_GUILD_ID")?,
                clan_roles: env::var("DISCORD_CLAN_ROLES")
                    .ok()
                    .map(|raw| parse_clan_roles(&raw))
                    .transpose()?
                    .unwrap_or_default(),
                ex_member_role_id: env::var("DISCORD_EX_MEMBER_ROLE_ID")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            }),
            _ => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: optional_parsed("APP_ENV")?.unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: optional_parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: optional_parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: optional_parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                statement_timeout_ms: optional_parsed("DATABASE_STATEMENT_TIMEOUT_MS")?
                    .unwrap_or_else(default_statement_timeout_ms),
                migrations_dir: parse_dir(env::var("DATABASE_MIGRATIONS_DIR").ok()),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: optional_parsed("JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_access_token_expiry),
            },
            admins: AdminConfig {
                discord_ids: env::var("ADMIN_DISCORD_IDS")
                    .map(|raw| split_list(&raw).map(String::from).collect())
                    .unwrap_or_default(),
            },
            clash_api: ClashApiConfig {
                base_url: env::var("CLASH_API_URL").unwrap_or_else(|_| default_clash_api_url()),
                token: required("CLASH_API_TOKEN")?,
                timeout_secs: optional_parsed("CLASH_API_TIMEOUT_SECS")?
                    .unwrap_or_else(default_clash_api_timeout),
                requests_per_second: optional_parsed("CLASH_API_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_clash_api_requests_per_second),
            },
            discord,
            rate_limit: RateLimitConfig {
                requests_per_second: optional_parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: optional_parsed("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|raw| split_list(&raw).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
