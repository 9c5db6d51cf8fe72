//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ClashApiConfig, ConfigError, CorsConfig, DatabaseConfig,
    DiscordConfig, Environment, JwtConfig, RateLimitConfig, ServerConfig,
};
