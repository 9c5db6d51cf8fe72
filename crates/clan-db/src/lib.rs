//! # clan-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `clan-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clan_db::pool::{create_pool, default_migrations_dir, run_migrations, DatabaseConfig};
//! use clan_db::repositories::PgMemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, &default_migrations_dir()).await?;
//!     let members = PgMemberRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, default_migrations_dir, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgClanRepository, PgClanSettingsRepository, PgHealthCheck, PgKickpointRepository,
    PgMemberRepository, PgMemberStateRepository, PgPlayerRepository,
};
