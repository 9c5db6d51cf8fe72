//! Database connection pool management and schema migrations

mod postgres;

pub use postgres::{create_pool, default_migrations_dir, run_migrations, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
