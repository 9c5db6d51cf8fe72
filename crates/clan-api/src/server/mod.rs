//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use clan_common::{AppConfig, AppError, JwtService};
use clan_core::traits::RoleSink;
use clan_db::{
    create_pool, run_migrations, PgClanRepository, PgClanSettingsRepository, PgHealthCheck,
    PgKickpointRepository, PgMemberRepository, PgMemberStateRepository, PgPlayerRepository,
};
use clan_service::{ClashApiClient, DiscordRoleSink, NoopRoleSink, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the basic stack and stay outside the rate limiter.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = clan_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool, &db_config.migrations_dir)
        .await
        .map_err(|e| {
            AppError::Database(format!(
                "migrations in {}: {e}",
                db_config.migrations_dir.display()
            ))
        })?;
    info!("PostgreSQL connection established");

    let oracle = ClashApiClient::new(&config.clash_api)
        .map_err(|e| AppError::Config(format!("game data client: {e}")))?;

    let role_sink: Arc<dyn RoleSink> = match &config.discord {
        Some(discord) => {
            info!(clans = discord.clan_roles.len(), "Role sync enabled");
            Arc::new(
                DiscordRoleSink::new(discord)
                    .map_err(|e| AppError::Config(format!("role sink client: {e}")))?,
            )
        }
        None => {
            info!("Role sync disabled");
            Arc::new(NoopRoleSink)
        }
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .player_repo(Arc::new(PgPlayerRepository::new(pool.clone())))
        .clan_repo(Arc::new(PgClanRepository::new(pool.clone())))
        .settings_repo(Arc::new(PgClanSettingsRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .kickpoint_repo(Arc::new(PgKickpointRepository::new(pool.clone())))
        .member_state_repo(Arc::new(PgMemberStateRepository::new(pool.clone())))
        .health_check(Arc::new(PgHealthCheck::new(pool)))
        .oracle(Arc::new(oracle))
        .role_sink(role_sink)
        .jwt_service(jwt_service)
        .admins(config.admins.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await
}
