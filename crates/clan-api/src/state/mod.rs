//! Application state
//!
//! Every handler gets the service context (repositories, oracle, role sink,
//! clock) and the loaded configuration.

use std::sync::Arc;

use clan_common::{AppConfig, JwtService};
use clan_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validates bearer tokens in the auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.services.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.config.app.env)
            .field("admins", &self.services.admins().discord_ids.len())
            .field("role_sync", &self.config.discord.is_some())
            .finish_non_exhaustive()
    }
}
