//! Service context - dependency container for services
//!
//! Holds all repositories, collaborators, and other dependencies needed by services.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clan_common::auth::JwtService;
use clan_common::AdminConfig;
use clan_core::traits::{
    ClanRepository, ClanSettingsRepository, Clock, GameDataOracle, HealthCheck,
    KickpointRepository, MemberRepository, MemberStateRepository, PlayerRepository, RoleSink,
    SystemClock,
};

use crate::clients::NoopRoleSink;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Store repositories and the store health check
/// - The game-data oracle and the chat role sink
/// - The clock every time-dependent rule reads
/// - JWT validation and the configured admin accounts
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    player_repo: Arc<dyn PlayerRepository>,
    clan_repo: Arc<dyn ClanRepository>,
    settings_repo: Arc<dyn ClanSettingsRepository>,
    member_repo: Arc<dyn MemberRepository>,
    kickpoint_repo: Arc<dyn KickpointRepository>,
    member_state_repo: Arc<dyn MemberStateRepository>,
    health_check: Arc<dyn HealthCheck>,

    // Collaborators
    oracle: Arc<dyn GameDataOracle>,
    role_sink: Arc<dyn RoleSink>,
    clock: Arc<dyn Clock>,

    // Auth
    jwt_service: Arc<JwtService>,
    admins: Arc<AdminConfig>,
}

impl ServiceContext {
    /// Get the player repository
    pub fn player_repo(&self) -> &dyn PlayerRepository {
        self.player_repo.as_ref()
    }

    /// Get the clan repository
    pub fn clan_repo(&self) -> &dyn ClanRepository {
        self.clan_repo.as_ref()
    }

    /// Get the clan settings repository
    pub fn settings_repo(&self) -> &dyn ClanSettingsRepository {
        self.settings_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the kickpoint repository
    pub fn kickpoint_repo(&self) -> &dyn KickpointRepository {
        self.kickpoint_repo.as_ref()
    }

    /// Get the member state repository
    pub fn member_state_repo(&self) -> &dyn MemberStateRepository {
        self.member_state_repo.as_ref()
    }

    pub fn health_check(&self) -> &dyn HealthCheck {
        self.health_check.as_ref()
    }

    pub fn oracle(&self) -> &dyn GameDataOracle {
        self.oracle.as_ref()
    }

    pub fn role_sink(&self) -> &dyn RoleSink {
        self.role_sink.as_ref()
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn admins(&self) -> &AdminConfig {
        self.admins.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("collaborators", &"...")
            .field("admins", &self.admins.discord_ids.len())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The clock defaults to [`SystemClock`], the role sink to [`NoopRoleSink`]
/// and the admin list to empty.
#[derive(Default)]
pub struct ServiceContextBuilder {
    player_repo: Option<Arc<dyn PlayerRepository>>,
    clan_repo: Option<Arc<dyn ClanRepository>>,
    settings_repo: Option<Arc<dyn ClanSettingsRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    kickpoint_repo: Option<Arc<dyn KickpointRepository>>,
    member_state_repo: Option<Arc<dyn MemberStateRepository>>,
    health_check: Option<Arc<dyn HealthCheck>>,
    oracle: Option<Arc<dyn GameDataOracle>>,
    role_sink: Option<Arc<dyn RoleSink>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
    admins: Option<AdminConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_repo(mut self, repo: Arc<dyn PlayerRepository>) -> Self {
        self.player_repo = Some(repo);
        self
    }

    pub fn clan_repo(mut self, repo: Arc<dyn ClanRepository>) -> Self {
        self.clan_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn ClanSettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn kickpoint_repo(mut self, repo: Arc<dyn KickpointRepository>) -> Self {
        self.kickpoint_repo = Some(repo);
        self
    }

    pub fn member_state_repo(mut self, repo: Arc<dyn MemberStateRepository>) -> Self {
        self.member_state_repo = Some(repo);
        self
    }

    pub fn health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_check = Some(check);
        self
    }

    pub fn oracle(mut self, oracle: Arc<dyn GameDataOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn role_sink(mut self, sink: Arc<dyn RoleSink>) -> Self {
        self.role_sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn admins(mut self, admins: AdminConfig) -> Self {
        self.admins = Some(admins);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            player_repo: self
                .player_repo
                .ok_or_else(|| ServiceError::validation("player_repo is required"))?,
            clan_repo: self
                .clan_repo
                .ok_or_else(|| ServiceError::validation("clan_repo is required"))?,
            settings_repo: self
                .settings_repo
                .ok_or_else(|| ServiceError::validation("settings_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            kickpoint_repo: self
                .kickpoint_repo
                .ok_or_else(|| ServiceError::validation("kickpoint_repo is required"))?,
            member_state_repo: self
                .member_state_repo
                .ok_or_else(|| ServiceError::validation("member_state_repo is required"))?,
            health_check: self
                .health_check
                .ok_or_else(|| ServiceError::validation("health_check is required"))?,
            oracle: self
                .oracle
                .ok_or_else(|| ServiceError::validation("oracle is required"))?,
            role_sink: self.role_sink.unwrap_or_else(|| Arc::new(NoopRoleSink)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            admins: Arc::new(self.admins.unwrap_or_default()),
        })
    }
}
