//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddMemberRequest, CreateClanRequest, CreateKickpointRequest, TransferMemberRequest,
    UpdateKickpointRequest, UpdateMemberRequest, UpdateSettingsRequest, UpsertPlayerRequest,
};

pub use responses::{
    ClanDetailsResponse, ClanKickpointsResponse, ClanResponse, DonatorRangeResponse,
    DonatorResponse, DonatorsResponse, GameMemberResponse, HealthChecks, HealthResponse,
    KickpointLockResponse, KickpointResponse, KickpointSummaryResponse, MemberResponse,
    MemberStatusResponse, MembershipResponse, MutationResponse, PlayerResponse,
    ReadinessResponse, SettingsResponse,
};

pub use mappers::NO_DONATOR_CANDIDATES;
