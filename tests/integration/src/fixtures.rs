//! Test fixtures
//!
//! A seeded world of two clans with a small roster, wired into a
//! `ServiceContext` over the in-memory fakes.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use clan_common::{AdminConfig, JwtService};
use clan_core::entities::{
    Clan, ClanMember, ClanSnapshot, ClanSnapshotMember, Player, WarParticipant, WarPreference,
};
use clan_core::{ClanRole, Tag};
use clan_service::{ServiceContext, ServiceContextBuilder};

use crate::fakes::{FakeOracle, FixedClock, InMemoryStore, RecordingRoleSink};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Global admin, not a member anywhere
pub const ADMIN: &str = "100000000000000001";
/// Leader of the main clan
pub const LEADER: &str = "200000000000000002";
/// Co-leader of the main clan
pub const CO_LEADER: &str = "300000000000000003";
/// Elder of the main clan
pub const ELDER: &str = "400000000000000004";
/// Plain member of the main clan
pub const MEMBER: &str = "500000000000000005";
/// Linked player without a clan
pub const FREE_AGENT: &str = "600000000000000006";
/// Leader of the second clan
pub const SECOND_LEADER: &str = "700000000000000007";
/// Account with no players at all
pub const OUTSIDER: &str = "900000000000000009";

pub const MAIN_CLAN: &str = "#2PP";
pub const SECOND_CLAN: &str = "#9CYG";
pub const UNKNOWN_CLAN: &str = "#QQQ";

pub const LEADER_TAG: &str = "#PY2";
pub const CO_LEADER_TAG: &str = "#QG8";
pub const ELDER_TAG: &str = "#LV9";
pub const MEMBER_TAG: &str = "#RJC";
pub const FREE_AGENT_TAG: &str = "#UUV";
pub const UNLINKED_TAG: &str = "#CC2";
pub const SECOND_LEADER_TAG: &str = "#8Y8";

/// Parse a fixture tag
pub fn tag(raw: &str) -> Tag {
    Tag::parse(raw).expect("fixture tags are valid")
}

/// Fixed start time of every test world
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Fakes plus the JWT service, shared by every context built from them
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub oracle: Arc<FakeOracle>,
    pub roles: Arc<RecordingRoleSink>,
    pub clock: Arc<FixedClock>,
    pub jwt: Arc<JwtService>,
    pub admins: AdminConfig,
}

impl TestWorld {
    /// No clans, no players; `ADMIN` is the only admin
    pub fn empty() -> Self {
        let mut admins = AdminConfig::default();
        admins.discord_ids.insert(ADMIN.to_string());

        Self {
            store: Arc::new(InMemoryStore::new()),
            oracle: Arc::new(FakeOracle::new()),
            roles: Arc::new(RecordingRoleSink::new()),
            clock: Arc::new(FixedClock::new(t0())),
            jwt: Arc::new(JwtService::new(JWT_SECRET, 900)),
            admins,
        }
    }

    /// Two clans and the fixture roster
    pub fn seeded() -> Self {
        let world = Self::empty();
        let store = &world.store;

        store.insert_clan(Clan::new(tag(MAIN_CLAN), "Lost F2P", 1));
        store.insert_clan(Clan::new(tag(SECOND_CLAN), "Lost F2P 2", 2));

        let roster = [
            (LEADER_TAG, "Chief", Some(LEADER), MAIN_CLAN, ClanRole::Leader),
            (CO_LEADER_TAG, "Deputy", Some(CO_LEADER), MAIN_CLAN, ClanRole::CoLeader),
            (ELDER_TAG, "Veteran", Some(ELDER), MAIN_CLAN, ClanRole::Elder),
            (MEMBER_TAG, "Rookie", Some(MEMBER), MAIN_CLAN, ClanRole::Member),
            (SECOND_LEADER_TAG, "Boss", Some(SECOND_LEADER), SECOND_CLAN, ClanRole::Leader),
        ];
        for (player_tag, name, account, clan_tag, role) in roster {
            world.add_player(player_tag, name, account);
            store.insert_member(ClanMember::new(tag(player_tag), tag(clan_tag), role, ADMIN, t0()));
        }

        world.add_player(FREE_AGENT_TAG, "Wanderer", Some(FREE_AGENT));
        world.add_player(UNLINKED_TAG, "Ghost", None);

        world
    }

    pub fn add_player(&self, player_tag: &str, name: &str, account: Option<&str>) {
        let mut player = Player::new(tag(player_tag), name);
        if let Some(account) = account {
            player = player.with_discord_id(account);
        }
        self.store.insert_player(player);
    }

    /// A fresh context over the shared fakes
    pub fn context(&self) -> ServiceContext {
        ServiceContextBuilder::new()
            .player_repo(self.store.clone())
            .clan_repo(self.store.clone())
            .settings_repo(self.store.clone())
            .member_repo(self.store.clone())
            .kickpoint_repo(self.store.clone())
            .member_state_repo(self.store.clone())
            .health_check(self.store.clone())
            .oracle(self.oracle.clone())
            .role_sink(self.roles.clone())
            .clock(self.clock.clone())
            .jwt_service(self.jwt.clone())
            .admins(self.admins.clone())
            .build()
            .expect("all dependencies are set")
    }

    /// Bearer token for `account_id`
    pub fn token(&self, account_id: &str) -> String {
        self.jwt
            .issue_access_token(account_id)
            .expect("token can be issued")
    }
}

/// In-game roster entry
pub fn game_member(player_tag: &str, name: &str, role: ClanRole) -> ClanSnapshotMember {
    ClanSnapshotMember {
        tag: tag(player_tag),
        name: name.to_string(),
        role,
    }
}

/// In-game clan
pub fn snapshot(clan_tag: &str, members: Vec<ClanSnapshotMember>) -> ClanSnapshot {
    ClanSnapshot {
        tag: tag(clan_tag),
        name: "Lost F2P".to_string(),
        members,
    }
}

/// War roster of `size` participants at positions 1..=size.
///
/// `opted_in` lists the positions whose players opted into war. Tags are
/// generated from the tag alphabet.
pub fn war_roster(size: usize, opted_in: &[usize]) -> Vec<WarParticipant> {
    const ALPHABET: &[u8] = b"0289PYLQGRJCUV";

    (1..=size)
        .map(|position| {
            let hi = ALPHABET[position / ALPHABET.len() % ALPHABET.len()] as char;
            let lo = ALPHABET[position % ALPHABET.len()] as char;
            WarParticipant {
                tag: tag(&format!("#YY{hi}{lo}")),
                name: format!("War {position}"),
                war_preference: if opted_in.contains(&position) {
                    WarPreference::In
                } else {
                    WarPreference::Out
                },
                map_position: position as i32,
            }
        })
        .collect()
}
