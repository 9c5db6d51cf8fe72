//! Service integration tests
//!
//! Drive the services over the in-memory store with a fixed clock.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use chrono::{DateTime, Duration, Utc};
use clan_core::{AuthRole, ClanRole, DomainError, SideEffect};
use clan_service::{
    AddMemberRequest, ClanService, CreateClanRequest, CreateKickpointRequest, DonatorService,
    DonatorsResponse, KickpointService, MemberService, PlayerService, ServiceError,
    SettingsService, TransferMemberRequest, UpdateKickpointRequest, UpdateMemberRequest,
    UpdateSettingsRequest, UpsertPlayerRequest,
};
use integration_tests::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn add(player_tag: &str, role: ClanRole) -> AddMemberRequest {
    AddMemberRequest {
        player_tag: player_tag.to_string(),
        role,
    }
}

fn transfer(player_tag: &str, from: &str, to: &str, role: ClanRole) -> TransferMemberRequest {
    TransferMemberRequest {
        player_tag: player_tag.to_string(),
        from_clan_tag: from.to_string(),
        to_clan_tag: to.to_string(),
        role,
    }
}

fn kickpoint(player_tag: &str, amount: i32) -> CreateKickpointRequest {
    CreateKickpointRequest {
        player_tag: player_tag.to_string(),
        amount,
        description: "missed war attack".to_string(),
        date: None,
    }
}

#[track_caller]
fn assert_missing_role(err: &ServiceError, expected: AuthRole) {
    match err.as_domain() {
        Some(DomainError::Unauthorized { required, .. }) => assert_eq!(*required, expected),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

// ============================================================================
// Membership
// ============================================================================

#[tokio::test]
async fn test_add_member_in_another_clan_fails_and_keeps_membership() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let err = MemberService::new(&ctx)
        .add_member(&tag(SECOND_CLAN), SECOND_LEADER, add(MEMBER_TAG, ClanRole::Member))
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::AlreadyMember(_))));
    let membership = world.store.membership_of(&tag(MEMBER_TAG)).unwrap();
    assert_eq!(membership.clan_tag, tag(MAIN_CLAN));
    assert_eq!(membership.role, ClanRole::Member);
}

#[tokio::test]
async fn test_add_member_twice_to_same_clan() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let err = MemberService::new(&ctx)
        .add_member(&tag(MAIN_CLAN), CO_LEADER, add(ELDER_TAG, ClanRole::Elder))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "ALREADY_MEMBER");
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_concurrent_adds_for_one_player_admit_exactly_one() {
    let world = TestWorld::seeded();
    let main_ctx = world.context();
    let second_ctx = world.context();

    let main = MemberService::new(&main_ctx);
    let second = MemberService::new(&second_ctx);
    let main_tag = tag(MAIN_CLAN);
    let second_tag = tag(SECOND_CLAN);
    let (a, b) = tokio::join!(
        main.add_member(&main_tag, LEADER, add(FREE_AGENT_TAG, ClanRole::Member)),
        second.add_member(&second_tag, SECOND_LEADER, add(FREE_AGENT_TAG, ClanRole::Member)),
    );

    assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser.unwrap_err().as_domain(),
        Some(DomainError::AlreadyMember(_))
    ));
    assert!(world.store.membership_of(&tag(FREE_AGENT_TAG)).is_some());
}

#[tokio::test]
async fn test_add_member_syncs_roles() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let outcome = MemberService::new(&ctx)
        .add_member(&tag(MAIN_CLAN), CO_LEADER, add(FREE_AGENT_TAG, ClanRole::Member))
        .await
        .unwrap();

    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.value.membership.clan_tag, MAIN_CLAN);
    assert_eq!(outcome.value.membership.added_by, CO_LEADER);
    assert_eq!(outcome.value.membership.joined_at, t0());
    assert_eq!(outcome.value.player.name, "Wanderer");

    let calls = world.roles.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].action, SideEffect::GrantClanRole);
    assert_eq!(calls[0].account_id, FREE_AGENT);
    assert_eq!(calls[0].clan_tag, Some(tag(MAIN_CLAN)));
    assert_eq!(calls[1].action, SideEffect::RevokeExMemberRole);
}

#[tokio::test]
async fn test_unlinked_player_skips_role_sync() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    MemberService::new(&ctx)
        .add_member(&tag(MAIN_CLAN), CO_LEADER, add(UNLINKED_TAG, ClanRole::Member))
        .await
        .unwrap();

    assert!(world.roles.calls().is_empty());
}

#[tokio::test]
async fn test_role_sync_failure_is_a_warning_not_an_error() {
    let world = TestWorld::seeded();
    world.roles.set_failing(true);
    let ctx = world.context();

    let outcome = MemberService::new(&ctx)
        .add_member(&tag(MAIN_CLAN), CO_LEADER, add(FREE_AGENT_TAG, ClanRole::Elder))
        .await
        .unwrap();

    assert_eq!(outcome.warnings.len(), 2);
    assert_eq!(outcome.warnings[0].action, SideEffect::GrantClanRole);
    assert_eq!(outcome.warnings[0].account_id, FREE_AGENT);
    assert!(outcome.warnings[0].reason.contains("503"));

    let membership = world.store.membership_of(&tag(FREE_AGENT_TAG)).unwrap();
    assert_eq!(membership.clan_tag, tag(MAIN_CLAN));
}

#[tokio::test]
async fn test_committed_add_and_transfer_do_not_read_back() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);
    world.store.set_member_reads_failing(true);

    let added = service
        .add_member(&tag(MAIN_CLAN), ADMIN, add(FREE_AGENT_TAG, ClanRole::Member))
        .await
        .unwrap();
    assert_eq!(added.value.membership.player_tag, FREE_AGENT_TAG);
    assert_eq!(added.value.player.name, "Wanderer");
    assert_eq!(
        world.store.membership_of(&tag(FREE_AGENT_TAG)).unwrap().clan_tag,
        tag(MAIN_CLAN)
    );

    let moved = service
        .transfer_member(ADMIN, transfer(FREE_AGENT_TAG, MAIN_CLAN, SECOND_CLAN, ClanRole::Elder))
        .await
        .unwrap();
    assert_eq!(moved.value.membership.clan_tag, SECOND_CLAN);
    assert_eq!(moved.value.membership.role, ClanRole::Elder);
    assert_eq!(
        world.store.membership_of(&tag(FREE_AGENT_TAG)).unwrap().clan_tag,
        tag(SECOND_CLAN)
    );
}

#[tokio::test]
async fn test_add_member_role_thresholds() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);
    let main = tag(MAIN_CLAN);

    // Elder cannot add anyone
    let err = service
        .add_member(&main, ELDER, add(FREE_AGENT_TAG, ClanRole::Member))
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::CoLeader);

    // Co-leader cannot add a co-leader
    let err = service
        .add_member(&main, CO_LEADER, add(FREE_AGENT_TAG, ClanRole::CoLeader))
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Leader);

    // Leader cannot add a leader
    let err = service
        .add_member(&main, LEADER, add(FREE_AGENT_TAG, ClanRole::Leader))
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Admin);

    // Leader of another clan has no authority here
    let err = service
        .add_member(&main, SECOND_LEADER, add(FREE_AGENT_TAG, ClanRole::Member))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    assert!(world.store.membership_of(&tag(FREE_AGENT_TAG)).is_none());

    service
        .add_member(&main, LEADER, add(FREE_AGENT_TAG, ClanRole::CoLeader))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_admin_can_add_leader() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let outcome = MemberService::new(&ctx)
        .add_member(&tag(SECOND_CLAN), ADMIN, add(FREE_AGENT_TAG, ClanRole::Leader))
        .await
        .unwrap();
    assert_eq!(outcome.value.membership.role, ClanRole::Leader);
}

#[tokio::test]
async fn test_add_unknown_player_or_clan() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);

    let err = service
        .add_member(&tag(MAIN_CLAN), ADMIN, add("#YYYY", ClanRole::Member))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::PlayerNotFound(_))));

    let err = service
        .add_member(&tag(UNKNOWN_CLAN), ADMIN, add(FREE_AGENT_TAG, ClanRole::Member))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ClanNotFound(_))));

    let err = service
        .add_member(&tag(MAIN_CLAN), ADMIN, add("not a tag!", ClanRole::Member))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TAG");
}

#[tokio::test]
async fn test_update_member_role() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);
    let main = tag(MAIN_CLAN);
    let elder = tag(ELDER_TAG);

    // Promotion to co-leader is checked against the new role
    let err = service
        .update_member(&main, &elder, CO_LEADER, UpdateMemberRequest { role: ClanRole::CoLeader })
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Leader);

    let err = service
        .update_member(&main, &elder, LEADER, UpdateMemberRequest { role: ClanRole::Elder })
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::RoleUnchanged(ClanRole::Elder))));

    let updated = service
        .update_member(&main, &elder, LEADER, UpdateMemberRequest { role: ClanRole::CoLeader })
        .await
        .unwrap();
    assert_eq!(updated.membership.role, ClanRole::CoLeader);
    assert_eq!(
        world.store.membership_of(&elder).unwrap().role,
        ClanRole::CoLeader
    );
}

#[tokio::test]
async fn test_remove_member() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);
    let main = tag(MAIN_CLAN);

    // Co-leader cannot remove a co-leader
    let err = service
        .remove_member(&main, &tag(CO_LEADER_TAG), CO_LEADER)
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Leader);

    let err = service
        .remove_member(&main, &tag(FREE_AGENT_TAG), ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::MemberNotFound { .. })));

    let outcome = service
        .remove_member(&main, &tag(MEMBER_TAG), CO_LEADER)
        .await
        .unwrap();
    assert!(outcome.warnings.is_empty());
    assert!(world.store.membership_of(&tag(MEMBER_TAG)).is_none());

    let actions: Vec<SideEffect> = world.roles.calls().iter().map(|c| c.action).collect();
    assert_eq!(
        actions,
        vec![SideEffect::RevokeClanRole, SideEffect::GrantExMemberRole]
    );
}

#[tokio::test]
async fn test_removal_keeps_kickpoints() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);

    KickpointService::new(&ctx)
        .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, 2))
        .await
        .unwrap();
    MemberService::new(&ctx)
        .remove_member(&main, &tag(MEMBER_TAG), LEADER)
        .await
        .unwrap();

    let summary = KickpointService::new(&ctx)
        .summary_for_player(&tag(MEMBER_TAG))
        .await
        .unwrap();
    assert_eq!(summary.active_sum, 2);
    assert_eq!(summary.lifetime_sum, 2);
}

#[tokio::test]
async fn test_current_membership() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);

    let membership = service.current_membership(&tag(ELDER_TAG)).await.unwrap();
    assert_eq!(membership.clan_tag, MAIN_CLAN);
    assert_eq!(membership.role, ClanRole::Elder);

    let err = service
        .current_membership(&tag(FREE_AGENT_TAG))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::NoActiveMembership(_))));
}

#[tokio::test]
async fn test_list_members_highest_role_first() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let members = MemberService::new(&ctx)
        .list_members(&tag(MAIN_CLAN))
        .await
        .unwrap();
    let roles: Vec<ClanRole> = members.iter().map(|m| m.membership.role).collect();
    assert_eq!(
        roles,
        vec![ClanRole::Leader, ClanRole::CoLeader, ClanRole::Elder, ClanRole::Member]
    );

    let err = MemberService::new(&ctx)
        .list_members(&tag(UNKNOWN_CLAN))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

// ============================================================================
// Transfer
// ============================================================================

#[tokio::test]
async fn test_transfer_moves_membership() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let outcome = MemberService::new(&ctx)
        .transfer_member(ADMIN, transfer(MEMBER_TAG, MAIN_CLAN, SECOND_CLAN, ClanRole::Elder))
        .await
        .unwrap();

    assert!(outcome.warnings.is_empty());
    let membership = world.store.membership_of(&tag(MEMBER_TAG)).unwrap();
    assert_eq!(membership.clan_tag, tag(SECOND_CLAN));
    assert_eq!(membership.role, ClanRole::Elder);
    assert_eq!(membership.added_by, ADMIN);

    let main_members = MemberService::new(&ctx)
        .list_members(&tag(MAIN_CLAN))
        .await
        .unwrap();
    assert!(main_members
        .iter()
        .all(|m| m.membership.player_tag != MEMBER_TAG));

    let calls = world.roles.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].action, SideEffect::RevokeClanRole);
    assert_eq!(calls[0].clan_tag, Some(tag(MAIN_CLAN)));
    assert_eq!(calls[1].action, SideEffect::GrantClanRole);
    assert_eq!(calls[1].clan_tag, Some(tag(SECOND_CLAN)));
}

#[tokio::test]
async fn test_transfer_to_unknown_clan_leaves_source_membership() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let err = MemberService::new(&ctx)
        .transfer_member(ADMIN, transfer(MEMBER_TAG, MAIN_CLAN, UNKNOWN_CLAN, ClanRole::Member))
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::ClanNotFound(_))));
    let membership = world.store.membership_of(&tag(MEMBER_TAG)).unwrap();
    assert_eq!(membership.clan_tag, tag(MAIN_CLAN));
    assert_eq!(membership.role, ClanRole::Member);
    assert!(world.roles.calls().is_empty());
}

#[tokio::test]
async fn test_transfer_from_wrong_clan() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let err = MemberService::new(&ctx)
        .transfer_member(ADMIN, transfer(SECOND_LEADER_TAG, MAIN_CLAN, SECOND_CLAN, ClanRole::Member))
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::MemberNotFound { .. })));
    let membership = world.store.membership_of(&tag(SECOND_LEADER_TAG)).unwrap();
    assert_eq!(membership.role, ClanRole::Leader);
}

#[tokio::test]
async fn test_transfer_requires_admin() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);

    let err = service
        .transfer_member(LEADER, transfer(MEMBER_TAG, MAIN_CLAN, SECOND_CLAN, ClanRole::Member))
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Admin);

    let err = service
        .transfer_member(ADMIN, transfer(MEMBER_TAG, MAIN_CLAN, MAIN_CLAN, ClanRole::Member))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::InvalidInput(_))));

    assert_eq!(
        world.store.membership_of(&tag(MEMBER_TAG)).unwrap().clan_tag,
        tag(MAIN_CLAN)
    );
}

#[tokio::test]
async fn test_interleaved_mutations_keep_one_membership_per_player() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = MemberService::new(&ctx);
    let mut rng = StdRng::seed_from_u64(7);

    let players = [MEMBER_TAG, ELDER_TAG, FREE_AGENT_TAG, UNLINKED_TAG];
    let clans = [MAIN_CLAN, SECOND_CLAN];

    for _ in 0..200 {
        let player = *players.choose(&mut rng).unwrap();
        let from = *clans.choose(&mut rng).unwrap();
        let to = if from == MAIN_CLAN { SECOND_CLAN } else { MAIN_CLAN };

        // Failures are expected; only the invariant matters
        let _ = match rng.gen_range(0..3) {
            0 => service
                .add_member(&tag(from), ADMIN, add(player, ClanRole::Member))
                .await
                .map(|_| ()),
            1 => service
                .remove_member(&tag(from), &tag(player), ADMIN)
                .await
                .map(|_| ()),
            _ => service
                .transfer_member(ADMIN, transfer(player, from, to, ClanRole::Elder))
                .await
                .map(|_| ()),
        };

        let mut listed = Vec::new();
        for clan in clans {
            listed.extend(
                service
                    .list_members(&tag(clan))
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|m| m.membership.player_tag),
            );
        }
        for player in players {
            let count = listed.iter().filter(|t| t.as_str() == player).count();
            assert!(count <= 1, "{player} is in {count} clans");
        }
    }
}

// ============================================================================
// Kickpoints
// ============================================================================

#[tokio::test]
async fn test_kickpoint_expires_after_policy_days() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);
    let player = tag(MEMBER_TAG);

    let created = service
        .create_kickpoint(&tag(MAIN_CLAN), CO_LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();
    assert_eq!(created.date, t0());
    assert_eq!(created.expires_at, t0() + Duration::days(45));
    assert_eq!(created.player_name.as_deref(), Some("Rookie"));
    assert_eq!(created.clan_name.as_deref(), Some("Lost F2P"));

    world.clock.set(t0() + Duration::days(44));
    let active = service.active_for_player(&player).await.unwrap();
    assert_eq!(active.len(), 1);

    world.clock.set(t0() + Duration::days(46));
    let err = service.active_for_player(&player).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::NoKickpoints(_))));
}

#[tokio::test]
async fn test_kickpoints_expire_independently() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);
    let main = tag(MAIN_CLAN);
    let player = tag(MEMBER_TAG);

    let first = service
        .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();
    world.clock.advance(Duration::days(10));
    let second = service
        .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, 3))
        .await
        .unwrap();
    assert_eq!(second.expires_at - first.expires_at, Duration::days(10));

    world.clock.set(t0() + Duration::days(50));
    let active = service.active_for_player(&player).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
    assert_eq!(
        service.summary_for_player(&player).await.unwrap().active_sum,
        3
    );

    world.clock.set(t0() + Duration::days(60));
    let summary = service.summary_for_player(&player).await.unwrap();
    assert_eq!(summary.active_sum, 0);
    assert_eq!(summary.lifetime_sum, 4);
}

#[tokio::test]
async fn test_settings_change_only_affects_new_kickpoints() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);
    let kickpoints = KickpointService::new(&ctx);

    let old = kickpoints
        .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();

    SettingsService::new(&ctx)
        .update_settings(
            &main,
            LEADER,
            UpdateSettingsRequest {
                kickpoint_expiry_days: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let new = kickpoints
        .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();
    assert_eq!(new.expires_at, t0() + Duration::days(10));
    assert_eq!(
        world.store.kickpoint(old.id).unwrap().expires_at,
        t0() + Duration::days(45)
    );

    // Editing the date recomputes the expiry under the current policy
    let moved = kickpoints
        .update_kickpoint(
            old.id,
            CO_LEADER,
            UpdateKickpointRequest {
                date: Some(t0() + Duration::days(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.expires_at, t0() + Duration::days(12));
    assert_eq!(moved.updated_by.as_deref(), Some(CO_LEADER));
}

#[tokio::test]
async fn test_empty_sum_is_zero_but_empty_clan_aggregate_is_not_found() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);

    let summary = service.summary_for_player(&tag(ELDER_TAG)).await.unwrap();
    assert_eq!(summary.active_sum, 0);
    assert_eq!(summary.lifetime_sum, 0);

    let err = service.active_for_clan(&tag(MAIN_CLAN)).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::NoKickpoints(_))));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_clan_aggregate_flags_ceiling_and_skips_former_members() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);
    let service = KickpointService::new(&ctx);

    for amount in [4, 2] {
        service
            .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, amount))
            .await
            .unwrap();
    }
    service
        .create_kickpoint(&main, LEADER, kickpoint(ELDER_TAG, 1))
        .await
        .unwrap();
    service
        .create_kickpoint(&main, LEADER, kickpoint(CO_LEADER_TAG, 3))
        .await
        .unwrap();
    MemberService::new(&ctx)
        .remove_member(&main, &tag(CO_LEADER_TAG), LEADER)
        .await
        .unwrap();

    let rows = service.active_for_clan(&main).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player_tag, MEMBER_TAG);
    assert_eq!(rows[0].amount, 6);
    assert!(rows[0].at_or_over_ceiling);
    assert_eq!(rows[1].player_tag, ELDER_TAG);
    assert_eq!(rows[1].amount, 1);
    assert!(!rows[1].at_or_over_ceiling);
}

#[tokio::test]
async fn test_clan_aggregate_follows_transferred_member() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);
    let second = tag(SECOND_CLAN);
    let service = KickpointService::new(&ctx);

    for amount in [4, 3] {
        service
            .create_kickpoint(&main, CO_LEADER, kickpoint(MEMBER_TAG, amount))
            .await
            .unwrap();
    }
    MemberService::new(&ctx)
        .transfer_member(ADMIN, transfer(MEMBER_TAG, MAIN_CLAN, SECOND_CLAN, ClanRole::Member))
        .await
        .unwrap();

    let rows = service.active_for_clan(&second).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_tag, MEMBER_TAG);
    assert_eq!(rows[0].amount, 7);
    assert!(rows[0].at_or_over_ceiling);

    let summary = service.summary_for_player(&tag(MEMBER_TAG)).await.unwrap();
    assert_eq!(summary.active_sum, rows[0].amount);

    let err = service.active_for_clan(&main).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_kickpoint_date_past_calendar_range_is_rejected() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);
    let last_day = DateTime::<Utc>::MAX_UTC - Duration::days(1);

    let mut request = kickpoint(MEMBER_TAG, 1);
    request.date = Some(last_day);
    let err = service
        .create_kickpoint(&tag(MAIN_CLAN), LEADER, request)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::InvalidInput(_))));
    assert_eq!(err.status_code(), 400);
    assert_eq!(world.store.kickpoint_count(), 0);

    let created = service
        .create_kickpoint(&tag(MAIN_CLAN), LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();
    let err = service
        .update_kickpoint(
            created.id,
            LEADER,
            UpdateKickpointRequest {
                date: Some(last_day),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(world.store.kickpoint(created.id).unwrap().date, t0());
}

#[tokio::test]
async fn test_create_kickpoint_checks() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);
    let service = KickpointService::new(&ctx);

    // Validation runs before authorization
    let err = service
        .create_kickpoint(&main, ELDER, kickpoint(MEMBER_TAG, 0))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::InvalidAmount(0))));

    let err = service
        .create_kickpoint(&main, ELDER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::CoLeader);

    let err = service
        .create_kickpoint(&main, LEADER, kickpoint(FREE_AGENT_TAG, 1))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::MemberNotFound { .. })));

    assert_eq!(world.store.kickpoint_count(), 0);
}

#[tokio::test]
async fn test_kickpoint_lock() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);
    let player = tag(MEMBER_TAG);
    let members = MemberService::new(&ctx);
    let kickpoints = KickpointService::new(&ctx);

    let err = members
        .set_kickpoint_lock(&main, &player, ELDER, true)
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::CoLeader);

    let lock = members
        .set_kickpoint_lock(&main, &player, CO_LEADER, true)
        .await
        .unwrap();
    assert!(lock.kickpoint_lock);

    let err = kickpoints
        .create_kickpoint(&main, LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "KICKPOINTS_LOCKED");
    assert_eq!(err.status_code(), 409);

    members
        .set_kickpoint_lock(&main, &player, CO_LEADER, false)
        .await
        .unwrap();
    kickpoints
        .create_kickpoint(&main, LEADER, kickpoint(MEMBER_TAG, 1))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_future_kickpoints() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);
    let player = tag(MEMBER_TAG);

    let mut request = kickpoint(MEMBER_TAG, 2);
    request.date = Some(t0() + Duration::days(3));
    let future = service
        .create_kickpoint(&tag(MAIN_CLAN), CO_LEADER, request)
        .await
        .unwrap();
    assert_eq!(future.expires_at, t0() + Duration::days(48));

    let listed = service.future_for_player(&player).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(service.active_for_player(&player).await.is_err());

    world.clock.advance(Duration::days(3));
    assert_eq!(service.active_for_player(&player).await.unwrap().len(), 1);
    assert!(service.future_for_player(&player).await.is_err());
}

#[tokio::test]
async fn test_update_and_delete_kickpoint() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = KickpointService::new(&ctx);

    let created = service
        .create_kickpoint(&tag(MAIN_CLAN), CO_LEADER, kickpoint(MEMBER_TAG, 2))
        .await
        .unwrap();

    let err = service
        .update_kickpoint(created.id, CO_LEADER, UpdateKickpointRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::InvalidInput(_))));

    let err = service
        .update_kickpoint(
            created.id,
            SECOND_LEADER,
            UpdateKickpointRequest {
                amount: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let updated = service
        .update_kickpoint(
            created.id,
            CO_LEADER,
            UpdateKickpointRequest {
                amount: Some(5),
                description: Some("left war early".to_string()),
                date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 5);
    assert_eq!(updated.description, "left war early");
    assert_eq!(updated.expires_at, created.expires_at);

    service.delete_kickpoint(created.id, LEADER).await.unwrap();
    let err = service.get_kickpoint(created.id).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::KickpointNotFound(_))));
}

// ============================================================================
// Registry and settings
// ============================================================================

#[tokio::test]
async fn test_registry_writes_need_admin() {
    let world = TestWorld::seeded();
    let ctx = world.context();

    let request = CreateClanRequest {
        tag: "#JJJ".to_string(),
        name: "Lost F2P 3".to_string(),
        index: 3,
    };
    let err = ClanService::new(&ctx)
        .create_clan(LEADER, request.clone())
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Admin);

    let clan = ClanService::new(&ctx)
        .create_clan(ADMIN, request.clone())
        .await
        .unwrap();
    assert_eq!(clan.tag, "#JJJ");

    let err = ClanService::new(&ctx)
        .create_clan(ADMIN, request)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ClanAlreadyExists(_))));

    let clans = ClanService::new(&ctx).list_clans().await.unwrap();
    let indexes: Vec<i32> = clans.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_upsert_player() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let service = PlayerService::new(&ctx);
    let new_tag = tag("#GGG");

    let request = UpsertPlayerRequest {
        name: "Newcomer".to_string(),
        discord_id: Some("800000000000000008".to_string()),
    };
    let err = service
        .upsert_player(&new_tag, CO_LEADER, request.clone())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = service.get_player(&new_tag).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::PlayerNotFound(_))));

    let player = service.upsert_player(&new_tag, ADMIN, request).await.unwrap();
    assert_eq!(player.name, "Newcomer");
    assert_eq!(service.get_player(&new_tag).await.unwrap().tag, "#GGG");

    let err = service
        .upsert_player(
            &new_tag,
            ADMIN,
            UpsertPlayerRequest {
                name: "Newcomer".to_string(),
                discord_id: Some("8/../../bans/8".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(
        service.get_player(&new_tag).await.unwrap().discord_id.as_deref(),
        Some("800000000000000008")
    );
}

#[tokio::test]
async fn test_settings_defaults_and_update() {
    let world = TestWorld::seeded();
    let ctx = world.context();
    let main = tag(MAIN_CLAN);

    let details = ClanService::new(&ctx).get_clan(&main).await.unwrap();
    assert_eq!(details.settings.kickpoint_ceiling, 6);
    assert_eq!(details.settings.min_season_wins, 80);
    assert_eq!(details.settings.kickpoint_expiry_days, 45);
    assert!(details.settings.updated_by.is_none());

    let service = SettingsService::new(&ctx);
    let request = UpdateSettingsRequest {
        kickpoint_ceiling: Some(8),
        ..Default::default()
    };
    let err = service
        .update_settings(&main, CO_LEADER, request.clone())
        .await
        .unwrap_err();
    assert_missing_role(&err, AuthRole::Leader);

    let settings = service.update_settings(&main, LEADER, request).await.unwrap();
    assert_eq!(settings.kickpoint_ceiling, 8);
    assert_eq!(settings.kickpoint_expiry_days, 45);
    assert_eq!(settings.updated_by.as_deref(), Some(LEADER));
    assert_eq!(settings.updated_at, Some(t0()));

    let err = service
        .update_settings(&tag(SECOND_CLAN), LEADER, UpdateSettingsRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

// ============================================================================
// Member status
// ============================================================================

#[tokio::test]
async fn test_member_status_diffs_rosters() {
    let world = TestWorld::seeded();
    world.oracle.set_clan(snapshot(
        MAIN_CLAN,
        vec![
            game_member(LEADER_TAG, "Chief", ClanRole::Leader),
            game_member(CO_LEADER_TAG, "Deputy", ClanRole::CoLeader),
            game_member(ELDER_TAG, "Veteran", ClanRole::Elder),
            game_member("#VVV", "Stranger", ClanRole::Member),
        ],
    ));
    let ctx = world.context();

    let status = MemberService::new(&ctx)
        .member_status(&tag(MAIN_CLAN))
        .await
        .unwrap();

    assert_eq!(status.missing_in_game.len(), 1);
    assert_eq!(status.missing_in_game[0].tag, MEMBER_TAG);
    assert_eq!(status.not_registered.len(), 1);
    assert_eq!(status.not_registered[0].tag, "#VVV");
}

#[tokio::test]
async fn test_member_status_upstream_down() {
    let world = TestWorld::seeded();
    world.oracle.set_down(true);
    let ctx = world.context();

    let err = MemberService::new(&ctx)
        .member_status(&tag(MAIN_CLAN))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UPSTREAM_UNAVAILABLE");
    assert_eq!(err.status_code(), 503);
}

// ============================================================================
// Donators
// ============================================================================

#[tokio::test]
async fn test_donators_for_23_positions() {
    let world = TestWorld::seeded();
    let mut roster = war_roster(23, &[2, 5, 11, 17, 21]);
    // The first opted-in participant is a stored, linked member
    roster[1].tag = tag(MEMBER_TAG);
    world.oracle.set_war_roster(tag(MAIN_CLAN), roster);
    let ctx = world.context();

    let response = DonatorService::new(&ctx)
        .select_with_rng(&tag(MAIN_CLAN), &mut StdRng::seed_from_u64(42))
        .await
        .unwrap();

    let DonatorsResponse::Assigned {
        donators,
        unassigned,
    } = response
    else {
        panic!("expected assignments");
    };
    assert!(unassigned.is_empty());

    let ranges: Vec<(usize, usize)> = donators
        .iter()
        .map(|d| (d.range.start, d.range.end))
        .collect();
    assert_eq!(ranges, vec![(1, 8), (9, 16), (17, 23)]);

    let mut tags: Vec<&str> = donators.iter().map(|d| d.tag.as_str()).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), 3);

    for donator in &donators {
        if donator.tag == MEMBER_TAG {
            assert_eq!(donator.discord_id.as_deref(), Some(MEMBER));
        } else {
            assert!(donator.discord_id.is_none());
        }
    }
}

#[tokio::test]
async fn test_donators_with_small_pool_terminate() {
    let world = TestWorld::seeded();
    world
        .oracle
        .set_war_roster(tag(MAIN_CLAN), war_roster(23, &[9]));
    let ctx = world.context();

    let response = DonatorService::new(&ctx)
        .select_with_rng(&tag(MAIN_CLAN), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    let DonatorsResponse::Assigned {
        donators,
        unassigned,
    } = response
    else {
        panic!("expected assignments");
    };
    assert_eq!(donators.len(), 1);
    assert_eq!(donators[0].map_position, 9);
    assert_eq!(unassigned.len(), 2);
}

#[tokio::test]
async fn test_donators_without_candidates() {
    let world = TestWorld::seeded();
    world
        .oracle
        .set_war_roster(tag(MAIN_CLAN), war_roster(15, &[]));
    let ctx = world.context();

    let response = DonatorService::new(&ctx).select(&tag(MAIN_CLAN)).await.unwrap();
    assert!(matches!(response, DonatorsResponse::NoCandidates { .. }));

    let err = DonatorService::new(&ctx)
        .select(&tag(UNKNOWN_CLAN))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ClanNotFound(_))));
}
