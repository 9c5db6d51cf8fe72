//! Authorization rules for membership and kickpoint mutations

use std::collections::HashMap;

use crate::value_objects::{AuthRole, ClanRole, Tag};

/// Membership mutations subject to the role table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Add,
    Edit,
    Remove,
    Transfer,
}

/// Role a caller needs to perform `action`.
///
/// For add and edit `target` is the role being assigned, for remove it is
/// the member's current role. Transfers always need `Admin`.
pub fn required_role(action: MemberAction, target: Option<ClanRole>) -> AuthRole {
    if action == MemberAction::Transfer {
        return AuthRole::Admin;
    }
    match target {
        Some(ClanRole::Member | ClanRole::Elder) => AuthRole::CoLeader,
        Some(ClanRole::CoLeader) => AuthRole::Leader,
        _ => AuthRole::Admin,
    }
}

/// True iff any of the caller's roles reaches `required`
pub fn authorize(caller_roles: &[AuthRole], required: AuthRole) -> bool {
    caller_roles.iter().any(|role| *role >= required)
}

/// Everything a caller is allowed to act as
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerRoles {
    pub account_id: String,
    pub admin: bool,
    pub clan_roles: HashMap<Tag, ClanRole>,
}

impl CallerRoles {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Record a clan role, keeping the higher one if the caller has several
    /// linked players in the same clan
    pub fn with_clan_role(mut self, clan_tag: Tag, role: ClanRole) -> Self {
        self.clan_roles
            .entry(clan_tag)
            .and_modify(|existing| *existing = (*existing).max(role))
            .or_insert(role);
        self
    }

    /// Roles the caller holds in the context of `clan_tag`
    pub fn roles_in(&self, clan_tag: &Tag) -> Vec<AuthRole> {
        let mut roles = Vec::with_capacity(2);
        if self.admin {
            roles.push(AuthRole::Admin);
        }
        if let Some(role) = self.clan_roles.get(clan_tag) {
            roles.push(AuthRole::from(*role));
        }
        roles
    }

    pub fn satisfies(&self, clan_tag: &Tag, required: AuthRole) -> bool {
        authorize(&self.roles_in(clan_tag), required)
    }
}
