//! Results of mutations whose best-effort side effects may partly fail

use serde::Serialize;

use crate::value_objects::Tag;

/// Best-effort side effect run after a committed mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    GrantClanRole,
    RevokeClanRole,
    GrantExMemberRole,
    RevokeExMemberRole,
}

/// A side effect that failed after the mutation itself succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideEffectWarning {
    pub action: SideEffect,
    pub account_id: String,
    pub clan_tag: Option<Tag>,
    pub reason: String,
}

/// A successful value plus any side-effect warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<SideEffectWarning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: SideEffectWarning) {
        self.warnings.push(warning);
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
