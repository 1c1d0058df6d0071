//! Hierarchical edit-lock authority.
//!
//! Decides whether a mutation to a given object is allowed and applies the
//! interactive consequences of locking. Decisions are synchronous and
//! total: every call returns a definite boolean, never an error.
//!
//! The unlock-capability table is closed rather than derived from the
//! level ordering, so the exact behavior of existing documents is kept.
//! Unlocking drops `locked_by` and `reason` entirely instead of retaining
//! unlock provenance; that is a known audit-trail gap, kept for
//! compatibility.

use serde::{Deserialize, Serialize};

use crate::model::{Interactivity, LockFlags, LockInfo, SceneObject};

/// Edit authority level, totally ordered `user < designer < admin <
/// system`. Doubles as the acting role of a caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum LockLevel {
    #[default]
    User,
    Designer,
    Admin,
    System,
}

impl LockLevel {
    /// Get level as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LockLevel::User => "user",
            LockLevel::Designer => "designer",
            LockLevel::Admin => "admin",
            LockLevel::System => "system",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(LockLevel::User),
            "designer" => Some(LockLevel::Designer),
            "admin" => Some(LockLevel::Admin),
            "system" => Some(LockLevel::System),
            _ => None,
        }
    }
}

/// The closed unlock-capability table. A `system` lock is not removable by
/// any role; `apply_unlock` with `force` is the only way past it.
pub fn can_unlock(role: LockLevel, level: LockLevel) -> bool {
    match role {
        LockLevel::User => matches!(level, LockLevel::User),
        LockLevel::Designer => matches!(level, LockLevel::User | LockLevel::Designer),
        LockLevel::Admin | LockLevel::System => matches!(
            level,
            LockLevel::User | LockLevel::Designer | LockLevel::Admin
        ),
    }
}

/// The level an object is currently locked at, if any.
///
/// Objects mutated outside this authority (older saved documents) may
/// carry lock flags without `lock_info`; those read as a `user` lock.
pub fn effective_level(obj: &SceneObject) -> Option<LockLevel> {
    match &obj.lock_info {
        Some(info) if info.is_locked => Some(info.level),
        Some(_) => None,
        None if obj.lock_flags.any() => Some(LockLevel::User),
        None => None,
    }
}

/// True if the object is locked at any level.
pub fn is_locked(obj: &SceneObject) -> bool {
    effective_level(obj).is_some()
}

/// Locks an object at `level` on behalf of `acting`.
///
/// A role may only escalate or replace a lock it could itself remove: if
/// the object already carries a lock outside the acting role's table row,
/// the call fails with no mutation. On success all seven lock flags are
/// set, interaction affordances are withdrawn, and fresh lock metadata is
/// written.
pub fn apply_lock(
    obj: &mut SceneObject,
    level: LockLevel,
    acting: LockLevel,
    reason: Option<&str>,
) -> bool {
    if let Some(current) = effective_level(obj) {
        if !can_unlock(acting, current) {
            tracing::warn!(
                id = %obj.id,
                current = current.as_str(),
                acting = acting.as_str(),
                "lock refused: object already locked above acting role"
            );
            return false;
        }
    }

    obj.lock_flags = LockFlags::all();
    obj.interactivity = Interactivity::locked();
    obj.lock_info = Some(LockInfo {
        is_locked: true,
        level,
        locked_by: Some(acting),
        locked_at: Some(chrono::Utc::now()),
        reason: reason.map(str::to_string),
    });
    tracing::debug!(id = %obj.id, level = level.as_str(), "object locked");
    true
}

/// Unlocks an object on behalf of `acting`.
///
/// Already-unlocked objects are a no-op success. Without `force`, a
/// `system` lock never comes off and other levels follow the capability
/// table. On success the seven flags are cleared, affordances restored,
/// and lock metadata reset to the canonical unlocked state.
pub fn apply_unlock(obj: &mut SceneObject, acting: LockLevel, force: bool) -> bool {
    let Some(current) = effective_level(obj) else {
        return true;
    };

    if !force {
        if current == LockLevel::System {
            tracing::warn!(id = %obj.id, "unlock refused: system lock requires force");
            return false;
        }
        if !can_unlock(acting, current) {
            tracing::warn!(
                id = %obj.id,
                current = current.as_str(),
                acting = acting.as_str(),
                "unlock refused by capability table"
            );
            return false;
        }
    }

    obj.lock_flags = LockFlags::default();
    obj.interactivity = Interactivity::default();
    obj.lock_info = Some(LockInfo::unlocked());
    tracing::debug!(id = %obj.id, "object unlocked");
    true
}
