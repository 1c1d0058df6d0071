//! Lock authority hierarchy tests

use printforge_editor::locks::{apply_lock, apply_unlock, can_unlock, effective_level, is_locked};
use printforge_editor::{LockLevel, Placement, SceneObject};

fn obj() -> SceneObject {
    SceneObject::new("target", "rect", Placement::new(0.0, 0.0, 60.0, 40.0))
}

const ALL_LEVELS: [LockLevel; 4] = [
    LockLevel::User,
    LockLevel::Designer,
    LockLevel::Admin,
    LockLevel::System,
];

#[test]
fn test_capability_table_is_closed() {
    let expectations = [
        (LockLevel::User, [true, false, false, false]),
        (LockLevel::Designer, [true, true, false, false]),
        (LockLevel::Admin, [true, true, true, false]),
        (LockLevel::System, [true, true, true, false]),
    ];
    for (role, row) in expectations {
        for (level, expected) in ALL_LEVELS.iter().zip(row) {
            assert_eq!(
                can_unlock(role, *level),
                expected,
                "can_unlock({:?}, {:?})",
                role,
                level
            );
        }
    }
}

#[test]
fn test_levels_are_totally_ordered() {
    assert!(LockLevel::User < LockLevel::Designer);
    assert!(LockLevel::Designer < LockLevel::Admin);
    assert!(LockLevel::Admin < LockLevel::System);
}

#[test]
fn test_lock_sets_flags_and_withdraws_affordances() {
    let mut target = obj();
    assert!(apply_lock(
        &mut target,
        LockLevel::Designer,
        LockLevel::Designer,
        Some("template element")
    ));

    assert!(target.lock_flags.movement_x);
    assert!(target.lock_flags.movement_y);
    assert!(target.lock_flags.rotation);
    assert!(target.lock_flags.scaling_x);
    assert!(target.lock_flags.scaling_y);
    assert!(target.lock_flags.skewing_x);
    assert!(target.lock_flags.skewing_y);
    assert!(!target.interactivity.selectable);
    assert!(!target.interactivity.evented);

    let info = target.lock_info.as_ref().unwrap();
    assert!(info.is_locked);
    assert_eq!(info.level, LockLevel::Designer);
    assert_eq!(info.locked_by, Some(LockLevel::Designer));
    assert!(info.locked_at.is_some());
    assert_eq!(info.reason.as_deref(), Some("template element"));
}

#[test]
fn test_override_guard() {
    let mut target = obj();
    assert!(apply_lock(&mut target, LockLevel::Admin, LockLevel::Admin, None));

    // A user cannot replace a lock it could not remove; no mutation.
    assert!(!apply_lock(&mut target, LockLevel::User, LockLevel::User, None));
    assert_eq!(
        target.lock_info.as_ref().unwrap().level,
        LockLevel::Admin
    );

    // An admin may escalate or replace its own tier.
    assert!(apply_lock(&mut target, LockLevel::System, LockLevel::Admin, None));
    assert_eq!(
        target.lock_info.as_ref().unwrap().level,
        LockLevel::System
    );
}

#[test]
fn test_designer_lock_example_scenario() {
    let mut target = obj();
    assert!(apply_lock(
        &mut target,
        LockLevel::Designer,
        LockLevel::Designer,
        None
    ));

    assert!(!apply_unlock(&mut target, LockLevel::User, false));
    assert!(is_locked(&target));

    assert!(apply_unlock(&mut target, LockLevel::Designer, false));
    assert!(!is_locked(&target));
    let info = target.lock_info.as_ref().unwrap();
    assert!(info.reason.is_none());
    assert!(info.locked_by.is_none());
}

#[test]
fn test_system_lock_requires_force() {
    let mut target = obj();
    assert!(apply_lock(&mut target, LockLevel::System, LockLevel::System, None));

    for role in ALL_LEVELS {
        assert!(
            !apply_unlock(&mut target, role, false),
            "{:?} must not unlock system without force",
            role
        );
    }
    assert!(is_locked(&target));

    assert!(apply_unlock(&mut target, LockLevel::User, true));
    assert!(!is_locked(&target));
}

#[test]
fn test_unlock_already_unlocked_is_noop_success() {
    let mut target = obj();
    assert!(apply_unlock(&mut target, LockLevel::User, false));
    assert!(!is_locked(&target));
}

#[test]
fn test_unlock_resets_provenance() {
    let mut target = obj();
    apply_lock(
        &mut target,
        LockLevel::User,
        LockLevel::Admin,
        Some("keep out"),
    );
    assert!(apply_unlock(&mut target, LockLevel::Admin, false));

    let info = target.lock_info.as_ref().unwrap();
    assert!(!info.is_locked);
    assert_eq!(info.level, LockLevel::User);
    assert!(info.locked_by.is_none());
    assert!(info.locked_at.is_none());
    assert!(info.reason.is_none());
}

#[test]
fn test_legacy_flags_read_as_user_lock() {
    let mut target = obj();
    target.lock_flags.movement_x = true;
    assert_eq!(effective_level(&target), Some(LockLevel::User));
    assert!(is_locked(&target));

    // A user can clear a legacy lock.
    assert!(apply_unlock(&mut target, LockLevel::User, false));
    assert!(!target.lock_flags.any());
    assert!(!is_locked(&target));
}

#[test]
fn test_level_string_round_trip() {
    for level in ALL_LEVELS {
        assert_eq!(LockLevel::parse(level.as_str()), Some(level));
    }
    assert_eq!(LockLevel::parse("root"), None);
}
