//! Template replacement protocol tests

use printforge_editor::effects::{apply_effect, overlay_id, PrintEffect};
use printforge_editor::locks::apply_lock;
use printforge_editor::template::replace_template;
use printforge_editor::{
    HistoryManager, JsonSnapshotCodec, LockLevel, Placement, SceneObject, SceneRegistry,
    SnapshotCodec, TemplateCategory, TemplateDocument,
};

fn template_object(id: &str) -> SceneObject {
    SceneObject::new(id, "rect", Placement::new(0.0, 0.0, 20.0, 20.0))
        .with_extension_type("template-element")
}

fn seeded_registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry.add(SceneObject::rect(
        "workspace",
        "#ffffff",
        Placement::new(0.0, 0.0, 1200.0, 600.0),
    ));
    registry.add(template_object("old_fixed_banner"));
    registry.add(
        SceneObject::new("page-outline", "rect", Placement::new(0.0, 0.0, 1200.0, 600.0))
            .with_extension_type("printguide"),
    );
    registry
}

fn user_object() -> SceneObject {
    let mut placement = Placement::new(100.0, 200.0, 80.0, 60.0);
    placement.scale_x = 1.5;
    placement.angle = 45.0;
    SceneObject::text("headline", "Hello", placement)
}

fn new_template() -> TemplateDocument {
    TemplateDocument::new(
        "spine-02".to_string(),
        "Spine".to_string(),
        TemplateCategory::Spine,
        vec![
            template_object("new_fixed_banner"),
            SceneObject::new(
                "template-background",
                "rect",
                Placement::new(0.0, 0.0, 1200.0, 600.0),
            ),
        ],
    )
}

fn engine(registry: &SceneRegistry) -> (HistoryManager, JsonSnapshotCodec) {
    let codec = JsonSnapshotCodec::new("test-doc");
    let history = HistoryManager::new(codec.capture(registry).unwrap());
    (history, codec)
}

#[test]
fn test_replacement_preserves_user_geometry() {
    let mut registry = seeded_registry();
    registry.add(user_object());
    let (mut history, codec) = engine(&registry);

    let report = replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();

    assert_eq!(report.preserved, 1);
    let restored = registry.get("headline").unwrap();
    assert_eq!(restored.placement.left, 100.0);
    assert_eq!(restored.placement.top, 200.0);
    assert_eq!(restored.placement.scale_x, 1.5);
    assert_eq!(restored.placement.angle, 45.0);
}

#[test]
fn test_workspace_survives_replacement() {
    let mut registry = seeded_registry();
    let (mut history, codec) = engine(&registry);

    assert!(registry.contains("workspace"));
    replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();
    assert!(registry.contains("workspace"));
}

#[test]
fn test_old_template_objects_are_purged() {
    let mut registry = seeded_registry();
    let (mut history, codec) = engine(&registry);

    let report = replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();

    assert!(!registry.contains("old_fixed_banner"));
    assert!(!registry.contains("page-outline"));
    assert!(registry.contains("new_fixed_banner"));
    assert!(registry.contains("template-background"));
    assert_eq!(report.purged, 2);
    assert_eq!(report.loaded, 2);
}

#[test]
fn test_transient_role_tag_never_purges_user_content() {
    let mut registry = seeded_registry();
    let mut tagged = user_object().with_extension_type("template-element");
    tagged.is_user_added = Some(true);
    registry.add(tagged);
    let (mut history, codec) = engine(&registry);

    replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();

    let kept = registry.get("headline").unwrap();
    assert_eq!(kept.placement.left, 100.0);
    assert_eq!(kept.placement.angle, 45.0);
}

#[test]
fn test_foreign_lock_is_not_silently_overridden() {
    let mut registry = seeded_registry();
    {
        let banner = registry.get_mut("old_fixed_banner").unwrap();
        apply_lock(banner, LockLevel::Admin, LockLevel::Admin, None);
    }
    let (mut history, codec) = engine(&registry);

    // A user-level replacement cannot remove the admin-locked element.
    let report = replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::User,
    )
    .unwrap();
    assert_eq!(report.skipped_locked, 1);
    assert!(registry.contains("old_fixed_banner"));

    // An admin-level replacement may.
    let report = replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();
    assert_eq!(report.skipped_locked, 0);
    assert!(!registry.contains("old_fixed_banner"));
}

#[test]
fn test_replacement_is_one_undoable_unit() {
    let mut registry = seeded_registry();
    registry.add(user_object());
    let (mut history, codec) = engine(&registry);

    replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();
    assert_eq!(history.undo_depth(), 1);

    // One undo returns the complete pre-replacement scene.
    assert!(history.undo_with(|snapshot| {
        codec.restore(&mut registry, snapshot).unwrap();
    }));
    assert!(registry.contains("old_fixed_banner"));
    assert!(registry.contains("page-outline"));
    assert!(!registry.contains("new_fixed_banner"));
    assert!(registry.contains("workspace"));
}

#[test]
fn test_preserved_effects_keep_their_overlays() {
    let mut registry = seeded_registry();
    registry.add(user_object());
    apply_effect(&mut registry, "headline", PrintEffect::Gold);
    let (mut history, codec) = engine(&registry);

    replace_template(
        &mut registry,
        &mut history,
        &codec,
        &new_template(),
        LockLevel::Admin,
    )
    .unwrap();

    let owner = registry.get("headline").unwrap().placement;
    let overlay = registry
        .get(&overlay_id("headline", PrintEffect::Gold))
        .expect("overlay re-derived after replacement");
    assert_eq!(overlay.placement, owner);
}
