//! Object classification rules.
//!
//! Two independent classifications run over the same object:
//! - `determine_object_kind`: which kind of drawable this is (priority
//!   ordered, always resolves, `shape` is the safe default)
//! - `is_template_element` / `is_user_added_element`: whether the object
//!   belongs to the active template or to the user
//!
//! The id-substring checks (`fixed`, `floating`, `background_rect_`) are a
//! compatibility requirement carried over from existing saved documents;
//! their outcomes must not change.

use printforge_core::constants::RESERVED_TEMPLATE_IDS;

use crate::model::{ObjectKind, SceneObject};

/// Role tags that mark an object as template-owned.
pub const TEMPLATE_EXTENSION_TYPES: [&str; 6] = [
    "template-element",
    "printguide",
    "guideline",
    "overlay",
    "background",
    "outline",
];

const TEXT_TYPES: [&str; 3] = ["text", "i-text", "textbox"];
const PATH_TYPES: [&str; 2] = ["path", "path-group"];

/// Classifies an object into its drawable kind.
///
/// Priority order matters: an object exposing a non-empty `text` field is
/// text even when its type name says otherwise, and an unrecognized type
/// name falls through to `shape` rather than failing.
pub fn determine_object_kind(obj: &SceneObject) -> ObjectKind {
    let type_name = obj.type_name.as_str();

    if type_name == "group" {
        return ObjectKind::Group;
    }

    let has_text = obj.text.as_deref().is_some_and(|t| !t.is_empty());
    if TEXT_TYPES.contains(&type_name) || has_text {
        return ObjectKind::Text;
    }

    if type_name == "image" {
        return ObjectKind::Image;
    }

    if PATH_TYPES.contains(&type_name) {
        return ObjectKind::Path;
    }

    // Vector-import tools emit empty clip rectangles: zero extent, no paint.
    if type_name == "rect"
        && (obj.placement.width == 0.0 || obj.placement.height == 0.0)
        && obj.fill.as_deref().unwrap_or("").is_empty()
        && obj.stroke.as_deref().unwrap_or("").is_empty()
    {
        return ObjectKind::ClipPath;
    }

    ObjectKind::Shape
}

/// True if the object is owned by the active template.
pub fn is_template_element(obj: &SceneObject) -> bool {
    if let Some(ext) = obj.extension_type.as_deref() {
        if TEMPLATE_EXTENSION_TYPES.contains(&ext) {
            return true;
        }
    }

    let id = obj.id.as_str();
    if RESERVED_TEMPLATE_IDS.contains(&id) {
        return true;
    }
    if id.contains("fixed") || id.contains("floating") || id.starts_with("background_rect_") {
        return true;
    }

    obj.exclude_from_export
}

/// True if the object is user content, preserved verbatim across template
/// swaps. An explicit `is_user_added` always wins; an unset one falls back
/// to template classification.
pub fn is_user_added_element(obj: &SceneObject) -> bool {
    match obj.is_user_added {
        Some(true) => true,
        Some(false) => false,
        None => !is_template_element(obj),
    }
}

/// Writes the ownership tri-state exactly once. Later calls never
/// overwrite the first decision, even if the object's role tag changes.
pub fn mark_ownership(obj: &mut SceneObject) {
    if obj.is_user_added.is_none() {
        obj.is_user_added = Some(!is_template_element(obj));
    }
}
