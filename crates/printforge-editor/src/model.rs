//! Scene object model: the drawable unit every other component reads and
//! writes, plus its placement and lock metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify;
use crate::locks::LockLevel;

/// Classified object kind, determined once from the renderer-facing type
/// name and field shape. See `classify::determine_object_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Group,
    Text,
    Image,
    Path,
    Shape,
    ClipPath,
}

impl ObjectKind {
    /// Get kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Group => "group",
            ObjectKind::Text => "text",
            ObjectKind::Image => "image",
            ObjectKind::Path => "path",
            ObjectKind::Shape => "shape",
            ObjectKind::ClipPath => "clip-path",
        }
    }
}

/// Horizontal origin anchor of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical origin anchor of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

fn default_scale() -> f64 {
    1.0
}

/// Transform attributes of a scene object: where it sits and how it is
/// scaled, rotated, flipped and skewed. `left`/`top` are the coordinates
/// of the origin point, not of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub origin_x: OriginX,
    #[serde(default)]
    pub origin_y: OriginY,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    /// Rotation in degrees, clockwise-positive.
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
    #[serde(default)]
    pub skew_x: f64,
    #[serde(default)]
    pub skew_y: f64,
}

impl Placement {
    /// Creates a left/top-anchored placement with no rotation or scaling.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            flip_x: false,
            flip_y: false,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

/// The seven per-axis lock flags the renderer honors on a locked object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFlags {
    #[serde(default)]
    pub movement_x: bool,
    #[serde(default)]
    pub movement_y: bool,
    #[serde(default)]
    pub rotation: bool,
    #[serde(default)]
    pub scaling_x: bool,
    #[serde(default)]
    pub scaling_y: bool,
    #[serde(default)]
    pub skewing_x: bool,
    #[serde(default)]
    pub skewing_y: bool,
}

impl LockFlags {
    /// All seven flags set.
    pub fn all() -> Self {
        Self {
            movement_x: true,
            movement_y: true,
            rotation: true,
            scaling_x: true,
            scaling_y: true,
            skewing_x: true,
            skewing_y: true,
        }
    }

    /// True if any flag is set.
    pub fn any(&self) -> bool {
        self.movement_x
            || self.movement_y
            || self.rotation
            || self.scaling_x
            || self.scaling_y
            || self.skewing_x
            || self.skewing_y
    }
}

/// Lock metadata written by the lock authority.
///
/// Unlocking resets this to `LockInfo::unlocked()`, dropping `locked_by`
/// and `reason` so stale lock provenance never leaks into the unlocked
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    pub is_locked: bool,
    pub level: LockLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_by: Option<LockLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LockInfo {
    /// The canonical unlocked state.
    pub fn unlocked() -> Self {
        Self {
            is_locked: false,
            level: LockLevel::User,
            locked_by: None,
            locked_at: None,
            reason: None,
        }
    }
}

/// Interaction affordances the renderer honors for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactivity {
    pub selectable: bool,
    pub evented: bool,
    pub has_controls: bool,
    pub has_borders: bool,
}

impl Default for Interactivity {
    fn default() -> Self {
        Self {
            selectable: true,
            evented: true,
            has_controls: true,
            has_borders: true,
        }
    }
}

impl Interactivity {
    /// Affordances of a locked object: invisible to selection and events.
    pub fn locked() -> Self {
        Self {
            selectable: false,
            evented: false,
            has_controls: false,
            has_borders: false,
        }
    }
}

/// A drawable unit on one page. The field set mirrors what the renderer
/// round-trips; `kind` is classified once at construction and the
/// ownership tri-state is written once on first registry encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Stable id, unique within a page.
    pub id: String,
    /// Renderer-facing type name ("textbox", "image", "rect", ...).
    pub type_name: String,
    /// Classified kind, derived from `type_name` and field shape.
    pub kind: ObjectKind,
    /// Free-form role tag (template-element, printguide, overlay, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_type: Option<String>,
    /// Ownership tri-state: `None` until first classified by the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_user_added: Option<bool>,
    #[serde(default)]
    pub exclude_from_export: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Image source URL, for `image` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// SVG path data, for `path` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_data: Option<String>,
    /// Applied special-print-effect names, in application order. Each owns
    /// exactly one overlay object keyed `{id}_{effect}`.
    #[serde(default)]
    pub effects: Vec<String>,
    pub placement: Placement,
    #[serde(default)]
    pub interactivity: Interactivity,
    #[serde(default)]
    pub lock_flags: LockFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_info: Option<LockInfo>,
}

impl SceneObject {
    /// Creates an object of the given renderer type and classifies it.
    pub fn new(id: impl Into<String>, type_name: impl Into<String>, placement: Placement) -> Self {
        let mut obj = Self {
            id: id.into(),
            type_name: type_name.into(),
            kind: ObjectKind::Shape,
            extension_type: None,
            is_user_added: None,
            exclude_from_export: false,
            text: None,
            font_family: None,
            font_size: None,
            fill: None,
            stroke: None,
            src: None,
            path_data: None,
            effects: Vec::new(),
            placement,
            interactivity: Interactivity::default(),
            lock_flags: LockFlags::default(),
            lock_info: None,
        };
        obj.kind = classify::determine_object_kind(&obj);
        obj
    }

    /// Creates a text object.
    pub fn text(id: impl Into<String>, content: impl Into<String>, placement: Placement) -> Self {
        let mut obj = Self::new(id, "textbox", placement);
        obj.text = Some(content.into());
        obj.font_size = Some(16.0);
        obj.kind = classify::determine_object_kind(&obj);
        obj
    }

    /// Creates an image object referencing an uploaded source.
    pub fn image(id: impl Into<String>, src: impl Into<String>, placement: Placement) -> Self {
        let mut obj = Self::new(id, "image", placement);
        obj.src = Some(src.into());
        obj
    }

    /// Creates a path object from SVG path data.
    pub fn path(id: impl Into<String>, data: impl Into<String>, placement: Placement) -> Self {
        let mut obj = Self::new(id, "path", placement);
        obj.path_data = Some(data.into());
        obj
    }

    /// Creates a filled rectangle.
    pub fn rect(id: impl Into<String>, fill: impl Into<String>, placement: Placement) -> Self {
        let mut obj = Self::new(id, "rect", placement);
        obj.fill = Some(fill.into());
        obj.kind = classify::determine_object_kind(&obj);
        obj
    }

    /// Sets the role tag. The tag affects template ownership, not the
    /// drawable kind.
    pub fn with_extension_type(mut self, extension_type: impl Into<String>) -> Self {
        self.extension_type = Some(extension_type.into());
        self
    }

    /// True if the effect is currently applied.
    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.iter().any(|e| e == effect)
    }
}
