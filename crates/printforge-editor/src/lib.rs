//! # PrintForge Editor
//!
//! The document mutation engine behind the PrintForge print-design
//! editor. It sits between the UI controls and the canvas renderer:
//! a mutable scene graph of drawable objects with a consistent undo/redo
//! timeline, a hierarchical edit-lock authority, whole-template
//! replacement that preserves user content, and rotation/scale/flip-aware
//! placement math for deriving vector outlines from styled text.
//!
//! ## Core Components
//!
//! - **Registry**: the canonical, queryable object set for one page
//! - **Classification**: object kinds and template/user ownership
//! - **History**: undo/redo over opaque scene snapshots
//! - **Locks**: `user < designer < admin < system` edit authority
//! - **Templates**: library plus the five-step replacement protocol
//! - **Transform**: origin/rotation/flip placement math
//! - **Fonts/Outline**: font resolution and text vectorization
//! - **Session**: per-page orchestration with stale-result guards
//!
//! ## Architecture
//!
//! ```text
//! EditorSession (per page, lock-gated mutations, one commit per gesture)
//!   ├── SceneRegistry (objects, draw order, scene events)
//!   ├── HistoryManager (undo/redo stacks over Snapshots)
//!   ├── SnapshotCodec (capture/restore, overlay re-binding)
//!   └── FontService (resolution cache + load tracker)
//!
//! replace_template (preserve → purge → load → restore → notify)
//! ```
//!
//! The engine renders nothing and performs no network I/O; the renderer,
//! storage backend and font sources are ports it is driven through.

pub mod classify;
pub mod effects;
pub mod fonts;
pub mod history;
pub mod locks;
pub mod model;
pub mod outline;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod template;
pub mod transform;

pub use classify::{determine_object_kind, is_template_element, is_user_added_element};
pub use effects::PrintEffect;
pub use fonts::{FontResolver, FontService, FontStatus, SystemFontResolver};
pub use history::{HistoryManager, Snapshot};
pub use locks::{apply_lock, apply_unlock, can_unlock, effective_level, LockLevel};
pub use model::{
    Interactivity, LockFlags, LockInfo, ObjectKind, OriginX, OriginY, Placement, SceneObject,
};
pub use outline::{outline_text, vectorize, TextOutline};
pub use registry::SceneRegistry;
pub use session::{EditorSession, SessionGuard};
pub use snapshot::{DocumentFile, DocumentMetadata, JsonSnapshotCodec, SnapshotCodec};
pub use template::{
    replace_template, ReplacementReport, TemplateCategory, TemplateDocument, TemplateLibrary,
};
pub use transform::{derived_position, effective_scale, rendered_center, rotate_vec};
