//! Event type definitions for the event bus.
//!
//! Events are organized by category and designed to be cloneable and
//! serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for all engine events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Scene graph mutations
    Scene(SceneEvent),
    /// Undo/redo timeline changes
    History(HistoryEvent),
    /// Template library and replacement events
    Template(TemplateEvent),
    /// Font loading events
    Font(FontEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Template(_) => EventCategory::Template,
            AppEvent::Font(_) => EventCategory::Font,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Scene(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Template(e) => e.description(),
            AppEvent::Font(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Scene graph mutation events.
    Scene,
    /// Undo/redo timeline events.
    History,
    /// Template events.
    Template,
    /// Font loading events.
    Font,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Template => write!(f, "Template"),
            EventCategory::Font => write!(f, "Font"),
        }
    }
}

/// Scene graph mutation events, mirroring the renderer's notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// An object entered the registry.
    ObjectAdded {
        /// Id of the added object.
        id: String,
    },
    /// An object left the registry.
    ObjectRemoved {
        /// Id of the removed object.
        id: String,
    },
    /// An object's attributes changed in place.
    ObjectModified {
        /// Id of the modified object.
        id: String,
    },
    /// The scene should be repainted.
    RenderRequested,
}

impl SceneEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            SceneEvent::ObjectAdded { id } => format!("object added: {}", id),
            SceneEvent::ObjectRemoved { id } => format!("object removed: {}", id),
            SceneEvent::ObjectModified { id } => format!("object modified: {}", id),
            SceneEvent::RenderRequested => "render requested".to_string(),
        }
    }
}

/// Undo/redo timeline events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A new state was committed.
    StatePushed {
        /// Depth of the undo stack after the push.
        undo_depth: usize,
    },
    /// An undo transition completed.
    Undone {
        /// Remaining undo depth.
        undo_depth: usize,
        /// Redo depth after the transition.
        redo_depth: usize,
    },
    /// A redo transition completed.
    Redone {
        /// Undo depth after the transition.
        undo_depth: usize,
        /// Remaining redo depth.
        redo_depth: usize,
    },
    /// Both stacks were emptied after a bulk load.
    Cleared,
}

impl HistoryEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            HistoryEvent::StatePushed { undo_depth } => {
                format!("state pushed (undo depth {})", undo_depth)
            }
            HistoryEvent::Undone { undo_depth, .. } => {
                format!("undone (undo depth {})", undo_depth)
            }
            HistoryEvent::Redone { redo_depth, .. } => {
                format!("redone (redo depth {})", redo_depth)
            }
            HistoryEvent::Cleared => "history cleared".to_string(),
        }
    }
}

/// Template library and replacement events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateEvent {
    /// A template replacement completed; dependent UI should refresh.
    Replaced {
        /// Id of the template that was swapped in.
        template_id: String,
        /// How many user objects kept their placement.
        preserved: usize,
    },
    /// A template could not be loaded; the scene was left intact.
    LoadFailed {
        /// Id of the template that failed.
        template_id: String,
        /// Why the load failed.
        reason: String,
    },
}

impl TemplateEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            TemplateEvent::Replaced {
                template_id,
                preserved,
            } => format!(
                "template replaced: {} ({} user objects preserved)",
                template_id, preserved
            ),
            TemplateEvent::LoadFailed {
                template_id,
                reason,
            } => format!("template load failed: {} ({})", template_id, reason),
        }
    }
}

/// Font loading events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FontEvent {
    /// The family resolved and is ready for layout.
    Loaded {
        /// The font family name.
        family: String,
    },
    /// The family could not be resolved.
    Failed {
        /// The font family name.
        family: String,
    },
}

impl FontEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            FontEvent::Loaded { family } => format!("font loaded: {}", family),
            FontEvent::Failed { family } => format!("font failed: {}", family),
        }
    }
}
