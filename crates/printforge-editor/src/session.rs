//! Editing session: one page, one registry, one timeline.
//!
//! The session is the orchestration layer the UI controls talk to. It is
//! the place where user-initiated mutations consult the lock authority,
//! where each completed gesture commits exactly one history snapshot, and
//! where results of asynchronous work are checked against the session id
//! so rapid re-initialization never lets a stale result land.

use std::sync::Arc;
use uuid::Uuid;

use printforge_core::constants::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH, WORKSPACE_ID};
use printforge_core::{Result, TemplateError};

use crate::effects::{self, PrintEffect};
use crate::fonts::FontService;
use crate::history::HistoryManager;
use crate::locks::{self, LockLevel};
use crate::model::{ObjectKind, Placement, SceneObject};
use crate::registry::SceneRegistry;
use crate::snapshot::{DocumentFile, JsonSnapshotCodec, SnapshotCodec};
use crate::template::{replace_template, ReplacementReport, TemplateDocument};

/// Token tying an asynchronous result to the session it started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionGuard {
    id: Uuid,
}

/// Editing session for one page/canvas.
pub struct EditorSession {
    id: Uuid,
    pub registry: SceneRegistry,
    pub history: HistoryManager,
    codec: JsonSnapshotCodec,
    fonts: Arc<FontService>,
    role: LockLevel,
}

fn workspace_anchor() -> SceneObject {
    let mut workspace = SceneObject::rect(
        WORKSPACE_ID,
        "#ffffff",
        Placement::new(0.0, 0.0, DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT),
    );
    workspace.interactivity.selectable = false;
    workspace.interactivity.evented = false;
    workspace
}

impl EditorSession {
    /// Creates a session with an empty page carrying only the workspace
    /// anchor.
    pub fn new(document_name: impl Into<String>, fonts: Arc<FontService>) -> Result<Self> {
        let mut registry = SceneRegistry::new();
        registry.add(workspace_anchor());

        let codec = JsonSnapshotCodec::new(document_name);
        let baseline = codec.capture(&registry)?;

        Ok(Self {
            id: Uuid::new_v4(),
            registry,
            history: HistoryManager::new(baseline),
            codec,
            fonts,
            role: LockLevel::User,
        })
    }

    /// The current session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Issues a guard for asynchronous work started now.
    pub fn guard(&self) -> SessionGuard {
        SessionGuard { id: self.id }
    }

    /// True if the guard was issued by this session incarnation.
    pub fn is_current(&self, guard: &SessionGuard) -> bool {
        self.id == guard.id
    }

    /// The role lock decisions are made as.
    pub fn role(&self) -> LockLevel {
        self.role
    }

    /// Sets the acting role for subsequent lock decisions.
    pub fn set_role(&mut self, role: LockLevel) {
        self.role = role;
    }

    /// Tears the page down and starts a fresh incarnation: new session
    /// id, empty page, cleared font tracker. Guards issued before the
    /// reset stop matching.
    pub fn reset(&mut self) -> Result<()> {
        self.id = Uuid::new_v4();
        self.registry = SceneRegistry::new();
        self.registry.add(workspace_anchor());
        self.fonts.clear();
        let baseline = self.codec.capture(&self.registry)?;
        self.history = HistoryManager::new(baseline);
        tracing::info!(session = %self.id, "session reset");
        Ok(())
    }

    /// Commits the current scene as one history entry.
    pub fn commit(&mut self) -> Result<()> {
        let snapshot = self.codec.capture(&self.registry)?;
        self.history.push_state(snapshot);
        Ok(())
    }

    /// Adds user content and commits.
    pub fn add_object(&mut self, object: SceneObject) -> bool {
        self.registry.add(object);
        self.commit().is_ok()
    }

    /// Removes an object unless it is locked. Lock-gated like every
    /// user-initiated mutation.
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(obj) = self.registry.get(id) else {
            return false;
        };
        if locks::is_locked(obj) {
            tracing::debug!(id = %id, "remove refused: object locked");
            return false;
        }
        let applied: Vec<String> = obj.effects.clone();
        for effect in applied.iter().filter_map(|e| PrintEffect::parse(e)) {
            effects::remove_effect(&mut self.registry, id, effect);
        }
        self.registry.remove(id);
        self.commit().is_ok()
    }

    /// Moves an object by a delta unless it is locked.
    pub fn move_object(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        let Some(obj) = self.registry.get(id) else {
            return false;
        };
        if locks::is_locked(obj) {
            tracing::debug!(id = %id, "move refused: object locked");
            return false;
        }
        if let Some(obj) = self.registry.get_mut(id) {
            obj.placement.left += dx;
            obj.placement.top += dy;
        }
        effects::rebind_overlays(&mut self.registry, id);
        self.registry.notify_modified(id);
        self.commit().is_ok()
    }

    /// Replaces an object's placement wholesale unless it is locked.
    pub fn set_placement(&mut self, id: &str, placement: Placement) -> bool {
        let Some(obj) = self.registry.get(id) else {
            return false;
        };
        if locks::is_locked(obj) {
            return false;
        }
        if let Some(obj) = self.registry.get_mut(id) {
            obj.placement = placement;
        }
        effects::rebind_overlays(&mut self.registry, id);
        self.registry.notify_modified(id);
        self.commit().is_ok()
    }

    /// Toggles a print effect on, creating its overlay, and commits.
    pub fn apply_effect(&mut self, id: &str, effect: PrintEffect) -> bool {
        if !effects::apply_effect(&mut self.registry, id, effect) {
            return false;
        }
        self.commit().is_ok()
    }

    /// Toggles a print effect off, destroying its overlay, and commits.
    pub fn remove_effect(&mut self, id: &str, effect: PrintEffect) -> bool {
        if !effects::remove_effect(&mut self.registry, id, effect) {
            return false;
        }
        self.commit().is_ok()
    }

    /// Locks an object at `level` as the session role.
    pub fn lock_object(&mut self, id: &str, level: LockLevel, reason: Option<&str>) -> bool {
        let role = self.role;
        let Some(obj) = self.registry.get_mut(id) else {
            return false;
        };
        let ok = locks::apply_lock(obj, level, role, reason);
        if ok {
            self.registry.notify_modified(id);
        }
        ok
    }

    /// Unlocks an object as the session role.
    pub fn unlock_object(&mut self, id: &str, force: bool) -> bool {
        let role = self.role;
        let Some(obj) = self.registry.get_mut(id) else {
            return false;
        };
        let ok = locks::apply_unlock(obj, role, force);
        if ok {
            self.registry.notify_modified(id);
        }
        ok
    }

    /// Steps the timeline back and re-hydrates the scene from the
    /// restored snapshot. A malformed snapshot is logged, not propagated;
    /// the timeline still moves.
    pub fn undo(&mut self) -> bool {
        let EditorSession {
            registry,
            history,
            codec,
            ..
        } = self;
        history.undo_with(|snapshot| {
            if let Err(e) = codec.restore(registry, snapshot) {
                tracing::error!(error = %e, "undo restore failed");
            }
        })
    }

    /// Steps the timeline forward and re-hydrates the scene.
    pub fn redo(&mut self) -> bool {
        let EditorSession {
            registry,
            history,
            codec,
            ..
        } = self;
        history.redo_with(|snapshot| {
            if let Err(e) = codec.restore(registry, snapshot) {
                tracing::error!(error = %e, "redo restore failed");
            }
        })
    }

    /// Applies a fetched template if the session is still the one the
    /// fetch started under; a stale result is discarded.
    pub fn apply_template(
        &mut self,
        guard: &SessionGuard,
        template: &TemplateDocument,
    ) -> Result<ReplacementReport> {
        if !self.is_current(guard) {
            tracing::warn!(template = %template.id, "discarding stale template result");
            return Err(TemplateError::StaleSession.into());
        }
        replace_template(
            &mut self.registry,
            &mut self.history,
            &self.codec,
            template,
            self.role,
        )
    }

    /// Opens a saved document. The loaded state becomes the irreducible
    /// history baseline: nothing before it can be undone.
    pub fn load_document(&mut self, document: DocumentFile) -> Result<()> {
        self.registry.replace_all(document.objects);
        effects::rebind_all_overlays(&mut self.registry);
        if !self.registry.contains(WORKSPACE_ID) {
            self.registry.add(workspace_anchor());
        }
        let baseline = self.codec.capture(&self.registry)?;
        self.history = HistoryManager::new(baseline);
        Ok(())
    }

    /// Awaits a font family, deduplicating concurrent loads.
    pub async fn ensure_font(&self, family: &str) -> bool {
        self.fonts.ensure_loaded(family).await
    }

    /// Converts a text object into its vector outline in place: same id,
    /// same visual position, effects and lock state carried over. Returns
    /// false (and leaves the scene untouched) when the object is missing,
    /// not text, locked, or when no usable font or outline exists.
    pub fn vectorize_text(&mut self, id: &str) -> bool {
        let Some(obj) = self.registry.get(id) else {
            return false;
        };
        if obj.kind != ObjectKind::Text {
            return false;
        }
        if locks::is_locked(obj) {
            tracing::debug!(id = %id, "vectorize refused: object locked");
            return false;
        }

        let family = obj
            .font_family
            .clone()
            .unwrap_or_else(|| crate::fonts::DEFAULT_FAMILY.to_string());
        let Some(font) = self
            .fonts
            .font_for(&family, false, false)
            .or_else(|| self.fonts.default_font())
        else {
            tracing::warn!(id = %id, family = %family, "vectorize aborted: no usable font");
            return false;
        };

        let path_obj = match crate::outline::vectorize(obj, font) {
            Ok(path_obj) => path_obj,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "vectorize aborted");
                return false;
            }
        };

        // Same id: the path replaces the text in place, keeping draw
        // order and overlay ownership intact.
        self.registry.add(path_obj);
        effects::rebind_overlays(&mut self.registry, id);
        self.commit().is_ok()
    }
}
