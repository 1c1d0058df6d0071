//! Template documents, the template library, and the replacement engine.
//!
//! Replacement swaps every template-owned object for a new template's
//! objects while user content keeps its exact screen position, size and
//! rotation. The whole swap is committed as a single history entry, so
//! one undo returns the complete pre-replacement scene.

use anyhow::{Context, Result as AnyResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use printforge_core::constants::WORKSPACE_ID;
use printforge_core::{event_bus, AppEvent, Result, TemplateError, TemplateEvent};

use crate::classify::{is_template_element, is_user_added_element};
use crate::effects;
use crate::history::HistoryManager;
use crate::locks::{can_unlock, effective_level, LockLevel};
use crate::model::{Placement, SceneObject};
use crate::registry::SceneRegistry;
use crate::snapshot::SnapshotCodec;

/// Print product categories for organizing templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateCategory {
    /// Front/back book covers
    BookCover,
    /// Book spines
    Spine,
    /// Folded leaflets
    Leaflet,
    /// Single-sheet flyers
    Flyer,
    /// Posters
    Poster,
    /// User-defined custom category
    Custom,
}

impl TemplateCategory {
    /// Get category as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::BookCover => "book-cover",
            TemplateCategory::Spine => "spine",
            TemplateCategory::Leaflet => "leaflet",
            TemplateCategory::Flyer => "flyer",
            TemplateCategory::Poster => "poster",
            TemplateCategory::Custom => "custom",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "book-cover" => Some(TemplateCategory::BookCover),
            "spine" => Some(TemplateCategory::Spine),
            "leaflet" => Some(TemplateCategory::Leaflet),
            "flyer" => Some(TemplateCategory::Flyer),
            "poster" => Some(TemplateCategory::Poster),
            "custom" => Some(TemplateCategory::Custom),
            _ => None,
        }
    }
}

/// A template: the set of scene objects a product page starts from, plus
/// metadata for the browser panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDocument {
    /// Unique template identifier
    pub id: String,
    /// Template name
    pub name: String,
    /// Template description
    #[serde(default)]
    pub description: String,
    /// Category for organization
    pub category: TemplateCategory,
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last modified timestamp
    pub modified_at: String,
    /// Template tags for search
    #[serde(default)]
    pub tags: Vec<String>,
    /// The objects the template installs
    pub objects: Vec<SceneObject>,
}

impl TemplateDocument {
    /// Create a new template document
    pub fn new(
        id: String,
        name: String,
        category: TemplateCategory,
        objects: Vec<SceneObject>,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id,
            name,
            description: String::new(),
            category,
            author: String::new(),
            created_at: now.clone(),
            modified_at: now,
            tags: Vec::new(),
            objects,
        }
    }

    /// Matches search query against name, description, tags and author
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
            || self.author.to_lowercase().contains(&q)
    }
}

/// Template library for browsing and lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: HashMap<String, TemplateDocument>,
}

impl TemplateLibrary {
    /// Create new template library
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add template to library
    pub fn add(&mut self, template: TemplateDocument) -> std::result::Result<(), TemplateError> {
        if self.templates.contains_key(&template.id) {
            return Err(TemplateError::AlreadyExists { id: template.id });
        }
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Get template by ID
    pub fn get(&self, id: &str) -> Option<&TemplateDocument> {
        self.templates.get(id)
    }

    /// Remove template by ID
    pub fn remove(&mut self, id: &str) -> Option<TemplateDocument> {
        self.templates.remove(id)
    }

    /// Get all templates
    pub fn list_all(&self) -> Vec<&TemplateDocument> {
        self.templates.values().collect()
    }

    /// Get templates by category
    pub fn list_by_category(&self, category: TemplateCategory) -> Vec<&TemplateDocument> {
        self.templates
            .values()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Search templates by query
    pub fn search(&self, query: &str) -> Vec<&TemplateDocument> {
        self.templates
            .values()
            .filter(|t| t.matches_search(query))
            .collect()
    }

    /// Get template count
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Check if template exists
    pub fn exists(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Save library to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> AnyResult<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize library")?;
        std::fs::write(path.as_ref(), json).context("Failed to write library file")?;
        Ok(())
    }

    /// Load library from JSON file; a missing file is an empty library
    pub fn load_from_file(path: impl AsRef<Path>) -> AnyResult<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read library file")?;
        let library = serde_json::from_str(&content).context("Failed to parse library file")?;
        Ok(library)
    }
}

/// What a replacement did, for logging and UI feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplacementReport {
    /// Template-owned objects removed.
    pub purged: usize,
    /// Objects installed from the new template.
    pub loaded: usize,
    /// User objects whose placement was preserved.
    pub preserved: usize,
    /// Template objects left in place because they carry a lock the
    /// acting role cannot remove.
    pub skipped_locked: usize,
}

/// Replaces the current template with `template`, preserving user content
/// and its original geometry, as one undoable unit.
///
/// Protocol: preserve user placements, purge template-owned objects
/// (never the workspace anchor), load the new template's objects, restore
/// preserved placements, then notify. A user-added object is never purged
/// or repositioned regardless of any transient role tag it carries. A
/// template object locked above the acting role's unlock capability is
/// not removed; it is kept, logged, and counted in the report.
pub fn replace_template(
    registry: &mut SceneRegistry,
    history: &mut HistoryManager,
    codec: &dyn SnapshotCodec,
    template: &TemplateDocument,
    acting: LockLevel,
) -> Result<ReplacementReport> {
    let mut report = ReplacementReport::default();

    // 1. Preserve: full placement of every user object, keyed by id.
    let preserved: HashMap<String, (Placement, SceneObject)> = registry
        .iter()
        .filter(|o| is_user_added_element(o))
        .map(|o| (o.id.clone(), (o.placement, o.clone())))
        .collect();

    // 2. Purge template-owned objects. The workspace anchor survives
    // every replacement; it is the frame everything else is measured
    // against.
    let purge_ids: Vec<String> = registry
        .iter()
        .filter(|o| {
            o.id != WORKSPACE_ID && is_template_element(o) && !is_user_added_element(o)
        })
        .map(|o| o.id.clone())
        .collect();

    for id in purge_ids {
        let lock = registry.get(&id).and_then(effective_level);
        if let Some(level) = lock {
            if !can_unlock(acting, level) {
                tracing::warn!(
                    id = %id,
                    level = level.as_str(),
                    acting = acting.as_str(),
                    "template object kept: locked above acting role"
                );
                report.skipped_locked += 1;
                continue;
            }
        }
        registry.remove(&id);
        report.purged += 1;
    }

    // 3. Load the new template's objects. An incoming workspace
    // definition never displaces the existing anchor.
    for obj in &template.objects {
        if obj.id == WORKSPACE_ID && registry.contains(WORKSPACE_ID) {
            continue;
        }
        registry.add(obj.clone());
        report.loaded += 1;
    }

    // 4. Restore: the preserved user object is re-added verbatim with its
    // preserved placement, winning over anything the new template assigned
    // to a colliding id.
    for (id, (placement, original)) in &preserved {
        let mut restored = original.clone();
        restored.placement = *placement;
        registry.add(restored);
        effects::rebind_overlays(registry, id);
        report.preserved += 1;
    }

    // One history entry for the whole swap.
    let snapshot = codec.capture(registry)?;
    history.push_state(snapshot);
    registry.request_render();

    // 5. Notify dependent UI.
    event_bus()
        .publish(AppEvent::Template(TemplateEvent::Replaced {
            template_id: template.id.clone(),
            preserved: report.preserved,
        }))
        .ok();

    tracing::info!(
        template = %template.id,
        purged = report.purged,
        loaded = report.loaded,
        preserved = report.preserved,
        "template replaced"
    );
    Ok(report)
}
