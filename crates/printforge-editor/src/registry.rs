//! Scene object registry: the canonical, queryable object set for one
//! page. All other engine components read and write through it.
//!
//! Lookups never fail loudly; a missing id is `None` and callers check
//! existence themselves. Lock decisions are not made here: whoever
//! orchestrates a user-initiated mutation consults the lock authority
//! before touching the registry.

use printforge_core::{event_bus, AppEvent, SceneEvent};

use crate::classify;
use crate::model::SceneObject;

/// Ordered object store for one page. Insertion order is draw order.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
}

impl SceneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Adds an object, stamping its ownership tri-state on first
    /// encounter. An existing object with the same id is replaced in
    /// place, keeping its draw position.
    pub fn add(&mut self, mut object: SceneObject) {
        classify::mark_ownership(&mut object);
        let id = object.id.clone();

        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == object.id) {
            tracing::debug!(id = %id, "replacing existing object");
            *existing = object;
            event_bus()
                .publish(AppEvent::Scene(SceneEvent::ObjectModified { id }))
                .ok();
            return;
        }

        self.objects.push(object);
        event_bus()
            .publish(AppEvent::Scene(SceneEvent::ObjectAdded { id }))
            .ok();
    }

    /// Removes and returns an object by id.
    pub fn remove(&mut self, id: &str) -> Option<SceneObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        let removed = self.objects.remove(pos);
        event_bus()
            .publish(AppEvent::Scene(SceneEvent::ObjectRemoved {
                id: removed.id.clone(),
            }))
            .ok();
        Some(removed)
    }

    /// Gets a reference to an object by id.
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Gets a mutable reference to an object by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Returns the first object matching the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<&SceneObject>
    where
        P: FnMut(&&SceneObject) -> bool,
    {
        self.objects.iter().find(predicate)
    }

    /// Returns all objects in draw order.
    pub fn all(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Iterates objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Iterates objects mutably in draw order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// True if an object with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Number of objects on the page.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the page is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object without per-object notifications.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.request_render();
    }

    /// Replaces the entire object set in one step (bulk load). Ownership
    /// is stamped per object; a single render request is published instead
    /// of per-object notifications.
    pub fn replace_all(&mut self, mut objects: Vec<SceneObject>) {
        for obj in &mut objects {
            classify::mark_ownership(obj);
        }
        self.objects = objects;
        self.request_render();
    }

    /// Announces an in-place mutation of the object with this id.
    pub fn notify_modified(&self, id: &str) {
        event_bus()
            .publish(AppEvent::Scene(SceneEvent::ObjectModified {
                id: id.to_string(),
            }))
            .ok();
    }

    /// Asks the renderer port for a repaint.
    pub fn request_render(&self) {
        event_bus()
            .publish(AppEvent::Scene(SceneEvent::RenderRequested))
            .ok();
    }
}
