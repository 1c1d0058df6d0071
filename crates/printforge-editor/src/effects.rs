//! Special print effects and their overlay objects.
//!
//! Each applied effect owns exactly one companion overlay object keyed
//! `{owner_id}_{effect}`. Overlays are derived, owner-relative visuals:
//! they are created and destroyed with the effect toggle and their
//! geometry always mirrors the owner's. After any restore that recreates
//! an owner, overlays must be re-bound from the owner rather than trusted
//! verbatim, or they drift.

use crate::model::{Placement, SceneObject};
use crate::registry::SceneRegistry;

/// Special print finish vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintEffect {
    /// Raised embossing.
    Emboss,
    /// Gold foil.
    Gold,
    /// Die-cut contour.
    Cutting,
}

impl PrintEffect {
    /// Get effect as string
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintEffect::Emboss => "emboss",
            PrintEffect::Gold => "gold",
            PrintEffect::Cutting => "cutting",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "emboss" => Some(PrintEffect::Emboss),
            "gold" => Some(PrintEffect::Gold),
            "cutting" => Some(PrintEffect::Cutting),
            _ => None,
        }
    }

    /// Fill color the overlay renders with.
    fn overlay_fill(&self) -> &'static str {
        match self {
            PrintEffect::Emboss => "#c0c0c0",
            PrintEffect::Gold => "#d4af37",
            PrintEffect::Cutting => "#ff00ff",
        }
    }
}

/// Id of the overlay object owned by `owner_id` for `effect`.
pub fn overlay_id(owner_id: &str, effect: PrintEffect) -> String {
    format!("{}_{}", owner_id, effect.as_str())
}

fn overlay_object(owner_id: &str, effect: PrintEffect, placement: Placement) -> SceneObject {
    let mut overlay = SceneObject::rect(
        overlay_id(owner_id, effect),
        effect.overlay_fill(),
        placement,
    );
    overlay = overlay.with_extension_type("overlay");
    overlay.interactivity.selectable = false;
    overlay.interactivity.evented = false;
    overlay
}

/// Applies an effect to an object, creating its overlay. Returns false if
/// the owner does not exist; re-applying an active effect is a no-op
/// success.
pub fn apply_effect(registry: &mut SceneRegistry, owner_id: &str, effect: PrintEffect) -> bool {
    let Some(owner) = registry.get_mut(owner_id) else {
        return false;
    };
    if owner.has_effect(effect.as_str()) {
        return true;
    }
    owner.effects.push(effect.as_str().to_string());
    let placement = owner.placement;

    registry.add(overlay_object(owner_id, effect, placement));
    registry.notify_modified(owner_id);
    tracing::debug!(owner = %owner_id, effect = effect.as_str(), "effect applied");
    true
}

/// Removes an effect and destroys its overlay. Returns false if the owner
/// does not exist or the effect was not applied.
pub fn remove_effect(registry: &mut SceneRegistry, owner_id: &str, effect: PrintEffect) -> bool {
    let Some(owner) = registry.get_mut(owner_id) else {
        return false;
    };
    let Some(pos) = owner.effects.iter().position(|e| e == effect.as_str()) else {
        return false;
    };
    owner.effects.remove(pos);

    registry.remove(&overlay_id(owner_id, effect));
    registry.notify_modified(owner_id);
    tracing::debug!(owner = %owner_id, effect = effect.as_str(), "effect removed");
    true
}

/// All overlay objects owned by `owner_id`, found by id-prefix lookup.
pub fn overlays_of<'a>(registry: &'a SceneRegistry, owner_id: &str) -> Vec<&'a SceneObject> {
    let prefix = format!("{}_", owner_id);
    registry
        .iter()
        .filter(|o| {
            o.id.strip_prefix(&prefix)
                .is_some_and(|rest| PrintEffect::parse(rest).is_some())
        })
        .collect()
}

/// Re-derives the overlays of one owner after a restore: geometry is
/// copied from the owner, missing overlays are recreated, and orphan
/// overlays whose effect is no longer applied are dropped.
pub fn rebind_overlays(registry: &mut SceneRegistry, owner_id: &str) {
    let Some(owner) = registry.get(owner_id) else {
        return;
    };
    let placement = owner.placement;
    let effects: Vec<PrintEffect> = owner
        .effects
        .iter()
        .filter_map(|e| PrintEffect::parse(e))
        .collect();

    for effect in [PrintEffect::Emboss, PrintEffect::Gold, PrintEffect::Cutting] {
        let id = overlay_id(owner_id, effect);
        if effects.contains(&effect) {
            if let Some(overlay) = registry.get_mut(&id) {
                overlay.placement = placement;
                registry.notify_modified(&id);
            } else {
                registry.add(overlay_object(owner_id, effect, placement));
            }
        } else if registry.contains(&id) {
            registry.remove(&id);
        }
    }
}

/// Re-binds overlays for every effect-carrying owner in the registry.
/// Snapshot consumers call this after each restore.
pub fn rebind_all_overlays(registry: &mut SceneRegistry) {
    let owners: Vec<String> = registry
        .iter()
        .filter(|o| !o.effects.is_empty())
        .map(|o| o.id.clone())
        .collect();
    for owner in owners {
        rebind_overlays(registry, &owner);
    }
}
