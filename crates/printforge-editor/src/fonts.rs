//! Font resolution and load-state tracking.
//!
//! Faces are resolved through `fontdb` into `rusttype` fonts and cached
//! per family/weight/style. A session-scoped tracker records which
//! families are loaded, loading, or failed; concurrent requesters of an
//! in-flight family await the same load via a fixed-interval poll instead
//! of starting duplicates. The resolver backend is a trait so the engine
//! runs in tests and headless environments without system fonts.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use parking_lot::Mutex;
use rusttype::Font;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::time::Duration;

use printforge_core::{event_bus, AppEvent, FontEvent};

/// Family every text falls back to when its own family fails to load.
pub const DEFAULT_FAMILY: &str = "Sans";

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_POLLS: usize = 100;

/// Resolves a family name to a loaded font face.
pub trait FontResolver: Send + Sync {
    fn resolve(&self, family: &str, bold: bool, italic: bool) -> Option<Font<'static>>;
}

/// Resolver backed by the system font database.
pub struct SystemFontResolver {
    db: Database,
}

impl SystemFontResolver {
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self { db }
    }

    /// All family names known to the system database, sorted.
    pub fn list_families(&self) -> Vec<String> {
        let mut set = HashSet::new();
        for face in self.db.faces() {
            for (name, _) in &face.families {
                set.insert(name.clone());
            }
        }
        let mut out: Vec<_> = set.into_iter().collect();
        out.sort();
        out
    }
}

impl Default for SystemFontResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for SystemFontResolver {
    fn resolve(&self, family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
        let families: Vec<Family<'_>> = match family.trim() {
            "" | "Sans" => vec![Family::SansSerif],
            "Serif" => vec![Family::Serif],
            "Monospace" => vec![Family::Monospace],
            other => vec![Family::Name(other), Family::SansSerif],
        };

        let query = Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: if italic { Style::Italic } else { Style::Normal },
        };

        let id = self.db.query(&query)?;
        let face = self.db.face(id)?;

        match &face.source {
            fontdb::Source::File(path) => {
                let bytes = fs::read(path).ok()?;
                Font::try_from_vec(bytes)
            }
            fontdb::Source::SharedFile(path, _) => {
                let bytes = fs::read(path).ok()?;
                Font::try_from_vec(bytes)
            }
            fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

/// Load state of a family as seen by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStatus {
    Loaded,
    Loading,
    Failed,
    Unknown,
}

#[derive(Default)]
struct TrackerSets {
    loaded: HashSet<String>,
    loading: HashSet<String>,
    failed: HashSet<String>,
}

/// Session-scoped font service: resolution cache plus load-state tracker.
pub struct FontService {
    resolver: Box<dyn FontResolver>,
    cache: Mutex<HashMap<FontKey, &'static Font<'static>>>,
    tracker: Mutex<TrackerSets>,
}

impl FontService {
    /// Service backed by the system font database.
    pub fn system() -> Self {
        Self::with_resolver(Box::new(SystemFontResolver::new()))
    }

    /// Service with a custom resolver backend.
    pub fn with_resolver(resolver: Box<dyn FontResolver>) -> Self {
        Self {
            resolver,
            cache: Mutex::new(HashMap::new()),
            tracker: Mutex::new(TrackerSets::default()),
        }
    }

    /// Current load state of a family.
    pub fn status(&self, family: &str) -> FontStatus {
        let tracker = self.tracker.lock();
        if tracker.loaded.contains(family) {
            FontStatus::Loaded
        } else if tracker.loading.contains(family) {
            FontStatus::Loading
        } else if tracker.failed.contains(family) {
            FontStatus::Failed
        } else {
            FontStatus::Unknown
        }
    }

    /// Marks a family as in flight. Returns false when the family is
    /// already loaded or already loading; a previously failed family may
    /// be retried.
    pub fn begin_load(&self, family: &str) -> bool {
        let mut tracker = self.tracker.lock();
        if tracker.loaded.contains(family) || tracker.loading.contains(family) {
            return false;
        }
        tracker.failed.remove(family);
        tracker.loading.insert(family.to_string());
        true
    }

    /// Records the outcome of an in-flight load and notifies subscribers.
    pub fn complete_load(&self, family: &str, ok: bool) {
        {
            let mut tracker = self.tracker.lock();
            tracker.loading.remove(family);
            if ok {
                tracker.loaded.insert(family.to_string());
            } else {
                tracker.failed.insert(family.to_string());
            }
        }
        let event = if ok {
            FontEvent::Loaded {
                family: family.to_string(),
            }
        } else {
            FontEvent::Failed {
                family: family.to_string(),
            }
        };
        event_bus().publish(AppEvent::Font(event)).ok();
    }

    /// Ensures a family is loaded, returning whether it is usable.
    ///
    /// Requests for an in-flight family do not start a duplicate load;
    /// they poll the tracker at a fixed short interval until the load
    /// settles, resolving true on success and false on failure.
    pub async fn ensure_loaded(&self, family: &str) -> bool {
        match self.status(family) {
            FontStatus::Loaded => return true,
            FontStatus::Failed => return false,
            FontStatus::Loading => return self.wait_for(family).await,
            FontStatus::Unknown => {}
        }

        if !self.begin_load(family) {
            // Another requester started the load between the status check
            // and here.
            return self.wait_for(family).await;
        }

        let ok = self.font_for(family, false, false).is_some();
        self.complete_load(family, ok);
        if !ok {
            tracing::warn!(family = %family, "font load failed");
        }
        ok
    }

    async fn wait_for(&self, family: &str) -> bool {
        for _ in 0..MAX_POLLS {
            tokio::time::sleep(POLL_INTERVAL).await;
            match self.status(family) {
                FontStatus::Loaded => return true,
                FontStatus::Failed | FontStatus::Unknown => return false,
                FontStatus::Loading => {}
            }
        }
        tracing::warn!(family = %family, "gave up waiting for font load");
        false
    }

    /// Resolves and caches a face. Leaked into 'static like any font the
    /// renderer keeps for the lifetime of the page.
    pub fn font_for(&self, family: &str, bold: bool, italic: bool) -> Option<&'static Font<'static>> {
        let key = FontKey {
            family: family.to_string(),
            bold,
            italic,
        };

        if let Some(font) = self.cache.lock().get(&key).copied() {
            return Some(font);
        }

        let font = self.resolver.resolve(family, bold, italic)?;
        let font_ref: &'static Font<'static> = Box::leak(Box::new(font));
        self.cache.lock().insert(key, font_ref);
        Some(font_ref)
    }

    /// The fallback face used when a requested family cannot load.
    pub fn default_font(&self) -> Option<&'static Font<'static>> {
        self.font_for(DEFAULT_FAMILY, false, false)
    }

    /// Drops all load state on session teardown. Cached faces stay valid;
    /// only the tracker resets.
    pub fn clear(&self) {
        let mut tracker = self.tracker.lock();
        tracker.loaded.clear();
        tracker.loading.clear();
        tracker.failed.clear();
    }
}
