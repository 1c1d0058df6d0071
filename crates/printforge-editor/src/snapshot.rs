//! Snapshot capture and restore.
//!
//! Implements the persistence port the history manager and sessions rely
//! on: the registry is serialized to an opaque snapshot and re-hydrated
//! from one. The JSON implementation doubles as the .pfd (PrintForge
//! document) save/load format with complete scene state preservation.

use anyhow::{Context, Result as AnyResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use printforge_core::{DocumentError, Result};

use crate::effects;
use crate::history::Snapshot;
use crate::model::SceneObject;
use crate::registry::SceneRegistry;

/// Document file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Capture and restore of opaque scene snapshots. History entries are
/// exactly this opaque type; only implementations of this trait interpret
/// their content.
pub trait SnapshotCodec {
    /// Serializes the full scene into an opaque snapshot.
    fn capture(&self, registry: &SceneRegistry) -> Result<Snapshot>;

    /// Re-hydrates the scene from a snapshot, including the overlay
    /// re-binding pass.
    fn restore(&self, registry: &mut SceneRegistry, snapshot: &Snapshot) -> Result<()>;
}

/// Complete document file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub objects: Vec<SceneObject>,
}

/// Document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

impl DocumentFile {
    /// Create a new document file with default values
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            objects: Vec::new(),
        }
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> AnyResult<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize document")?;
        std::fs::write(path.as_ref(), json).context("Failed to write document file")?;
        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> AnyResult<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read document file")?;
        let mut document: DocumentFile =
            serde_json::from_str(&content).context("Failed to parse document file")?;
        document.metadata.modified = Utc::now();
        Ok(document)
    }
}

/// JSON snapshot codec. The produced snapshots are versioned
/// `DocumentFile` payloads, which keeps history entries loadable as
/// documents and vice versa.
#[derive(Debug, Clone)]
pub struct JsonSnapshotCodec {
    document_name: String,
}

impl JsonSnapshotCodec {
    /// Creates a codec stamping captured documents with this name.
    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
        }
    }
}

impl Default for JsonSnapshotCodec {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl SnapshotCodec for JsonSnapshotCodec {
    fn capture(&self, registry: &SceneRegistry) -> Result<Snapshot> {
        let mut document = DocumentFile::new(self.document_name.clone());
        document.objects = registry.all().to_vec();
        let json = serde_json::to_string(&document).map_err(DocumentError::MalformedSnapshot)?;
        Ok(Snapshot::new(json))
    }

    fn restore(&self, registry: &mut SceneRegistry, snapshot: &Snapshot) -> Result<()> {
        let document: DocumentFile =
            serde_json::from_str(snapshot.as_str()).map_err(DocumentError::MalformedSnapshot)?;
        if document.version != FILE_FORMAT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                version: document.version,
            }
            .into());
        }
        registry.replace_all(document.objects);
        // Overlay geometry is owner-relative; restored overlays are
        // re-derived rather than trusted verbatim.
        effects::rebind_all_overlays(registry);
        Ok(())
    }
}
