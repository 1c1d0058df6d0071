//! Error handling for PrintForge.
//!
//! Provides error types for the fallible boundaries of the engine:
//! - Document errors (snapshot serialization/parsing)
//! - Template errors (library lookups, fetch failures, stale sessions)
//! - Font errors (resolution and outline failures)
//!
//! Core scene-graph algorithms never produce these: permission denials,
//! not-found lookups, and undo/redo boundary hits are signalled as
//! booleans or `Option`s. All error types use `thiserror`.

use thiserror::Error;

/// Document and snapshot errors.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Snapshot content could not be parsed.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    /// Document was written by an incompatible format version.
    #[error("Unsupported document version: {version}")]
    UnsupportedVersion {
        /// The version string found in the document.
        version: String,
    },
}

/// Template library and replacement errors.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    /// No template with this id exists in the library.
    #[error("Template '{id}' not found")]
    NotFound {
        /// The requested template id.
        id: String,
    },

    /// A template with this id is already registered.
    #[error("Template '{id}' already exists")]
    AlreadyExists {
        /// The conflicting template id.
        id: String,
    },

    /// The template could not be retrieved from its source.
    #[error("Template fetch failed: {reason}")]
    FetchFailed {
        /// Why the fetch failed.
        reason: String,
    },

    /// The editing session changed while the result was in flight.
    #[error("Editing session is no longer current")]
    StaleSession,
}

/// Font resolution and vectorization errors.
#[derive(Error, Debug, Clone)]
pub enum FontError {
    /// No face matched the requested family.
    #[error("Font family '{family}' not found")]
    NotFound {
        /// The requested family name.
        family: String,
    },

    /// The face was found but could not be loaded.
    #[error("Font '{family}' failed to load: {reason}")]
    LoadFailed {
        /// The requested family name.
        family: String,
        /// Why the load failed.
        reason: String,
    },

    /// Layout produced no outlines (empty text or glyphless face).
    #[error("No glyph outlines produced for family '{family}'")]
    EmptyOutline {
        /// The family the outlines were requested from.
        family: String,
    },
}

/// Top-level error type wrapping all engine error domains.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
