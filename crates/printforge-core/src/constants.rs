//! Reserved scene identifiers and engine defaults.
//!
//! Several object ids are owned by the active template and carry special
//! meaning for classification and replacement. They are collected here so
//! the editor crates agree on the exact spelling.

/// The workspace anchor. Defines the page coordinate frame and survives
/// every template replacement.
pub const WORKSPACE_ID: &str = "workspace";

/// Background rectangle installed by the template.
pub const TEMPLATE_BACKGROUND_ID: &str = "template-background";

/// Outline of the printable page.
pub const PAGE_OUTLINE_ID: &str = "page-outline";

/// Cut border print guide.
pub const CUT_BORDER_ID: &str = "cut-border";

/// Safe-zone border print guide.
pub const SAFE_ZONE_BORDER_ID: &str = "safe-zone-border";

/// Cutline geometry supplied by the template.
pub const CUTLINE_TEMPLATE_ID: &str = "cutline-template";

/// Horizontal center guideline.
pub const CENTER_GUIDELINE_H_ID: &str = "center-guideline-h";

/// Vertical center guideline.
pub const CENTER_GUIDELINE_V_ID: &str = "center-guideline-v";

/// Every reserved id that classifies an object as template-owned.
/// The workspace anchor is template-owned too, but is exempt from purging.
pub const RESERVED_TEMPLATE_IDS: [&str; 8] = [
    WORKSPACE_ID,
    TEMPLATE_BACKGROUND_ID,
    PAGE_OUTLINE_ID,
    CUT_BORDER_ID,
    SAFE_ZONE_BORDER_ID,
    CUTLINE_TEMPLATE_ID,
    CENTER_GUIDELINE_H_ID,
    CENTER_GUIDELINE_V_ID,
];

/// Default page size in canvas units for a fresh session.
pub const DEFAULT_PAGE_WIDTH: f64 = 1200.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 600.0;
