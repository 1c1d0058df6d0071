//! Text vectorization: converting a styled text object into a vector
//! path object that renders at the exact same spot.
//!
//! Glyphs are laid out and outlined with `rusttype`, collected into a
//! `lyon` path, and serialized to SVG path data local to the outline's
//! top-left corner. The derived object's placement comes from the
//! coordinate transform module, so vectorizing never moves the text.

use lyon::math::point;
use lyon::path::{Event, Path};
use rusttype::{point as rt_point, Font, OutlineBuilder, PositionedGlyph, Scale};
use std::fmt::Write as _;

use printforge_core::{FontError, Result};

use crate::model::{ObjectKind, Placement, SceneObject};
use crate::transform;

/// Glyph outlines flattened into one path, with the tight bounds of the
/// laid-out text.
pub struct TextOutline {
    /// SVG path data, relative to the outline's top-left corner.
    pub path_data: String,
    pub width: f64,
    pub height: f64,
}

/// Collects rusttype outline callbacks into a lyon path.
struct PathSink {
    builder: lyon::path::path::Builder,
    open: bool,
}

impl PathSink {
    fn new() -> Self {
        Self {
            builder: Path::builder(),
            open: false,
        }
    }

    fn finish(mut self) -> Path {
        if self.open {
            self.builder.end(false);
        }
        self.builder.build()
    }
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.builder.end(false);
        }
        self.builder.begin(point(x, y));
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.builder.line_to(point(x, y));
        }
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        if self.open {
            self.builder.quadratic_bezier_to(point(x1, y1), point(x, y));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        if self.open {
            self.builder
                .cubic_bezier_to(point(x1, y1), point(x2, y2), point(x, y));
        }
    }

    fn close(&mut self) {
        if self.open {
            self.builder.end(true);
            self.open = false;
        }
    }
}

/// Serializes a lyon path to SVG path data, shifting all coordinates by
/// `(-offset_x, -offset_y)`.
fn path_to_svg(path: &Path, offset_x: f32, offset_y: f32) -> String {
    let mut d = String::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                write!(d, "M {:.2} {:.2} ", at.x - offset_x, at.y - offset_y).ok();
            }
            Event::Line { to, .. } => {
                write!(d, "L {:.2} {:.2} ", to.x - offset_x, to.y - offset_y).ok();
            }
            Event::Quadratic { ctrl, to, .. } => {
                write!(
                    d,
                    "Q {:.2} {:.2} {:.2} {:.2} ",
                    ctrl.x - offset_x,
                    ctrl.y - offset_y,
                    to.x - offset_x,
                    to.y - offset_y
                )
                .ok();
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                write!(
                    d,
                    "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} ",
                    ctrl1.x - offset_x,
                    ctrl1.y - offset_y,
                    ctrl2.x - offset_x,
                    ctrl2.y - offset_y,
                    to.x - offset_x,
                    to.y - offset_y
                )
                .ok();
            }
            Event::End { close, .. } => {
                if close {
                    d.push_str("Z ");
                }
            }
        }
    }
    d.trim_end().to_string()
}

/// Lays out and outlines a string at the given size. Returns `None` when
/// the text produces no visible glyph outlines.
pub fn outline_text(font: &Font<'_>, text: &str, font_size: f64) -> Option<TextOutline> {
    let scale = Scale::uniform(font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let start = rt_point(0.0, v_metrics.ascent);
    let glyphs: Vec<PositionedGlyph<'_>> = font.layout(text, scale, start).collect();

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    let mut any = false;

    for glyph in &glyphs {
        if let Some(bb) = glyph.unpositioned().exact_bounding_box() {
            let pos = glyph.position();
            min_x = min_x.min(pos.x + bb.min.x);
            min_y = min_y.min(pos.y + bb.min.y);
            max_x = max_x.max(pos.x + bb.max.x);
            max_y = max_y.max(pos.y + bb.max.y);
            any = true;
        }
    }

    if !any {
        return None;
    }

    let mut sink = PathSink::new();
    for glyph in &glyphs {
        glyph.build_outline(&mut sink);
    }
    let path = sink.finish();

    Some(TextOutline {
        path_data: path_to_svg(&path, min_x, min_y),
        width: (max_x - min_x) as f64,
        height: (max_y - min_y) as f64,
    })
}

/// Converts a text object into a path object occupying the same visual
/// position: same rotation, scale, flips and skew, with left/top computed
/// from the source placement rather than from any post-rotation bounding
/// box.
pub fn vectorize(obj: &SceneObject, font: &Font<'_>) -> Result<SceneObject> {
    let family = obj
        .font_family
        .clone()
        .unwrap_or_else(|| crate::fonts::DEFAULT_FAMILY.to_string());

    if obj.kind != ObjectKind::Text {
        return Err(FontError::EmptyOutline { family }.into());
    }
    let text = obj.text.as_deref().unwrap_or("");
    let font_size = obj.font_size.unwrap_or(16.0);

    let outline =
        outline_text(font, text, font_size).ok_or(FontError::EmptyOutline { family })?;

    let (left, top) = transform::derived_position(&obj.placement);
    let mut placement = Placement::new(left, top, outline.width, outline.height);
    placement.scale_x = obj.placement.scale_x;
    placement.scale_y = obj.placement.scale_y;
    placement.angle = obj.placement.angle;
    placement.flip_x = obj.placement.flip_x;
    placement.flip_y = obj.placement.flip_y;
    // Skew carries forward; it never shifts the origin point.
    placement.skew_x = obj.placement.skew_x;
    placement.skew_y = obj.placement.skew_y;

    let mut path_obj = SceneObject::path(obj.id.clone(), outline.path_data, placement);
    path_obj.extension_type = obj.extension_type.clone();
    path_obj.is_user_added = obj.is_user_added;
    path_obj.exclude_from_export = obj.exclude_from_export;
    path_obj.fill = obj.fill.clone();
    path_obj.effects = obj.effects.clone();
    path_obj.interactivity = obj.interactivity;
    path_obj.lock_flags = obj.lock_flags;
    path_obj.lock_info = obj.lock_info.clone();
    Ok(path_obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_builds_svg_path() {
        let mut sink = PathSink::new();
        sink.move_to(10.0, 20.0);
        sink.line_to(30.0, 20.0);
        sink.quad_to(40.0, 25.0, 30.0, 30.0);
        sink.close();
        let path = sink.finish();

        let d = path_to_svg(&path, 10.0, 20.0);
        assert!(d.starts_with("M 0.00 0.00"));
        assert!(d.contains("L 20.00 0.00"));
        assert!(d.contains("Q 30.00 5.00 20.00 10.00"));
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn test_sink_handles_unclosed_contours() {
        let mut sink = PathSink::new();
        sink.move_to(0.0, 0.0);
        sink.line_to(5.0, 0.0);
        // Second contour opens without the first being closed.
        sink.move_to(10.0, 10.0);
        sink.line_to(15.0, 10.0);
        let path = sink.finish();

        let d = path_to_svg(&path, 0.0, 0.0);
        assert_eq!(d.matches('M').count(), 2);
        assert!(!d.contains('Z'));
    }
}
