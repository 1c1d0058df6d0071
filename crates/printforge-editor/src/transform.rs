//! Placement math for derived objects.
//!
//! When styled text is replaced by its vector outline, the outline is a
//! left/top-anchored object while the source may be anchored anywhere and
//! rotated, scaled or flipped. `derived_position` computes the left/top the
//! derived object must use so both render at the same spot under the same
//! rotation.
//!
//! The offset is computed in the source's unrotated frame and then rotated;
//! it is never taken from the post-rotation axis-aligned bounding box,
//! which would apply the rotation twice. Skew does not shift the origin
//! point and is carried forward on the derived object unchanged.

use crate::model::{OriginX, OriginY, Placement};

/// Per-axis scale with flips folded in as sign changes, matching how the
/// renderer composes its transforms.
pub fn effective_scale(p: &Placement) -> (f64, f64) {
    let sx = p.scale_x * if p.flip_x { -1.0 } else { 1.0 };
    let sy = p.scale_y * if p.flip_y { -1.0 } else { 1.0 };
    (sx, sy)
}

/// Rotates a vector by `angle_deg` degrees, clockwise-positive.
pub fn rotate_vec(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Rotates a point around a center, clockwise-positive degrees.
pub fn rotate_point(x: f64, y: f64, cx: f64, cy: f64, angle_deg: f64) -> (f64, f64) {
    let (rx, ry) = rotate_vec(x - cx, y - cy, angle_deg);
    (cx + rx, cy + ry)
}

/// Offset from the source origin point to the left/top corner, in the
/// unrotated frame.
fn origin_offset(p: &Placement) -> (f64, f64) {
    let (sx, sy) = effective_scale(p);
    let ox = match p.origin_x {
        OriginX::Left => 0.0,
        OriginX::Center => -(p.width * sx) / 2.0,
        OriginX::Right => -(p.width * sx),
    };
    let oy = match p.origin_y {
        OriginY::Top => 0.0,
        OriginY::Center => -(p.height * sy) / 2.0,
        OriginY::Bottom => -(p.height * sy),
    };
    (ox, oy)
}

/// Computes the `(left, top)` a left/top-anchored derived object must use
/// to occupy the source's visual position after the same rotation.
pub fn derived_position(p: &Placement) -> (f64, f64) {
    let (ox, oy) = origin_offset(p);
    let (rx, ry) = rotate_vec(ox, oy, p.angle);
    (p.left + rx, p.top + ry)
}

/// The source's rendered center point, useful for verifying alignment of a
/// derived placement against its source.
pub fn rendered_center(p: &Placement) -> (f64, f64) {
    let (sx, sy) = effective_scale(p);
    let fx = match p.origin_x {
        OriginX::Left => 0.0,
        OriginX::Center => 0.5,
        OriginX::Right => 1.0,
    };
    let fy = match p.origin_y {
        OriginY::Top => 0.0,
        OriginY::Center => 0.5,
        OriginY::Bottom => 1.0,
    };
    let (rx, ry) = rotate_vec(
        (0.5 - fx) * p.width * sx,
        (0.5 - fy) * p.height * sy,
        p.angle,
    );
    (p.left + rx, p.top + ry)
}
