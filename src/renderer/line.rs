use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::Color;

/// A horizontal stroke starting at its node's origin and extending `length`
/// pixels to the right.  The stroke is centred on the origin's Y.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub length: f32,
    pub thickness: f32,
    pub color: Color,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Expand `segment` placed at `origin` into two triangles (6 vertices),
/// in the same TL-BL-TR / TR-BL-BR order the UI rect pass uses.
///
/// Segments with a non-positive length or thickness produce nothing.
pub fn tessellate(segment: &LineSegment, origin: Vec2) -> Vec<LineVertex> {
    if segment.length <= 0.0 || segment.thickness <= 0.0 {
        return Vec::new();
    }

    let half = segment.thickness / 2.0;
    let (x0, x1) = (origin.x, origin.x + segment.length);
    let (y0, y1) = (origin.y - half, origin.y + half);
    let c = segment.color.0;

    let tl = LineVertex { position: [x0, y0], color: c };
    let tr = LineVertex { position: [x1, y0], color: c };
    let bl = LineVertex { position: [x0, y1], color: c };
    let br = LineVertex { position: [x1, y1], color: c };
    vec![tl, bl, tr, tr, bl, br]
}
