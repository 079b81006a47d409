//! The decorative "wing" glyph drawn on both sides of every duration figure.
//!
//! Control points are authored in a 125.5 px design space and anchored on a reference point
//! (`ref_x`, [`WING_REF_Y`]); at draw time they are scaled relative to the font size and
//! translated onto the wing anchor.

use kurbo::Point;

/// Font size the control points were authored at.
const DESIGN_FONT_SIZE: f64 = 125.5;
/// Extra shrink applied on top of the font-size ratio.
const DESIGN_SCALE: f64 = 0.77;
/// Distance between each wing anchor and the text anchor, minus the font size.
const ANCHOR_INSET: f64 = 10.0;
/// Vertical reference shared by both wings.
pub(crate) const WING_REF_Y: f64 = 255.85;

/// One side of the glyph pair.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WingShape {
    pub(crate) points: &'static [(f64, f64)],
    /// x of the edge that faces the text; it becomes the wing anchor.
    pub(crate) ref_x: f64,
}

pub(crate) const LEFT_WING: WingShape = WingShape {
    points: &[
        (199.4, 338.1),
        (236.9, 338.1),
        (251.85, 209.59),
        (215.42, 209.59),
        (235.54, 275.79),
    ],
    ref_x: 251.85,
};

pub(crate) const RIGHT_WING: WingShape = WingShape {
    points: &[
        (513.73, 338.16),
        (551.23, 338.16),
        (531.12, 275.85),
        (567.24, 209.65),
        (528.57, 209.65),
    ],
    ref_x: 513.73,
};

pub(crate) fn wing_scale(font_size: f64) -> f64 {
    font_size / DESIGN_FONT_SIZE * DESIGN_SCALE
}

pub(crate) fn wing_margin(font_size: f64) -> f64 {
    font_size - ANCHOR_INSET
}

impl WingShape {
    /// Scale the control points and place the reference point on `anchor`.
    pub(crate) fn place(&self, anchor: Point, scale: f64) -> Vec<Point> {
        self.points
            .iter()
            .map(|&(x, y)| {
                Point::new(
                    anchor.x + (x - self.ref_x) * scale,
                    anchor.y + (y - WING_REF_Y) * scale,
                )
            })
            .collect()
    }
}

/// Left and right wing polygons flanking a duration figure centered on `text_anchor`.
pub(crate) fn wing_polygons(text_anchor: Point, font_size: f64) -> [Vec<Point>; 2] {
    let scale = wing_scale(font_size);
    let margin = wing_margin(font_size);
    [
        LEFT_WING.place(Point::new(text_anchor.x - margin, text_anchor.y), scale),
        RIGHT_WING.place(Point::new(text_anchor.x + margin, text_anchor.y), scale),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
