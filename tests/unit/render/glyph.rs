use super::*;

fn bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut b = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for p in points {
        b.0 = b.0.min(p.x);
        b.1 = b.1.min(p.y);
        b.2 = b.2.max(p.x);
        b.3 = b.3.max(p.y);
    }
    b
}

#[test]
fn reference_edges_face_the_text() {
    let max_left = LEFT_WING.points.iter().map(|p| p.0).fold(f64::MIN, f64::max);
    let min_right = RIGHT_WING.points.iter().map(|p| p.0).fold(f64::MAX, f64::min);
    assert_eq!(max_left, LEFT_WING.ref_x);
    assert_eq!(min_right, RIGHT_WING.ref_x);
}

#[test]
fn wings_flank_the_anchor_without_overlapping_it() {
    let anchor = Point::new(410.0, 260.0);
    let [left, right] = wing_polygons(anchor, 120.0);
    assert_eq!(left.len(), 5);
    assert_eq!(right.len(), 5);

    let margin = wing_margin(120.0);
    let (_, _, left_max_x, _) = bounds(&left);
    let (right_min_x, _, _, _) = bounds(&right);
    assert!((left_max_x - (anchor.x - margin)).abs() < 1e-9);
    assert!((right_min_x - (anchor.x + margin)).abs() < 1e-9);
}

#[test]
fn placed_points_scale_linearly_about_the_anchor() {
    let anchor = Point::new(0.0, 0.0);
    let a = LEFT_WING.place(anchor, 1.0);
    let b = LEFT_WING.place(anchor, 2.5);
    for (p, q) in a.iter().zip(&b) {
        assert!((q.x - p.x * 2.5).abs() < 1e-9);
        assert!((q.y - p.y * 2.5).abs() < 1e-9);
    }
}

#[test]
fn glyph_height_is_proportional_to_font_size() {
    let h = |size: f64| {
        let [left, _] = wing_polygons(Point::new(0.0, 0.0), size);
        let (_, y0, _, y1) = bounds(&left);
        y1 - y0
    };
    let ratio = h(200.0) / h(100.0);
    assert!((ratio - 2.0).abs() < 1e-9);
    // At the design size the wing spans its authored height times the design scale.
    assert!((h(DESIGN_FONT_SIZE) - (338.1 - 209.59) * DESIGN_SCALE).abs() < 1e-9);
}

#[test]
fn wings_share_vertical_reference() {
    let anchor = Point::new(100.0, 50.0);
    let [left, right] = wing_polygons(anchor, DESIGN_FONT_SIZE);
    let (_, ly0, _, ly1) = bounds(&left);
    let (_, ry0, _, ry1) = bounds(&right);
    assert!((ly0 - ry0).abs() < 0.1);
    assert!((ly1 - ry1).abs() < 0.1);
}
