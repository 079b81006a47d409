use std::path::Path;

use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect};

use crate::assets::font::TextLayoutEngine;
use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::render::compositor::{crop_to_square, draw_anchored, overlay_anchored, resize};
use crate::render::glyph::wing_polygons;
use crate::render::vector::{TextPlacement, VectorLayer};
use crate::stats::aggregate::{MAX_ITEMS, StatItem, format_duration, total_seconds};

pub const LABEL_COLOR: Rgba<u8> = Rgba([20, 30, 40, 255]);
pub const FOOTER_TITLE_COLOR: Rgba<u8> = Rgba([33, 35, 50, 255]);
pub const FOOTER_TOTAL_COLOR: Rgba<u8> = Rgba([135, 255, 198, 255]);

/// Placement constants for the stats image.
///
/// Column and row positions are absolute pixels tuned for the 1350 px wide reference
/// background; every other value is a fraction of the background's width or height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsLayout {
    pub left_column_x: f64,
    pub right_column_x: f64,
    pub first_row_y: f64,
    pub row_step: f64,
    pub label_offset: f64,
    pub rows_per_column: usize,
    pub time_size: f64,
    pub label_size: f64,
    pub total_size: f64,
    /// Duration text wider than `time_size` times this is squeezed horizontally.
    pub max_time_width_factor: f64,
    pub photo_center: (f64, f64),
    pub photo_size: f64,
    pub overlay_scale: f64,
    pub bar_center_y: f64,
    pub bar_height: f64,
    pub bar_gap: f64,
    pub footer_center: (f64, f64),
    pub footer_total_offset: f64,
}

impl Default for StatsLayout {
    fn default() -> Self {
        Self {
            left_column_x: 410.0,
            right_column_x: 900.0,
            first_row_y: 260.0,
            row_step: 235.0,
            label_offset: 110.0,
            rows_per_column: 3,
            time_size: 0.145,
            label_size: 0.05,
            total_size: 0.075,
            max_time_width_factor: 1.8,
            photo_center: (0.75, 0.43),
            photo_size: 0.45,
            overlay_scale: 1.04,
            bar_center_y: 0.42,
            bar_height: 0.008,
            bar_gap: 2.0,
            footer_center: (0.75, 0.70),
            footer_total_offset: 0.065,
        }
    }
}

impl StatsLayout {
    /// Anchor of the duration text for the item at `index`.
    pub fn item_anchor(&self, index: usize) -> Point {
        let (x, row) = if index < self.rows_per_column {
            (self.left_column_x, index)
        } else {
            (self.right_column_x, index - self.rows_per_column)
        };
        Point::new(x, self.first_row_y + row as f64 * self.row_step)
    }

    /// Activity bar rectangle under the photo insert of a `width × height` background.
    pub fn bar_rect(&self, width: f64, height: f64) -> Rect {
        let size = height * self.photo_size;
        let x0 = width * self.photo_center.0 - size / 2.0;
        let y0 = height * self.bar_center_y + size / 2.0 + self.bar_gap;
        Rect::new(x0, y0, x0 + size, y0 + height * self.bar_height)
    }
}

/// One colored run of the activity bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSegment {
    pub x: f64,
    pub width: f64,
    pub color: Rgba<u8>,
}

/// Split `width` pixels starting at `x` into edge-to-edge runs proportional to each item's seconds.
pub fn activity_segments(items: &[StatItem], x: f64, width: f64) -> Vec<BarSegment> {
    let total = total_seconds(items);
    if total == 0 {
        return Vec::new();
    }

    let mut cursor = x;
    let mut out = Vec::with_capacity(items.len());
    for item in items.iter().filter(|i| i.seconds > 0) {
        let w = width * item.seconds as f64 / total as f64;
        out.push(BarSegment {
            x: cursor,
            width: w,
            color: item.color,
        });
        cursor += w;
    }
    out
}

/// Render the stats image.
///
/// The photo insert and its frame go down first so the activity bar and text stay on top.
/// Items beyond [`MAX_ITEMS`] are ignored.
#[tracing::instrument(
    skip(background, items, user_photo, overlay),
    fields(w = background.width(), h = background.height(), count = items.len())
)]
pub fn render_stats(
    background: &RgbaImage,
    items: &[StatItem],
    title: &str,
    user_photo: Option<RgbaImage>,
    overlay: Option<&RgbaImage>,
    overlay_alpha: f32,
    font_path: &Path,
) -> PhotopostResult<RgbaImage> {
    if background.width() == 0 || background.height() == 0 {
        return Err(PhotopostError::asset("stats background is empty"));
    }
    let layout = StatsLayout::default();
    let (w, h) = (f64::from(background.width()), f64::from(background.height()));
    let items = &items[..items.len().min(MAX_ITEMS)];
    let mut engine = TextLayoutEngine::from_font_file(font_path)?;

    let mut out = background.clone();
    let has_photo = match user_photo {
        Some(photo) if photo.width() > 0 && photo.height() > 0 => {
            draw_photo_insert(&mut out, &layout, photo, overlay, overlay_alpha)?;
            true
        }
        _ => false,
    };

    let time_size = h * layout.time_size;
    let label_size = h * layout.label_size;
    let mut layer = VectorLayer::for_image(&out)?;

    for (index, item) in items.iter().enumerate() {
        let anchor = layout.item_anchor(index);
        for wing in wing_polygons(anchor, time_size) {
            layer.fill_polygon(&wing, item.color);
        }

        let time = engine.layout_line(&item.duration_text, time_size as f32, item.color)?;
        let max_width = time_size * layout.max_time_width_factor;
        let placement =
            TextPlacement::centered(anchor.x, anchor.y).fit_width(f64::from(time.width()), max_width);
        if placement.x_scale < 1.0 {
            tracing::debug!(index, x_scale = placement.x_scale, "duration text squeezed");
        }
        layer.fill_text(&time, placement);

        let label = engine.layout_line(&item.label, label_size as f32, LABEL_COLOR)?;
        layer.fill_text(
            &label,
            TextPlacement::centered(anchor.x, anchor.y + layout.label_offset),
        );
    }

    let total = total_seconds(items);
    if total > 0 && has_photo {
        let bar = layout.bar_rect(w, h);
        for seg in activity_segments(items, bar.x0, bar.width()) {
            layer.fill_rect(Rect::new(seg.x, bar.y0, seg.x + seg.width, bar.y1), seg.color);
        }
    }

    draw_footer(&mut layer, &mut engine, &layout, w, h, title, total)?;
    layer.composite_onto(&mut out)?;
    Ok(out)
}

fn draw_photo_insert(
    out: &mut RgbaImage,
    layout: &StatsLayout,
    photo: RgbaImage,
    overlay: Option<&RgbaImage>,
    overlay_alpha: f32,
) -> PhotopostResult<()> {
    let (w, h) = (f64::from(out.width()), f64::from(out.height()));
    let cx = (w * layout.photo_center.0).trunc();
    let cy = (h * layout.photo_center.1).trunc();
    let size = (h * layout.photo_size) as u32;

    let photo = resize(&crop_to_square(photo), size)?;
    draw_anchored(out, &photo, cx, cy, 1.0)?;

    if let Some(overlay) = overlay {
        let frame_size = (f64::from(size) * layout.overlay_scale) as u32;
        match resize(overlay, frame_size) {
            Ok(frame) => overlay_anchored(out, &frame, cx, cy, overlay_alpha)?,
            Err(e) => tracing::warn!(error = %e, "photo frame skipped"),
        }
    }
    Ok(())
}

fn draw_footer(
    layer: &mut VectorLayer,
    engine: &mut TextLayoutEngine,
    layout: &StatsLayout,
    w: f64,
    h: f64,
    title: &str,
    total: u64,
) -> PhotopostResult<()> {
    let (fx, fy) = (w * layout.footer_center.0, h * layout.footer_center.1);

    let title = title.trim().to_uppercase();
    if !title.is_empty() {
        let line = engine.layout_line(&title, (h * layout.label_size) as f32, FOOTER_TITLE_COLOR)?;
        layer.fill_text(&line, TextPlacement::centered(fx, fy));
    }

    let line = engine.layout_line(
        &format_duration(total),
        (h * layout.total_size) as f32,
        FOOTER_TOTAL_COLOR,
    )?;
    layer.fill_text(
        &line,
        TextPlacement::centered(fx, fy + h * layout.footer_total_offset),
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/stats.rs"]
mod tests;
