use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::assets::font::TextLayoutEngine;
use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::render::compositor::{crop_to_square, draw_centered, overlay_centered, resize};
use crate::render::vector::{TextPlacement, VectorLayer};

pub const CAPTION_COLOR: Rgba<u8> = Rgba([33, 35, 50, 255]);

/// Geometry of a post image, derived from the background size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostLayout {
    pub font_size: f32,
    pub caption_center: (f64, f64),
    pub photo_size: u32,
}

impl PostLayout {
    pub fn for_background(width: u32, height: u32) -> Self {
        let longest = width.max(height) as f32;
        Self {
            font_size: longest / 1000.0 * 85.0,
            caption_center: (f64::from(width) / 2.0, f64::from(height) * 0.86),
            photo_size: width * 6 / 10,
        }
    }
}

/// Render a post: caption on the background, the cropped photo centered, then the faded frame.
#[tracing::instrument(skip(background, user_photo, overlay), fields(w = background.width(), h = background.height()))]
pub fn render_post(
    background: &RgbaImage,
    user_photo: RgbaImage,
    overlay: Option<&RgbaImage>,
    overlay_alpha: f32,
    font_path: &Path,
    caption: &str,
) -> PhotopostResult<RgbaImage> {
    if background.width() == 0 || background.height() == 0 {
        return Err(PhotopostError::asset("post background is empty"));
    }
    if user_photo.width() == 0 || user_photo.height() == 0 {
        return Err(PhotopostError::input("user photo is empty"));
    }

    let layout = PostLayout::for_background(background.width(), background.height());
    let mut engine = TextLayoutEngine::from_font_file(font_path)?;

    let mut out = background.clone();
    if !caption.trim().is_empty() {
        let line = engine.layout_line(caption, layout.font_size, CAPTION_COLOR)?;
        tracing::debug!(width = line.width(), size = layout.font_size, "caption laid out");
        let mut layer = VectorLayer::for_image(&out)?;
        let (cx, cy) = layout.caption_center;
        layer.fill_text(&line, TextPlacement::centered(cx, cy));
        layer.composite_onto(&mut out)?;
    }

    let photo = resize(&crop_to_square(user_photo), layout.photo_size)?;
    let mut out = draw_centered(&out, &photo)?;

    if let Some(overlay) = overlay {
        match overlay_centered(&out, overlay, overlay_alpha) {
            Ok(img) => out = img,
            Err(e) => tracing::warn!(error = %e, "overlay skipped"),
        }
    }
    Ok(out)
}
