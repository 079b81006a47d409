//! Pixel-level compositing primitives over straight-alpha RGBA8 images.
//!
//! Blending happens in premultiplied space (Porter-Duff source-over); inputs and outputs stay
//! straight so they can be handed to the `image` encoders directly.

use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8, premultiply, unpremultiply};

/// Alpha factor applied to the frame overlay in every deployment observed so far.
pub const OVERLAY_ALPHA: f32 = 0.6;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Crop to the centered square of side `min(width, height)`. Square input is returned as is.
pub fn crop_to_square(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == h {
        return img;
    }
    let side = w.min(h);
    let (x, y) = if w > h {
        ((w - h) / 2, 0)
    } else {
        (0, (h - w) / 2)
    };
    image::imageops::crop_imm(&img, x, y, side, side).to_image()
}

/// Lanczos3 resize to `size × size`.
pub fn resize(img: &RgbaImage, size: u32) -> PhotopostResult<RgbaImage> {
    ensure_non_degenerate(img, "resize input")?;
    if size == 0 {
        return Err(PhotopostError::render("resize target size must be > 0"));
    }
    Ok(image::imageops::resize(img, size, size, FilterType::Lanczos3))
}

/// Composite `foreground` centered on a copy of `background`.
pub fn draw_centered(background: &RgbaImage, foreground: &RgbaImage) -> PhotopostResult<RgbaImage> {
    let mut out = background.clone();
    let (left, top) = centered_origin(background, foreground);
    draw_at(&mut out, foreground, left, top, 1.0)?;
    Ok(out)
}

/// Composite `foreground` onto `base` in place, centered on `(cx, cy)`.
pub fn draw_anchored(
    base: &mut RgbaImage,
    foreground: &RgbaImage,
    cx: f64,
    cy: f64,
    opacity: f32,
) -> PhotopostResult<()> {
    let left = (cx - f64::from(foreground.width()) / 2.0).floor() as i64;
    let top = (cy - f64::from(foreground.height()) / 2.0).floor() as i64;
    draw_at(base, foreground, left, top, opacity)
}

/// Scale the overlay's alpha by `alpha_factor`, then composite it centered on a copy of `base`.
pub fn overlay_centered(
    base: &RgbaImage,
    overlay: &RgbaImage,
    alpha_factor: f32,
) -> PhotopostResult<RgbaImage> {
    let faded = scale_alpha(overlay, alpha_factor);
    let mut out = base.clone();
    let (left, top) = centered_origin(base, &faded);
    draw_at(&mut out, &faded, left, top, 1.0)?;
    Ok(out)
}

/// Same as [`overlay_centered`], anchored on `(cx, cy)` and applied in place.
pub fn overlay_anchored(
    base: &mut RgbaImage,
    overlay: &RgbaImage,
    cx: f64,
    cy: f64,
    alpha_factor: f32,
) -> PhotopostResult<()> {
    let faded = scale_alpha(overlay, alpha_factor);
    draw_anchored(base, &faded, cx, cy, 1.0)
}

/// Multiply every pixel's alpha by `factor`, rounding to the nearest integer.
pub fn scale_alpha(img: &RgbaImage, factor: f32) -> RgbaImage {
    let factor = factor.clamp(0.0, 1.0);
    let mut out = img.clone();
    for px in out.pixels_mut() {
        px.0[3] = (f32::from(px.0[3]) * factor).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Source-over a premultiplied RGBA8 buffer of the same size onto a straight image.
pub(crate) fn over_premul_buffer(base: &mut RgbaImage, src_premul: &[u8]) -> PhotopostResult<()> {
    if src_premul.len() != base.as_raw().len() {
        return Err(PhotopostError::render(
            "premultiplied layer size does not match base image",
        ));
    }
    for (d, s) in base.pixels_mut().zip(src_premul.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let blended = over(premultiply(d.0), [s[0], s[1], s[2], s[3]], 1.0);
        d.0 = unpremultiply(blended);
    }
    Ok(())
}

fn centered_origin(base: &RgbaImage, fg: &RgbaImage) -> (i64, i64) {
    (
        (i64::from(base.width()) - i64::from(fg.width())) / 2,
        (i64::from(base.height()) - i64::from(fg.height())) / 2,
    )
}

fn draw_at(
    base: &mut RgbaImage,
    fg: &RgbaImage,
    left: i64,
    top: i64,
    opacity: f32,
) -> PhotopostResult<()> {
    ensure_non_degenerate(base, "composite base")?;
    ensure_non_degenerate(fg, "composite foreground")?;

    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    for (x, y, src) in fg.enumerate_pixels() {
        let dx = left + i64::from(x);
        let dy = top + i64::from(y);
        if dx < 0 || dy < 0 || dx >= bw || dy >= bh || src.0[3] == 0 {
            continue;
        }
        let dst = base.get_pixel_mut(dx as u32, dy as u32);
        let blended = over(premultiply(dst.0), premultiply(src.0), opacity);
        dst.0 = unpremultiply(blended);
    }
    Ok(())
}

fn ensure_non_degenerate(img: &RgbaImage, what: &str) -> PhotopostResult<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PhotopostError::render(format!("{what} is zero-sized")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
