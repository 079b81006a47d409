use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{PhotopostError, PhotopostResult};

/// Decode an encoded raster (PNG, JPEG, ...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotopostResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn open_image(path: impl AsRef<Path>) -> PhotopostResult<RgbaImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
        .map_err(|e| PhotopostError::Other(anyhow::anyhow!("decode image '{}': {e}", path.display())))
}
