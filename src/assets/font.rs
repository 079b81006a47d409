use std::path::Path;

use image::Rgba;

use crate::foundation::error::{PhotopostError, PhotopostResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba<u8>> for TextBrushRgba8 {
    fn from(c: Rgba<u8>) -> Self {
        let [r, g, b, a] = c.0;
        Self { r, g, b, a }
    }
}

/// A single shaped line of text together with the font needed to rasterize it.
pub(crate) struct TextLine {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
}

impl TextLine {
    pub(crate) fn layout(&self) -> &parley::Layout<TextBrushRgba8> {
        &self.layout
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Advance width of the line in pixels, trailing whitespace excluded.
    pub(crate) fn width(&self) -> f32 {
        self.layout.width()
    }

    pub(crate) fn height(&self) -> f32 {
        self.layout.height()
    }
}

/// Stateful helper for shaping single-line text from one font file.
///
/// The font is registered once; every layout reuses the same Parley contexts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Load and register the font at `path`.
    pub(crate) fn from_font_file(path: &Path) -> PhotopostResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            PhotopostError::asset(format!("failed to read font '{}': {e}", path.display()))
        })?;
        let engine = Self::from_font_bytes(bytes)
            .map_err(|e| PhotopostError::asset(format!("font '{}': {e}", path.display())))?;
        tracing::debug!(family = engine.family_name(), path = %path.display(), "font registered");
        Ok(engine)
    }

    pub(crate) fn from_font_bytes(bytes: Vec<u8>) -> PhotopostResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PhotopostError::render("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PhotopostError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` as one unbroken line at `size_px`.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba<u8>,
    ) -> PhotopostResult<TextLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PhotopostError::render("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(TextLine {
            layout,
            font: self.font.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
