use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::assets::decode::open_image;
use crate::foundation::error::{PhotopostError, PhotopostResult};

/// Decoded brand assets shared by every render. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct AssetBundle {
    pub background_post: RgbaImage,
    pub background_stats: RgbaImage,
    pub overlay: Option<RgbaImage>,
    pub font_path: PathBuf,
}

/// Resolved asset file locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetLoader {
    pub background: PathBuf,
    /// Falls back to `background` when unset.
    pub background_stats: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub font: PathBuf,
}

impl AssetLoader {
    pub fn new(dir: &Path, background: &str, font: &str) -> Self {
        Self {
            background: dir.join(background),
            background_stats: None,
            overlay: None,
            font: dir.join(font),
        }
    }

    pub fn with_background_stats(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_stats = Some(path.into());
        self
    }

    pub fn with_overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay = Some(path.into());
        self
    }

    /// Decode the backgrounds and the optional overlay, and check the font exists.
    ///
    /// A missing or broken overlay is logged and left out; everything else is fatal.
    #[tracing::instrument(skip(self), fields(background = %self.background.display()))]
    pub fn load(&self) -> PhotopostResult<AssetBundle> {
        let background_post = load_required(&self.background, "background")?;
        let background_stats = match &self.background_stats {
            Some(path) if path != &self.background => load_required(path, "stats background")?,
            _ => background_post.clone(),
        };

        let overlay = self.overlay.as_ref().and_then(|path| match open_image(path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "overlay unavailable, rendering without it");
                None
            }
        });

        if !self.font.is_file() {
            return Err(PhotopostError::asset(format!(
                "font '{}' not found",
                self.font.display()
            )));
        }

        tracing::info!(
            post = ?background_post.dimensions(),
            stats = ?background_stats.dimensions(),
            overlay = overlay.is_some(),
            "assets loaded"
        );
        Ok(AssetBundle {
            background_post,
            background_stats,
            overlay,
            font_path: self.font.clone(),
        })
    }
}

fn load_required(path: &Path, what: &str) -> PhotopostResult<RgbaImage> {
    open_image(path).map_err(|e| PhotopostError::asset(format!("{what} '{}': {e}", path.display())))
}
