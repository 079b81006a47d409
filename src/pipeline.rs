use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use image::{ImageFormat, RgbaImage};

use crate::assets::bundle::AssetBundle;
use crate::assets::decode::decode_image;
use crate::config::{Config, StatsConfig};
use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::render::compositor::OVERLAY_ALPHA;
use crate::render::post::render_post;
use crate::render::stats::render_stats;
use crate::session::guard::{ChatId, SessionGuard};
use crate::stats::aggregate::{StatItem, aggregate};
use crate::stats::dates::{DateRange, parse_caption_date_range};
use crate::stats::usage::UsageSource;

/// One request: an optional photo, the caption, and where the result goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderJob {
    pub photo_path: Option<PathBuf>,
    pub caption: String,
    pub output_path: PathBuf,
}

/// Owns the loaded assets and the session guard, and runs render jobs end to end.
#[derive(Debug)]
pub struct Studio {
    assets: AssetBundle,
    guard: SessionGuard,
    stats: StatsConfig,
    overlay_alpha: f32,
    max_file_size: u64,
    temp_dir: PathBuf,
}

impl Studio {
    pub fn new(assets: AssetBundle, stats: StatsConfig) -> Self {
        Self {
            assets,
            guard: SessionGuard::new(),
            stats,
            overlay_alpha: OVERLAY_ALPHA,
            max_file_size: u64::MAX,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Load assets as `config` describes them.
    pub fn from_config(config: &Config) -> PhotopostResult<Self> {
        let assets = config.asset_loader().load()?;
        Ok(Self {
            overlay_alpha: config.overlay_alpha,
            max_file_size: config.max_file_size,
            temp_dir: config.temp_dir.clone(),
            ..Self::new(assets, config.stats.clone())
        })
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Fresh output path under the scratch directory, unique per chat and call.
    pub fn scratch_path(&self, chat_id: ChatId, kind: &str, extension: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        self.temp_dir
            .join(format!("{kind}_{chat_id}_{nanos}.{extension}"))
    }

    /// Read and decode a user photo, enforcing the configured size limit.
    pub fn load_photo(&self, path: &Path) -> PhotopostResult<RgbaImage> {
        let bytes = std::fs::read(path)
            .map_err(|e| PhotopostError::input(format!("read '{}': {e}", path.display())))?;
        if bytes.len() as u64 > self.max_file_size {
            return Err(PhotopostError::input(format!(
                "'{}' is {} bytes, limit is {}",
                path.display(),
                bytes.len(),
                self.max_file_size
            )));
        }
        decode_image(&bytes)
            .map_err(|e| PhotopostError::input(format!("decode '{}': {e}", path.display())))
    }

    /// Render a post for `chat_id` and write it to `job.output_path`.
    #[tracing::instrument(skip(self, job), fields(out = %job.output_path.display()))]
    pub fn render_post_job(&self, chat_id: ChatId, job: &RenderJob) -> PhotopostResult<PathBuf> {
        self.guard.run_exclusive(chat_id, || {
            let path = job
                .photo_path
                .as_deref()
                .ok_or_else(|| PhotopostError::input("a post needs a photo"))?;
            let photo = self.load_photo(path)?;
            let img = render_post(
                &self.assets.background_post,
                photo,
                self.assets.overlay.as_ref(),
                self.overlay_alpha,
                &self.assets.font_path,
                &job.caption,
            )?;
            save_image(&img, &job.output_path)?;
            tracing::info!("post rendered");
            Ok(job.output_path.clone())
        })
    }

    /// Resolve the caption's period, pull usage, and render a stats image for `chat_id`.
    ///
    /// The photo is optional here: one that cannot be read or decoded is logged and left out.
    #[tracing::instrument(skip(self, job, source), fields(out = %job.output_path.display()))]
    pub fn render_stats_job(
        &self,
        chat_id: ChatId,
        job: &RenderJob,
        source: &dyn UsageSource,
        today: NaiveDate,
    ) -> PhotopostResult<PathBuf> {
        self.guard.run_exclusive(chat_id, || {
            let range = parse_caption_date_range(&job.caption, today)?;
            let items = self.collect_stats(source, range)?;
            let photo = job.photo_path.as_deref().and_then(|path| {
                self.load_photo(path)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "user photo unavailable, rendering without it")
                    })
                    .ok()
            });
            let img = render_stats(
                &self.assets.background_stats,
                &items,
                &job.caption,
                photo,
                self.assets.overlay.as_ref(),
                self.overlay_alpha,
                &self.assets.font_path,
            )?;
            save_image(&img, &job.output_path)?;
            tracing::info!(items = items.len(), "stats rendered");
            Ok(job.output_path.clone())
        })
    }

    /// Fetch usage for `range` and fold it into display items.
    pub fn collect_stats(
        &self,
        source: &dyn UsageSource,
        range: DateRange,
    ) -> PhotopostResult<Vec<StatItem>> {
        let lookup = source.project_lookup()?;
        let records = source.usage(range)?;
        let items = aggregate(&records, &lookup, &self.stats.mappings, &self.stats.other);
        if items.is_empty() {
            return Err(PhotopostError::empty(format!(
                "nothing tracked between {} and {}",
                range.start, range.end
            )));
        }
        Ok(items)
    }
}

/// Write `img` as JPEG (quality 100) for `.jpg`/`.jpeg` paths and PNG otherwise.
pub fn save_image(img: &RgbaImage, path: &Path) -> PhotopostResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create '{}'", path.display()))?;
        let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
        image::codecs::jpeg::JpegEncoder::new_with_quality(BufWriter::new(file), 100)
            .encode_image(&rgb)
            .with_context(|| format!("encode jpeg '{}'", path.display()))?;
    } else {
        img.save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("encode png '{}'", path.display()))?;
    }
    Ok(())
}
