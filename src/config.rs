//! YAML configuration with `PHOTOPOST_*` environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::bundle::AssetLoader;
use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::render::compositor::OVERLAY_ALPHA;
use crate::stats::aggregate::ProjectMapping;
use crate::stats::usage::{DEFAULT_REPORTING_URL, ReportingClient};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub background_file: String,
    /// Separate background for stats images; the post background is reused when unset.
    pub background_stats_file: Option<String>,
    pub overlay_file: Option<String>,
    pub font_file: String,
    pub temp_dir: PathBuf,
    /// Largest accepted input photo, in bytes.
    pub max_file_size: u64,
    pub overlay_alpha: f32,
    pub reporting: ReportingConfig,
    pub stats: StatsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            background_file: "background.png".to_string(),
            background_stats_file: None,
            overlay_file: None,
            font_file: "font.ttf".to_string(),
            temp_dir: std::env::temp_dir().join("photopost"),
            max_file_size: 20 * 1024 * 1024,
            overlay_alpha: OVERLAY_ALPHA,
            reporting: ReportingConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    pub base_url: String,
    pub token: String,
    pub workspace: i64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REPORTING_URL.to_string(),
            token: String::new(),
            workspace: 0,
        }
    }
}

impl ReportingConfig {
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && self.workspace > 0
    }

    pub fn client(&self) -> PhotopostResult<ReportingClient> {
        if !self.is_configured() {
            return Err(PhotopostError::config(
                "reporting token and workspace must both be set",
            ));
        }
        ReportingClient::new(&self.base_url, &self.token, self.workspace)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub mappings: Vec<ProjectMapping>,
    pub other: ProjectMapping,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            other: ProjectMapping {
                display_name: "other".to_string(),
                color: "#D35400".to_string(),
                aliases: Vec::new(),
            },
        }
    }
}

impl Config {
    /// Read `path` if it exists (defaults otherwise), then apply environment overrides.
    pub fn load(path: &Path) -> PhotopostResult<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> PhotopostResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PhotopostError::config(format!("read '{}': {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(s: &str) -> PhotopostResult<Self> {
        serde_yaml::from_str(s).map_err(|e| PhotopostError::config(format!("parse config: {e}")))
    }

    /// Apply `PHOTOPOST_*` overrides read through `lookup`.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("PHOTOPOST_ASSETS_DIR") {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PHOTOPOST_TEMP_DIR") {
            self.temp_dir = PathBuf::from(dir);
        }
        if let Some(token) = lookup("PHOTOPOST_REPORTING_TOKEN") {
            self.reporting.token = token;
        }
        if let Some(ws) = lookup("PHOTOPOST_REPORTING_WORKSPACE") {
            match ws.trim().parse() {
                Ok(v) => self.reporting.workspace = v,
                Err(_) => tracing::warn!(value = %ws, "invalid PHOTOPOST_REPORTING_WORKSPACE ignored"),
            }
        }
    }

    pub fn validate(&self) -> PhotopostResult<()> {
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(PhotopostError::config(format!(
                "overlay_alpha must be within 0..=1, got {}",
                self.overlay_alpha
            )));
        }
        if self.max_file_size == 0 {
            return Err(PhotopostError::config("max_file_size must be > 0"));
        }
        if self.background_file.is_empty() || self.font_file.is_empty() {
            return Err(PhotopostError::config(
                "background_file and font_file must be set",
            ));
        }
        Ok(())
    }

    pub fn asset_loader(&self) -> AssetLoader {
        let mut loader = AssetLoader::new(&self.assets_dir, &self.background_file, &self.font_file);
        if let Some(file) = &self.background_stats_file {
            loader = loader.with_background_stats(self.assets_dir.join(file));
        }
        if let Some(file) = &self.overlay_file {
            loader = loader.with_overlay(self.assets_dir.join(file));
        }
        loader
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
