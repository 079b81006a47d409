//! photopost renders branded images for a chat bot.
//!
//! Two outputs are supported:
//!
//! - a **post**: a user photo framed on the brand background with a caption
//! - a **stats** card: up to six ranked time-tracking categories with wing glyphs, an activity
//!   bar under the user photo, and a footer total
//!
//! [`Studio`] ties the pieces together: it holds the loaded [`AssetBundle`], admits at most one
//! render per chat through [`SessionGuard`], and persists the result.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub mod config;
pub mod pipeline;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod stats;

pub use crate::assets::bundle::{AssetBundle, AssetLoader};
pub use crate::assets::color::{FALLBACK_GRAY, parse_hex_color};
pub use crate::assets::decode::{decode_image, open_image};
pub use crate::config::{Config, ReportingConfig, StatsConfig};
pub use crate::foundation::error::{PhotopostError, PhotopostResult};
pub use crate::pipeline::{RenderJob, Studio, save_image};
pub use crate::render::compositor::{
    OVERLAY_ALPHA, crop_to_square, draw_anchored, draw_centered, overlay_anchored,
    overlay_centered, resize, scale_alpha,
};
pub use crate::render::post::{PostLayout, render_post};
pub use crate::render::stats::{BarSegment, StatsLayout, activity_segments, render_stats};
pub use crate::session::guard::{ChatId, RenderMode, RenderPermit, SessionGuard};
pub use crate::stats::aggregate::{
    MAX_ITEMS, ProjectLookup, ProjectMapping, RawUsageRecord, StatItem, aggregate,
    format_duration, total_seconds,
};
pub use crate::stats::dates::{DateRange, parse_caption_date_range, parse_caption_date_range_now};
pub use crate::stats::usage::{
    DEFAULT_REPORTING_URL, JsonUsageFile, ProjectInfo, ReportingClient, UsageSource,
};
