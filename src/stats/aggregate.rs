use std::collections::HashMap;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::assets::color::{FALLBACK_GRAY, parse_hex_color};

/// Most items a stats image can show; the last slot turns into "other" on overflow.
pub const MAX_ITEMS: usize = 6;

/// One tracked-time record as delivered by the reporting source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUsageRecord {
    #[serde(rename = "user_id")]
    pub owner_id: i64,
    pub project_id: i64,
    pub tracked_seconds: u64,
}

/// Project id to raw project name.
#[derive(Clone, Debug, Default)]
pub struct ProjectLookup {
    names: HashMap<i64, String>,
}

impl ProjectLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: i64, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Raw name for `id`; ids the table does not know resolve to `project <id>`.
    pub fn resolve(&self, id: i64) -> String {
        match self.names.get(&id) {
            Some(name) => name.clone(),
            None => format!("project {id}"),
        }
    }
}

impl FromIterator<(i64, String)> for ProjectLookup {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Display rule for a group of raw project names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMapping {
    pub display_name: String,
    /// `#RRGGBB`; anything else renders gray.
    pub color: String,
    #[serde(default, alias = "toggl_names")]
    pub aliases: Vec<String>,
}

impl ProjectMapping {
    fn matches(&self, folded: &str) -> bool {
        self.aliases.iter().any(|a| a.to_lowercase() == folded)
    }
}

/// One ranked row of the stats image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatItem {
    pub label: String,
    /// `HH:MM`, truncated to whole minutes.
    pub duration_text: String,
    pub color: Rgba<u8>,
    pub seconds: u64,
}

/// `HH:MM` with zero-padded, unbounded hours. Leftover seconds are dropped.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

pub fn total_seconds(items: &[StatItem]) -> u64 {
    items.iter().map(|i| i.seconds).fold(0, u64::saturating_add)
}

struct Bucket {
    label: String,
    color: Rgba<u8>,
    seconds: u64,
}

/// Fold raw records into at most [`MAX_ITEMS`] ranked items.
///
/// Records whose project name matches a mapping alias (case-insensitively) accumulate under
/// that mapping's display name; the rest accumulate under their case-folded raw name in
/// [`FALLBACK_GRAY`]. On overflow the top five survive and everything else is summed into a
/// final bucket labeled and colored from `other`.
pub fn aggregate(
    records: &[RawUsageRecord],
    lookup: &ProjectLookup,
    mappings: &[ProjectMapping],
    other: &ProjectMapping,
) -> Vec<StatItem> {
    let mut order: Vec<Bucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.tracked_seconds > 0) {
        let folded = lookup.resolve(record.project_id).to_lowercase();
        let (label, color) = match mappings.iter().find(|m| m.matches(&folded)) {
            Some(m) => (m.display_name.clone(), parse_hex_color(&m.color)),
            None => (folded, FALLBACK_GRAY),
        };

        let slot = *index.entry(label.clone()).or_insert_with(|| {
            order.push(Bucket {
                label,
                color,
                seconds: 0,
            });
            order.len() - 1
        });
        order[slot].seconds = order[slot].seconds.saturating_add(record.tracked_seconds);
    }

    order.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.label.cmp(&b.label)));
    tracing::debug!(buckets = order.len(), "usage aggregated");

    if order.len() > MAX_ITEMS {
        let rest = order[MAX_ITEMS - 1..]
            .iter()
            .map(|b| b.seconds)
            .fold(0, u64::saturating_add);
        order.truncate(MAX_ITEMS - 1);
        order.push(Bucket {
            label: other.display_name.clone(),
            color: parse_hex_color(&other.color),
            seconds: rest,
        });
    }

    order
        .into_iter()
        .map(|b| StatItem {
            duration_text: format_duration(b.seconds),
            label: b.label,
            color: b.color,
            seconds: b.seconds,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/stats/aggregate.rs"]
mod tests;
