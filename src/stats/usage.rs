//! Sources of raw tracked-time records.
//!
//! [`ReportingClient`] talks to the hosted reporting API; [`JsonUsageFile`] replays a saved
//! export so stats images can be rendered offline.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::stats::aggregate::{ProjectLookup, RawUsageRecord};
use crate::stats::dates::DateRange;

pub const DEFAULT_REPORTING_URL: &str = "https://api.track.toggl.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can name projects and list tracked time for a date range.
pub trait UsageSource {
    fn project_lookup(&self) -> PhotopostResult<ProjectLookup>;
    fn usage(&self, range: DateRange) -> PhotopostResult<Vec<RawUsageRecord>>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
struct SummaryRequest {
    start_date: String,
    end_date: String,
}

impl From<DateRange> for SummaryRequest {
    fn from(r: DateRange) -> Self {
        Self {
            start_date: r.start.format("%Y-%m-%d").to_string(),
            end_date: r.end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Blocking client for the workspace reporting API.
pub struct ReportingClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    workspace: i64,
}

impl ReportingClient {
    pub fn new(base_url: &str, token: &str, workspace: i64) -> PhotopostResult<Self> {
        if token.is_empty() {
            return Err(PhotopostError::config("reporting token is empty"));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build reporting http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            workspace,
        })
    }

    fn summary_url(&self) -> String {
        format!(
            "{}/reports/api/v3/workspace/{}/projects/summary",
            self.base_url, self.workspace
        )
    }

    fn projects_url(&self) -> String {
        format!("{}/api/v9/workspaces/{}/projects", self.base_url, self.workspace)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        what: &str,
        resp: reqwest::Result<reqwest::blocking::Response>,
    ) -> PhotopostResult<T> {
        let resp = resp.map_err(|e| PhotopostError::fetch(format!("{what}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(PhotopostError::fetch(format!(
                "{what}: HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }
        resp.json::<T>()
            .map_err(|e| PhotopostError::fetch(format!("{what}: decode response: {e}")))
    }
}

impl UsageSource for ReportingClient {
    #[tracing::instrument(skip(self), fields(workspace = self.workspace))]
    fn project_lookup(&self) -> PhotopostResult<ProjectLookup> {
        let resp = self
            .http
            .get(self.projects_url())
            .basic_auth(&self.token, Some("api_token"))
            .send();
        let projects: Vec<ProjectInfo> = Self::read_json("list projects", resp)?;
        tracing::debug!(count = projects.len(), "projects fetched");
        Ok(projects.into_iter().map(|p| (p.id, p.name)).collect())
    }

    #[tracing::instrument(skip(self), fields(workspace = self.workspace))]
    fn usage(&self, range: DateRange) -> PhotopostResult<Vec<RawUsageRecord>> {
        let resp = self
            .http
            .post(self.summary_url())
            .basic_auth(&self.token, Some("api_token"))
            .json(&SummaryRequest::from(range))
            .send();
        let records: Vec<RawUsageRecord> = Self::read_json("projects summary", resp)?;
        tracing::debug!(count = records.len(), "usage records fetched");
        Ok(records)
    }
}

/// Offline export: project names plus records that are already filtered to one period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonUsageFile {
    #[serde(default)]
    pub projects: Vec<ProjectInfo>,
    #[serde(default)]
    pub records: Vec<RawUsageRecord>,
}

impl JsonUsageFile {
    pub fn from_json_str(s: &str) -> PhotopostResult<Self> {
        Ok(serde_json::from_str(s).context("parse usage json")?)
    }

    pub fn load(path: impl AsRef<Path>) -> PhotopostResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PhotopostError::input(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

impl UsageSource for JsonUsageFile {
    fn project_lookup(&self) -> PhotopostResult<ProjectLookup> {
        Ok(self.projects.iter().map(|p| (p.id, p.name.clone())).collect())
    }

    /// The export carries no dates, so every record counts regardless of `range`.
    fn usage(&self, _range: DateRange) -> PhotopostResult<Vec<RawUsageRecord>> {
        Ok(self.records.clone())
    }
}
