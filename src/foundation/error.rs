/// Convenience result type used across photopost.
pub type PhotopostResult<T> = Result<T, PhotopostError>;

/// Top-level error taxonomy used by the rendering and aggregation APIs.
///
/// Every variant except [`PhotopostError::Other`] is fatal to a single job, never to the process.
#[derive(thiserror::Error, Debug)]
pub enum PhotopostError {
    /// A background image or font could not be loaded or decoded.
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    /// The user-supplied photo is missing or undecodable.
    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    /// No tracked time exists for the resolved date range.
    #[error("no usage data: {0}")]
    AggregationEmpty(String),

    /// The caption is blank or otherwise yields no date range.
    #[error("date range unparsable: {0}")]
    DateRangeUnparsable(String),

    /// Another render is already in flight for this chat.
    #[error("chat {chat_id} already has a render in flight")]
    AdmissionRejected {
        /// Chat that was refused.
        chat_id: i64,
    },

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The reporting collaborator failed to deliver usage data.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotopostError {
    /// Build a [`PhotopostError::AssetUnavailable`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::AssetUnavailable(msg.into())
    }

    /// Build a [`PhotopostError::InputUnavailable`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InputUnavailable(msg.into())
    }

    /// Build a [`PhotopostError::AggregationEmpty`] value.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::AggregationEmpty(msg.into())
    }

    /// Build a [`PhotopostError::DateRangeUnparsable`] value.
    pub fn date_range(msg: impl Into<String>) -> Self {
        Self::DateRangeUnparsable(msg.into())
    }

    /// Build a [`PhotopostError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PhotopostError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PhotopostError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// `true` for the normal "busy" outcome of admission control.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::AdmissionRejected { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
