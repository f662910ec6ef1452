use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::model::FleetSnapshot;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fleet backend unavailable: {0}")]
    Unavailable(String),
    #[error("fleet backend rejected the query: {0}")]
    Rejected(String),
    #[error("malformed fleet response: {0}")]
    Malformed(String),
    #[error("fleet query timed out after {0:?}")]
    Timeout(Duration),
}

/// Anything able to produce a fresh [`FleetSnapshot`].
#[async_trait]
pub trait FleetSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    async fn fetch_snapshot(&self) -> Result<FleetSnapshot, FetchError>;
}

/// Where rendered snapshots and error messages go.
#[async_trait]
pub trait RenderSink: Send + Sync {
    async fn render_snapshot(&self, snapshot: &FleetSnapshot);

    /// Must leave whatever was rendered last untouched.
    async fn render_error(&self, message: &str);
}
