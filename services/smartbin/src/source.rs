//! Reading source trait

use async_trait::async_trait;

use crate::reading::BinReading;

/// Where bin readings come from
#[async_trait]
pub trait ReadingSource: Send + Sync + std::fmt::Debug {
    /// Source name used in logs and status reports
    fn name(&self) -> &str;

    /// Fetch the latest reading of every bin. Transport failures are
    /// reported as [`crate::SmartbinError::Network`].
    async fn fetch_readings(&self) -> crate::Result<Vec<BinReading>>;
}
