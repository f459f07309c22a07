mod memory;
mod postgres;

pub use memory::InMemorySeriesStore;
pub use postgres::PgSeriesStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::IndicatorSeries;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to persisted indicator series.
///
/// Series data is returned most-recent-first. Looking up a name that does not
/// exist is not an error: `get_indicator_by_name` yields `None` and
/// `list_indicators_by_names` simply omits it.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    async fn get_indicator_by_name(
        &self,
        name: &str,
    ) -> Result<Option<IndicatorSeries>, StoreError>;

    async fn list_indicators_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<IndicatorSeries>, StoreError>;
}
