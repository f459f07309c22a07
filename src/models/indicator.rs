use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single dated observation of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A named, sourced, categorized economic time series as read from the store.
///
/// `data` is ordered most-recent-first. The engine never mutates a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSeries {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub source: String,
    pub data: Vec<DataPoint>,

    /// Names of indicators the store considers related (same category)
    #[serde(default)]
    pub related_candidates: Vec<String>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, category: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            source: source.into(),
            data: Vec::new(),
            related_candidates: Vec::new(),
        }
    }

    /// Attach observations, sorting them most-recent-first.
    pub fn with_data(mut self, mut data: Vec<DataPoint>) -> Self {
        data.sort_by(|a, b| b.date.cmp(&a.date));
        self.data = data;
        self
    }

    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related_candidates = related;
        self
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.data.first()
    }

    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.value).collect()
    }
}
