use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::models::IndicatorSeries;
use crate::store::{SeriesStore, StoreError};

/// Series store backed by a map, used for local runs and tests.
///
/// Related candidates default to the other indicators sharing a category when
/// a series was inserted without an explicit list.
#[derive(Default)]
pub struct InMemorySeriesStore {
    series: RwLock<HashMap<String, IndicatorSeries>>,
}

impl InMemorySeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: Vec<IndicatorSeries>) -> Self {
        let store = Self::new();
        for s in series {
            store.insert(s);
        }
        store
    }

    /// Insert or replace a series, keyed by name.
    pub fn insert(&self, series: IndicatorSeries) {
        self.series.write().insert(series.name.clone(), series);
    }

    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.read().is_empty()
    }

    fn resolve(&self, map: &HashMap<String, IndicatorSeries>, name: &str) -> Option<IndicatorSeries> {
        let mut found = map.get(name)?.clone();
        if found.related_candidates.is_empty() {
            let mut related: Vec<String> = map
                .values()
                .filter(|s| s.name != found.name && s.category.eq_ignore_ascii_case(&found.category))
                .map(|s| s.name.clone())
                .collect();
            related.sort();
            found.related_candidates = related;
        }
        Some(found)
    }
}

#[async_trait]
impl SeriesStore for InMemorySeriesStore {
    async fn get_indicator_by_name(
        &self,
        name: &str,
    ) -> Result<Option<IndicatorSeries>, StoreError> {
        let map = self.series.read();
        Ok(self.resolve(&map, name))
    }

    async fn list_indicators_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<IndicatorSeries>, StoreError> {
        let map = self.series.read();
        Ok(names
            .iter()
            .filter_map(|name| self.resolve(&map, name))
            .collect())
    }
}
