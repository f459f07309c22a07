use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::services::narrative_service::Narrator;
use crate::store::SeriesStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SeriesStore>,
    pub analysis: Arc<AnalysisConfig>,
    pub narrator: Narrator,
}

impl AppState {
    pub fn new(store: Arc<dyn SeriesStore>, analysis: AnalysisConfig) -> Self {
        Self {
            store,
            analysis: Arc::new(analysis),
            narrator: Narrator::default(),
        }
    }
}
