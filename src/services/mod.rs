pub mod alignment;
pub mod correlation_service;
pub mod health_score_service;
pub mod insight_service;
pub mod narrative_service;
pub mod significance;
pub mod statistics;
