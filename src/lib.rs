//! Economic indicator analysis: single-indicator insights, a composite
//! economic health score, and ranked correlations between indicator pairs,
//! computed on demand over series read from a [`store::SeriesStore`].

pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
