use std::net::SocketAddr;

use anyhow::Context;

use crate::services::significance::SignificanceTable;

/// Tunables for the analysis operations.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Most recent aligned points used per correlation pair
    pub correlation_window: usize,

    /// Pairs with fewer aligned points are skipped
    pub min_aligned_points: usize,

    /// Maximum related indicators attached to an insight
    pub related_indicator_limit: usize,

    /// Observations required before an insight carries percentile/range context
    pub min_history_for_context: usize,

    pub significance: SignificanceTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation_window: 24,
            min_aligned_points: 20,
            related_indicator_limit: 3,
            min_history_for_context: 10,
            significance: SignificanceTable::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("CORRELATION_WINDOW") {
            config.correlation_window = raw
                .parse()
                .with_context(|| format!("CORRELATION_WINDOW must be a positive integer, got '{}'", raw))?;
        }
        if let Ok(raw) = std::env::var("CORRELATION_MIN_POINTS") {
            config.min_aligned_points = raw
                .parse()
                .with_context(|| format!("CORRELATION_MIN_POINTS must be a positive integer, got '{}'", raw))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_aligned_points < 6 {
            anyhow::bail!("CORRELATION_MIN_POINTS must be at least 6");
        }
        if self.correlation_window < self.min_aligned_points {
            anyhow::bail!(
                "CORRELATION_WINDOW ({}) must not be smaller than CORRELATION_MIN_POINTS ({})",
                self.correlation_window,
                self.min_aligned_points
            );
        }
        Ok(())
    }
}

/// Process-level settings read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// When unset the server runs against an empty in-memory store
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be an integer, got '{}'", raw))?,
            Err(_) => 10,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            bind_addr,
            db_max_connections,
            analysis: AnalysisConfig::from_env()?,
        })
    }
}
