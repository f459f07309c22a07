use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging configuration: {0}")]
    Config(String),
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
    #[cfg(feature = "loki")]
    #[error("invalid Loki URL: {0}")]
    Url(#[from] url::ParseError),
    #[cfg(feature = "loki")]
    #[error("Loki layer error: {0}")]
    Loki(#[from] tracing_loki::Error),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            loki_enabled: false,
            loki_url: None,
            service_name: "econ-pulse".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            loki_enabled: std::env::var("LOKI_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.loki_enabled),
            loki_url: std::env::var("LOKI_URL").ok(),
            service_name: std::env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    pub fn validate(&self) -> Result<(), LoggingError> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err(LoggingError::Config(
                "LOKI_ENABLED is true but LOKI_URL is not set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Install the global tracing subscriber: console output always, plus a Loki
/// push layer when the `loki` feature is built and `LOKI_ENABLED` is set.
///
/// Must be called from within a Tokio runtime when Loki is enabled.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    config.validate()?;
    let filter = EnvFilter::try_new(&config.log_level)?;

    #[cfg(feature = "loki")]
    {
        if let (true, Some(loki_url)) = (config.loki_enabled, config.loki_url.as_deref()) {
            let (loki_layer, task) = tracing_loki::builder()
                .label("service", &config.service_name)?
                .label("environment", &config.environment)?
                .build_url(url::Url::parse(loki_url)?)?;

            tokio::spawn(task);

            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(loki_layer)
                .try_init()?;

            tracing::info!("📊 Logging to console and Loki at {}", loki_url);
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!("📊 Console-only logging initialized ({})", config.environment);
    Ok(())
}
