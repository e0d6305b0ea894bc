use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `PULSEBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub attribution: AttributionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Demo-data seeding knobs. The store content is synthetic and fully
/// determined by `seed`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_conversions")]
    pub conversions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributionConfig {
    /// Model applied when a request omits the `model` parameter. An unknown
    /// model named explicitly in a request still fails with 400.
    #[serde(default = "default_model")]
    pub default_model: String,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_seed() -> u64 {
    42
}
fn default_conversions() -> usize {
    250
}
fn default_model() -> String {
    "last-touch".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            conversions: default_conversions(),
        }
    }
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            data: DataConfig::default(),
            attribution: AttributionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("PULSEBOARD")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.http_port, 8080);
        assert_eq!(cfg.metrics.port, 9091);
        assert_eq!(cfg.data.seed, 42);
        assert_eq!(cfg.attribution.default_model, "last-touch");
    }

    #[test]
    fn test_default_model_identifier_parses() {
        use crate::types::AttributionModel;

        let cfg = AppConfig::default();
        assert!(cfg.attribution.default_model.parse::<AttributionModel>().is_ok());
    }
}
