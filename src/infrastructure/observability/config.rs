//! Settings for the `[observability]` config section

use serde::Deserialize;

const SERVICE_NAME: &str = "football-pool";
const LOCAL_COLLECTOR: &str = "http://localhost:4317";
const METRICS_ROUTE: &str = "/metrics";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub tracing: TracingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// OTLP span export. Off unless a collector is configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    /// gRPC collector address
    pub otlp_endpoint: String,
    /// Reported as the `service.name` resource attribute
    pub service_name: String,
    /// Fraction of traces kept; anything outside 0..=1 is clamped
    pub sampling_ratio: f64,
}

impl TracingConfig {
    /// Sampling ratio usable by the sampler; NaN keeps every trace
    pub fn effective_sampling_ratio(&self) -> f64 {
        if self.sampling_ratio.is_nan() {
            1.0
        } else {
            self.sampling_ratio.clamp(0.0, 1.0)
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: LOCAL_COLLECTOR.to_string(),
            service_name: SERVICE_NAME.to_string(),
            sampling_ratio: 1.0,
        }
    }
}

/// Prometheus scrape endpoint served next to the API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl MetricsConfig {
    /// Configured path as an axum route, always starting with `/`
    pub fn route_path(&self) -> String {
        let trimmed = self.path.trim().trim_matches('/');

        if trimmed.is_empty() {
            METRICS_ROUTE.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: METRICS_ROUTE.to_string(),
        }
    }
}
