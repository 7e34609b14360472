//! Tracing setup shared by the Greentic messaging tools.
//!
//! Reads `RUST_LOG`, `LOG_FORMAT`, `OTEL_SERVICE_NAME`, `OTEL_SERVICE_VERSION`,
//! `OTEL_RESOURCE_ATTRIBUTES` and `DEPLOYMENT_ENV`.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{LogFormat, TelemetryConfig};
pub use tracing_init::init_telemetry;

/// Installs the shared subscriber configured from the environment.
pub fn install(service_name: &str, service_version: &str) -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env(service_name, service_version))
}
