//! Tracing and OpenTelemetry metrics initialization.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use opentelemetry_stdout::MetricExporter as StdoutExporter;
#[cfg(feature = "metrics")]
use std::time::Duration;
#[cfg(feature = "metrics")]
use tracing::debug;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `default_filter`. With
/// `json` set, events are written as JSON lines.
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}

/// Initialize OpenTelemetry metrics with a stdout exporter.
///
/// Registers a global meter provider exporting every `export_interval_secs`.
/// When the `metrics` feature is disabled, this function returns `Ok(())`
/// immediately.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), String> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        info!(
            service_name = service_name,
            "Metrics feature disabled - skipping metrics initialization"
        );
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        info!(
            service_name = service_name,
            export_interval_secs = export_interval_secs,
            "Initializing OpenTelemetry metrics"
        );

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();

        let reader = PeriodicReader::builder(StdoutExporter::default())
            .with_interval(Duration::from_secs(export_interval_secs))
            .build();
        debug!(
            interval_secs = export_interval_secs,
            "Created stdout periodic reader"
        );

        let meter_provider = SdkMeterProvider::builder()
            .with_resource(resource)
            .with_reader(reader)
            .build();

        global::set_meter_provider(meter_provider);
        info!("Meter provider registered globally");
        Ok(())
    }
}
