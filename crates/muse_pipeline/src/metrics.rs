//! Stage outcome metrics.
//!
//! With the `metrics` feature, outcomes are recorded through the global
//! OpenTelemetry meter. Without it, [`PipelineMetrics`] records nothing.

use muse_core::Stage;
#[cfg(feature = "metrics")]
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

/// Counters for stage successes and failures.
#[cfg(feature = "metrics")]
#[derive(Clone)]
pub struct PipelineMetrics {
    /// Stages that completed
    pub successes: Counter<u64>,
    /// Stages that failed, labelled by error kind
    pub failures: Counter<u64>,
    /// Stage duration in seconds
    pub duration: Histogram<f64>,
}

#[cfg(feature = "metrics")]
impl PipelineMetrics {
    /// Create metrics instruments on the global meter.
    pub fn new() -> Self {
        let meter = global::meter("muse_pipeline");
        let successes = meter
            .u64_counter("pipeline.stage.successes")
            .with_description("Generation stages that completed")
            .build();
        let failures = meter
            .u64_counter("pipeline.stage.failures")
            .with_description("Generation stages that failed")
            .build();
        let duration = meter
            .f64_histogram("pipeline.stage.duration")
            .with_unit("seconds")
            .with_description("Generation stage duration")
            .build();
        tracing::debug!("PipelineMetrics instruments created");
        Self {
            successes,
            failures,
            duration,
        }
    }

    /// Record a completed stage.
    pub fn record_success(&self, stage: Stage, duration_secs: f64) {
        let labels = &[KeyValue::new("stage", stage.to_string())];
        self.successes.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed stage.
    pub fn record_failure(&self, stage: Stage, kind: &str, duration_secs: f64) {
        let labels = [
            KeyValue::new("stage", stage.to_string()),
            KeyValue::new("kind", kind.to_string()),
        ];
        self.failures.add(1, &labels);
        self.duration.record(duration_secs, &labels[..1]);
    }
}

/// No-op metrics when the `metrics` feature is disabled.
#[cfg(not(feature = "metrics"))]
#[derive(Clone)]
pub struct PipelineMetrics;

#[cfg(not(feature = "metrics"))]
impl PipelineMetrics {
    /// Create no-op metrics.
    pub fn new() -> Self {
        Self
    }

    /// Record a completed stage (no-op).
    pub fn record_success(&self, _stage: Stage, _duration_secs: f64) {}

    /// Record a failed stage (no-op).
    pub fn record_failure(&self, _stage: Stage, _kind: &str, _duration_secs: f64) {}
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PipelineMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineMetrics").finish_non_exhaustive()
    }
}
