//! Metrics collection and Prometheus export.
//!
//! HTTP request metrics come from the shared middleware; the helpers below
//! record what each endpoint did with the request.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup, before anything is
/// recorded.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_upload(outcome: &'static str, paragraphs: usize) {
    counter!("reader_uploads_total", "outcome" => outcome).increment(1);
    if outcome == "success" {
        histogram!("reader_upload_paragraphs").record(paragraphs as f64);
    }
}

pub fn record_definition(found: bool) {
    let outcome = if found { "found" } else { "not_found" };
    counter!("reader_definitions_total", "outcome" => outcome).increment(1);
}

pub fn record_chat(model: &str, outcome: &'static str, latency: Duration) {
    let model = model.to_string();
    counter!("reader_chat_requests_total", "model" => model.clone(), "outcome" => outcome)
        .increment(1);
    histogram!("reader_chat_latency_seconds", "model" => model).record(latency.as_secs_f64());
}

pub fn record_chat_tokens(model: &str, input: i32, output: i32) {
    let model = model.to_string();
    counter!("reader_chat_tokens_total", "model" => model.clone(), "direction" => "input")
        .increment(u64::try_from(input).unwrap_or(0));
    counter!("reader_chat_tokens_total", "model" => model, "direction" => "output")
        .increment(u64::try_from(output).unwrap_or(0));
}
