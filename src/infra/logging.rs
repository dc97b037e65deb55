pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Logs go to stderr; stdout is reserved for the answer.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Record a latency sample through the `metrics` facade and mirror it as a log line.
pub fn log_metric(source: &str, metric: &str, value: f64) {
    metrics::histogram!(metric.to_owned(), "source" => source.to_owned()).record(value);
    tracing::info!(source = source, metric = metric, value = value, "metric");
}

/// Bump an error counter by one.
pub fn log_error(source: &str, metric: &str) {
    metrics::counter!(metric.to_owned(), "source" => source.to_owned()).increment(1);
    tracing::info!(source = source, metric = metric, "metric");
}

#[cfg(test)]
mod tests {
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::MetricKind;

    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }

    #[test]
    fn errors_are_counters_and_latency_is_a_histogram() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, || {
            super::log_error("messages.create", "remote_error_total");
            super::log_error("messages.create", "remote_error_total");
            super::log_metric("messages.create", "remote_latency_ms", 12.0);
        });

        let snapshot = snapshotter.snapshot().into_vec();
        let errors = snapshot
            .iter()
            .find(|(key, ..)| key.key().name() == "remote_error_total")
            .unwrap();
        assert_eq!(errors.0.kind(), MetricKind::Counter);
        assert!(matches!(errors.3, DebugValue::Counter(2)));

        let latency = snapshot
            .iter()
            .find(|(key, ..)| key.key().name() == "remote_latency_ms")
            .unwrap();
        assert_eq!(latency.0.kind(), MetricKind::Histogram);
    }
}
