//! Store metrics and tracing spans.
//!
//! With the `metrics` feature, every SQL statement and every catalog store
//! call is counted and timed through OpenTelemetry and exported in the
//! Prometheus text format ([`render_prometheus`]). With the `tracing` feature,
//! the same calls are wrapped in spans from [`tracing_helpers`].

#[cfg(feature = "metrics")]
pub use self::otel::{render_prometheus, StockroomMetrics, METRICS};

#[cfg(feature = "metrics")]
mod otel {
    use once_cell::sync::Lazy;
    use opentelemetry::metrics::{Counter, Histogram, Meter, MeterProvider as _};
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Encoder, Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<StockroomMetrics> = Lazy::new(StockroomMetrics::init);

    pub struct StockroomMetrics {
        registry: Registry,
        // keeps the reader alive for as long as the instruments are used
        _provider: Option<SdkMeterProvider>,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub store_calls_total: Counter<u64>,
        pub store_errors_total: Counter<u64>,
    }

    impl StockroomMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let provider = match opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
            {
                Ok(exporter) => Some(SdkMeterProvider::builder().with_reader(exporter).build()),
                Err(e) => {
                    log::warn!("prometheus exporter unavailable, metrics disabled: {e}");
                    None
                }
            };
            let meter = match &provider {
                Some(provider) => provider.meter("stockroom"),
                None => opentelemetry::global::meter("stockroom"),
            };
            Self::with_meter(registry, provider, &meter)
        }

        fn with_meter(registry: Registry, provider: Option<SdkMeterProvider>, meter: &Meter) -> Self {
            let queries_total = meter
                .u64_counter("stockroom_queries_total")
                .with_description("Total SQL statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("stockroom_query_errors_total")
                .with_description("SQL statements that returned an error")
                .build();

            let query_duration = meter
                .f64_histogram("stockroom_query_duration_seconds")
                .with_description("Duration of SQL statements")
                .build();

            let store_calls_total = meter
                .u64_counter("stockroom_store_calls_total")
                .with_description("Catalog store operations by name")
                .build();

            let store_errors_total = meter
                .u64_counter("stockroom_store_errors_total")
                .with_description("Catalog store operations that failed, by name")
                .build();

            Self {
                registry,
                _provider: provider,
                queries_total,
                query_errors_total,
                query_duration,
                store_calls_total,
                store_errors_total,
            }
        }

        pub fn record_query_duration(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_store_call(&self, operation: &'static str, ok: bool) {
            let attrs = [KeyValue::new("operation", operation)];
            self.store_calls_total.add(1, &attrs);
            if !ok {
                self.store_errors_total.add(1, &attrs);
            }
        }
    }

    /// Prometheus text exposition of everything recorded so far
    pub fn render_prometheus() -> String {
        let families = METRICS.registry.gather();
        let mut buf = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&families, &mut buf) {
            log::warn!("failed to encode metrics: {e}");
            return String::new();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::{info_span, Span};

    /// Span for establishing a database connection
    pub fn connect_span() -> Span {
        info_span!("stockroom.connect")
    }

    /// Span for a single SQL statement; the statement text is recorded verbatim
    /// (parameters are bound separately and never appear here)
    pub fn execute_query_span(query: &str) -> Span {
        info_span!("stockroom.query", db.statement = query)
    }

    /// Span for one catalog store operation
    pub fn store_call_span(operation: &'static str) -> Span {
        info_span!("stockroom.store", operation)
    }
}

/// Run `call` as the store operation `operation`, recording a span and metrics
/// when the corresponding features are enabled.
pub(crate) fn instrument_store_call<T, E>(
    operation: &'static str,
    call: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::store_call_span(operation).entered();

    let result = call();

    #[cfg(feature = "metrics")]
    METRICS.record_store_call(operation, result.is_ok());
    #[cfg(not(feature = "metrics"))]
    let _ = operation;

    result
}
