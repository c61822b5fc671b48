//! OpenTelemetry metrics.
//!
//! Key metrics:
//! - servicedesk_registrations_total: Counter of successful registrations
//! - servicedesk_logins_total: Counter of login attempts by outcome
//! - servicedesk_tickets_created_total: Counter of created tickets
//! - servicedesk_ticket_status_updates_total: Counter of status updates by status

use opentelemetry::metrics::{Counter, Meter};
use opentelemetry::{global, KeyValue};
use opentelemetry_sdk::metrics::{ManualReader, SdkMeterProvider};
use std::sync::OnceLock;

use crate::ticket::TicketStatus;

/// Global metrics instance.
static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Servicedesk metrics registry.
#[derive(Debug)]
pub struct Metrics {
    /// Successful registrations, by role.
    pub registrations_total: Counter<u64>,
    /// Login attempts, by outcome.
    pub logins_total: Counter<u64>,
    /// Tickets created.
    pub tickets_created_total: Counter<u64>,
    /// Status updates accepted, by new status.
    pub ticket_status_updates_total: Counter<u64>,
}

impl Metrics {
    fn new(meter: &Meter) -> Self {
        Self {
            registrations_total: meter
                .u64_counter("servicedesk_registrations_total")
                .with_description("Total number of successful registrations")
                .with_unit("1")
                .init(),
            logins_total: meter
                .u64_counter("servicedesk_logins_total")
                .with_description("Total number of login attempts")
                .with_unit("1")
                .init(),
            tickets_created_total: meter
                .u64_counter("servicedesk_tickets_created_total")
                .with_description("Total number of tickets created")
                .with_unit("1")
                .init(),
            ticket_status_updates_total: meter
                .u64_counter("servicedesk_ticket_status_updates_total")
                .with_description("Total number of ticket status updates")
                .with_unit("1")
                .init(),
        }
    }
}

/// Initialize the metrics system.
///
/// This should be called once at startup. Subsequent calls are ignored.
///
/// # Arguments
///
/// * `otel_endpoint` - Optional OTLP endpoint for metrics export
pub fn init_metrics_with_endpoint(otel_endpoint: Option<&str>) {
    METRICS.get_or_init(|| {
        if let Some(endpoint) = otel_endpoint {
            use opentelemetry_otlp::{Protocol, WithExportConfig};

            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint)
                .with_protocol(Protocol::Grpc);

            match opentelemetry_otlp::new_pipeline()
                .metrics(opentelemetry_sdk::runtime::Tokio)
                .with_exporter(exporter)
                .with_period(std::time::Duration::from_secs(10))
                .build()
            {
                Ok(provider) => {
                    global::set_meter_provider(provider);
                    tracing::info!(endpoint, "OTLP metrics exporter configured");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create OTLP exporter, using no-op metrics");
                    set_manual_provider();
                }
            }
        } else {
            // Metrics are recorded but not exported
            set_manual_provider();
        }

        let meter = global::meter("servicedesk");
        Metrics::new(&meter)
    });
}

/// Initialize the metrics system without OTLP export.
pub fn init_metrics() {
    init_metrics_with_endpoint(None);
}

fn set_manual_provider() {
    let reader = ManualReader::builder().build();
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    global::set_meter_provider(provider);
}

/// Record a successful registration.
pub fn record_registration(role: &str) {
    if let Some(m) = METRICS.get() {
        m.registrations_total
            .add(1, &[KeyValue::new("role", role.to_string())]);
    }
}

/// Record a login attempt.
pub fn record_login(success: bool) {
    if let Some(m) = METRICS.get() {
        let outcome = if success { "success" } else { "failure" };
        m.logins_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

/// Record a created ticket.
pub fn record_ticket_created() {
    if let Some(m) = METRICS.get() {
        m.tickets_created_total.add(1, &[]);
    }
}

/// Record an accepted status update.
pub fn record_status_update(status: TicketStatus) {
    if let Some(m) = METRICS.get() {
        m.ticket_status_updates_total
            .add(1, &[KeyValue::new("status", status.as_str())]);
    }
}
