use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    chat_requests_total: AtomicU64,
    rule_hits_total: AtomicU64,
    fallback_total: AtomicU64,
    state_updates_total: AtomicU64,
    rejected_submissions_total: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub chat_requests_total: u64,
    pub rule_hits_total: u64,
    pub fallback_total: u64,
    pub state_updates_total: u64,
    pub rejected_submissions_total: u64,
    pub avg_chat_latency_micros: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_chat_request(&self) {
        self.chat_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rule_hit(&self) {
        self.rule_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_state_update(&self) {
        self.state_updates_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_submission(&self) {
        self.rejected_submissions_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.chat_requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            chat_requests_total: requests,
            rule_hits_total: self.rule_hits_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            state_updates_total: self.state_updates_total.load(Ordering::Relaxed),
            rejected_submissions_total: self.rejected_submissions_total.load(Ordering::Relaxed),
            avg_chat_latency_micros: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

/// JSON logs on stderr so stdout stays clean for command output.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,krishi_agents=info,krishi_storage=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
