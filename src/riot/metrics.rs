use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

/// Counts the Riot API requests sent and periodically logs the throughput.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
}

impl RequestMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        // First tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let span = info_span!("📊 riot");
            async {
                let total = self.total();
                let elapsed_min = self.start.elapsed().as_secs_f64() / 60.0;
                let avg = if elapsed_min > 0.0 {
                    total as f64 / elapsed_min
                } else {
                    0.0
                };
                tracing::info!(total, "{} requests executed (avg {:.2} req/min)", total, avg);
            }
            .instrument(span)
            .await
        }
    }
}
