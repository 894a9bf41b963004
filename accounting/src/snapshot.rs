use crate::current_timestamp;
use crate::error::Result;
use crate::registry::TrafficRegistry;
use crate::store::StatsStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

const SECS_PER_DAY: i64 = 86_400;

/// Drains the registry and hands the batch to the stats store. Drains are
/// destructive: a persistence failure loses that interval's delta instead of
/// double counting on a retry.
pub struct Snapshotter {
    registry: Arc<TrafficRegistry>,
    store: Arc<dyn StatsStore>,
    retention_days: u64,
    in_flight: AtomicBool,
}

impl Snapshotter {
    pub fn new(registry: Arc<TrafficRegistry>, store: Arc<dyn StatsStore>, retention_days: u64) -> Self {
        Self {
            registry,
            store,
            retention_days,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one snapshot pass. A pass that finds another one in flight is
    /// skipped, not queued; the in-flight sweep covers its interval.
    pub async fn run(&self, persist_detail: bool) -> Result<()> {
        if self.in_flight.swap(true, Ordering::Acquire) {
            debug!("Snapshot pass already running, skipping");
            return Ok(());
        }
        let result = self.persist_pass(persist_detail).await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn persist_pass(&self, persist_detail: bool) -> Result<()> {
        let batch = self.registry.drain_all();
        if batch.is_empty() {
            return Ok(());
        }

        debug!("Persisting {} traffic delta(s)", batch.len());
        self.store.save_stats(&batch, persist_detail).await?;

        // History cleanup rides on successful passes; a failed prune is
        // retried by the next pass.
        if persist_detail && self.retention_days > 0 {
            let cutoff = current_timestamp() - self.retention_days as i64 * SECS_PER_DAY;
            if let Err(e) = self.store.prune_history(cutoff).await {
                warn!("Pruning traffic history failed: {}", e);
            }
        }
        Ok(())
    }
}
