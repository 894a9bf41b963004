use accounting::{AccountingError, InboundControl, Result, StatsStore, TrafficDelta};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stats store whose saves fail while the `failing` switch is on.
#[derive(Default)]
pub struct FailingStatsStore {
    failing: AtomicBool,
    saved: Mutex<Vec<TrafficDelta>>,
}

impl FailingStatsStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn saved(&self) -> Vec<TrafficDelta> {
        self.saved.lock().clone()
    }
}

#[async_trait]
impl StatsStore for FailingStatsStore {
    async fn save_stats(&self, batch: &[TrafficDelta], _persist_detail: bool) -> Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(AccountingError::Storage("injected save failure".to_string()));
        }
        self.saved.lock().extend_from_slice(batch);
        Ok(())
    }

    async fn prune_history(&self, _cutoff: i64) -> Result<()> {
        Ok(())
    }
}

/// Inbound-control double that records restarted tags and can report some
/// tags as absent.
#[derive(Default)]
pub struct RecordingInboundControl {
    missing: Vec<String>,
    restarted: Mutex<Vec<String>>,
}

impl RecordingInboundControl {
    pub fn with_missing(missing: &[&str]) -> Self {
        Self {
            missing: missing.iter().map(|tag| tag.to_string()).collect(),
            restarted: Mutex::new(Vec::new()),
        }
    }

    pub fn restarted(&self) -> Vec<String> {
        self.restarted.lock().clone()
    }
}

#[async_trait]
impl InboundControl for RecordingInboundControl {
    async fn restart_inbound(&self, tag: &str) -> Result<()> {
        if self.missing.iter().any(|t| t == tag) {
            return Err(AccountingError::InboundNotFound(tag.to_string()));
        }
        self.restarted.lock().push(tag.to_string());
        Ok(())
    }
}
