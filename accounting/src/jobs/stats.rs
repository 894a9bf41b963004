use super::Job;
use crate::error::Result;
use crate::snapshot::Snapshotter;
use async_trait::async_trait;
use std::sync::Arc;

/// Periodic snapshot pass: drain the registry and persist the deltas.
pub struct StatsJob {
    snapshotter: Arc<Snapshotter>,
    persist_detail: bool,
}

impl StatsJob {
    pub fn new(snapshotter: Arc<Snapshotter>, persist_detail: bool) -> Self {
        Self {
            snapshotter,
            persist_detail,
        }
    }
}

#[async_trait]
impl Job for StatsJob {
    fn name(&self) -> &'static str {
        "stats"
    }

    async fn run(&self) -> Result<()> {
        self.snapshotter.run(self.persist_detail).await
    }
}
