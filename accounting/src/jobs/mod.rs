mod deplete;
mod stats;

pub use deplete::DepleteJob;
pub use stats::StatsJob;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// One periodic control-plane pass.
#[async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<()>;
}

/// Drives jobs on independent fixed intervals. Each job runs on its own task;
/// a tick that fires while the previous pass of the same job is still running
/// is skipped, not queued. Different jobs may overlap freely.
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<(Duration, Arc<dyn Job>)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(mut self, every: Duration, job: Arc<dyn Job>) -> Self {
        self.jobs.push((every, job));
        self
    }

    pub fn start(self) -> SchedulerHandle {
        let handles = self
            .jobs
            .into_iter()
            .map(|(every, job)| {
                tokio::spawn(async move {
                    let mut ticker = time::interval(every);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    // The first tick completes immediately; consume it so the
                    // job first runs one full interval after startup.
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        debug!("Running scheduled job: {}", job.name());
                        if let Err(e) = job.run().await {
                            warn!("Scheduled job {} failed: {}", job.name(), e);
                        }
                    }
                })
            })
            .collect();
        SchedulerHandle { handles }
    }
}

pub struct SchedulerHandle {
    handles: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Aborts the job tasks; an in-flight pass is not awaited.
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
    }
}
