pub mod config;
pub mod error;
pub mod instrument;
pub mod jobs;
pub mod quota;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use config::AccountingConfig;
pub use error::{AccountingError, Result};
pub use instrument::{InstrumentedDatagram, InstrumentedStream};
pub use jobs::{DepleteJob, Job, Scheduler, SchedulerHandle, StatsJob};
pub use quota::QuotaEnforcer;
pub use registry::{
    CounterSet, Direction, ResourceKind, TrafficCounter, TrafficDelta, TrafficRegistry,
};
pub use snapshot::Snapshotter;
pub use store::{InboundControl, MemoryStore, StatsStore, UserQuota, UserStore};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn init_tracing(log_dir: Option<&str>, log_file: &str, log_level: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if let Some(log_dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(log_dir, log_file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_ansi(true))
            .init();
        None
    }
}
