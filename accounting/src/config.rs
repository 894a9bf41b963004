use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingConfig {
    /// Seconds between snapshot passes.
    #[serde(default = "default_snapshot_interval_secs")]
    pub snapshot_interval_secs: u64,

    /// Seconds between quota-enforcement passes.
    #[serde(default = "default_deplete_interval_secs")]
    pub deplete_interval_secs: u64,

    /// Keep fine-grained per-tag history. Cumulative per-user totals are
    /// updated either way.
    #[serde(default = "default_persist_traffic_detail")]
    pub persist_traffic_detail: bool,

    /// Days of detail history to retain; zero keeps everything.
    #[serde(default = "default_stats_retention_days")]
    pub stats_retention_days: u64,
}

fn default_snapshot_interval_secs() -> u64 {
    10
}

fn default_deplete_interval_secs() -> u64 {
    60
}

fn default_persist_traffic_detail() -> bool {
    true
}

fn default_stats_retention_days() -> u64 {
    30
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            snapshot_interval_secs: default_snapshot_interval_secs(),
            deplete_interval_secs: default_deplete_interval_secs(),
            persist_traffic_detail: default_persist_traffic_detail(),
            stats_retention_days: default_stats_retention_days(),
        }
    }
}

impl AccountingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AccountingConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval_secs)
    }

    pub fn deplete_interval(&self) -> Duration {
        Duration::from_secs(self.deplete_interval_secs)
    }
}
