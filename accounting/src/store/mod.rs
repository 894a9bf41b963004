mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::registry::TrafficDelta;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-user quota state as kept by the store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuota {
    pub name: String,
    /// Cumulative upload+download bytes on record.
    pub consumed: u64,
    /// Volume cap in bytes; zero disables the volume rule.
    pub volume_limit: u64,
    /// Unix expiry timestamp; zero disables the expiry rule.
    pub expires_at: i64,
    /// Tags of the inbounds this user is provisioned on.
    pub inbounds: Vec<String>,
}

impl UserQuota {
    /// Volume boundary is inclusive; either rule is off at its zero sentinel.
    pub fn is_depleted(&self, now: i64) -> bool {
        (self.volume_limit > 0 && self.consumed >= self.volume_limit)
            || (self.expires_at > 0 && now >= self.expires_at)
    }
}

/// Sink for drained traffic deltas.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Persist one drain batch in a single call. User-namespace deltas always
    /// fold into the cumulative per-user totals; `persist_detail` controls
    /// whether the fine-grained history is kept as well.
    async fn save_stats(&self, batch: &[TrafficDelta], persist_detail: bool) -> Result<()>;

    /// Drop detail records older than `cutoff` (unix seconds).
    async fn prune_history(&self, cutoff: i64) -> Result<()>;
}

/// Source of per-user quota state and sink for disable decisions.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Quota state for every enabled user.
    async fn load_quotas(&self) -> Result<Vec<UserQuota>>;

    /// Mark the named users disabled.
    async fn disable_users(&self, names: &[String]) -> Result<()>;
}

/// Live-configuration collaborator that reloads an inbound listener so its
/// user list is refreshed.
#[async_trait]
pub trait InboundControl: Send + Sync {
    /// Remove and re-add one inbound. An
    /// [`InboundNotFound`](crate::AccountingError::InboundNotFound) outcome
    /// means the tag is already absent and is benign for callers.
    async fn restart_inbound(&self, tag: &str) -> Result<()>;
}
