use super::{StatsStore, UserQuota, UserStore};
use crate::error::{AccountingError, Result};
use crate::registry::{ResourceKind, TrafficDelta};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

/// In-process store for embedders running without a database, and the
/// substrate the test suites run against.
#[derive(Default)]
pub struct MemoryStore {
    history: Mutex<Vec<TrafficDelta>>,
    users: DashMap<String, UserRecord>,
}

#[derive(Debug, Clone)]
struct UserRecord {
    enabled: bool,
    consumed: u64,
    volume_limit: u64,
    expires_at: i64,
    inbounds: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str, volume_limit: u64, expires_at: i64, inbounds: &[&str]) {
        self.users.insert(
            name.to_string(),
            UserRecord {
                enabled: true,
                consumed: 0,
                volume_limit,
                expires_at,
                inbounds: inbounds.iter().map(|tag| tag.to_string()).collect(),
            },
        );
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.users.get(name).is_some_and(|user| user.enabled)
    }

    pub fn consumed(&self, name: &str) -> u64 {
        self.users.get(name).map_or(0, |user| user.consumed)
    }

    pub fn history(&self) -> Vec<TrafficDelta> {
        self.history.lock().clone()
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn save_stats(&self, batch: &[TrafficDelta], persist_detail: bool) -> Result<()> {
        for delta in batch {
            if delta.resource == ResourceKind::User
                && let Some(mut user) = self.users.get_mut(&delta.tag)
            {
                user.consumed += delta.bytes;
            }
        }
        if persist_detail {
            self.history.lock().extend_from_slice(batch);
        }
        Ok(())
    }

    async fn prune_history(&self, cutoff: i64) -> Result<()> {
        self.history.lock().retain(|delta| delta.timestamp >= cutoff);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn load_quotas(&self) -> Result<Vec<UserQuota>> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.value().enabled)
            .map(|entry| UserQuota {
                name: entry.key().clone(),
                consumed: entry.value().consumed,
                volume_limit: entry.value().volume_limit,
                expires_at: entry.value().expires_at,
                inbounds: entry.value().inbounds.clone(),
            })
            .collect())
    }

    async fn disable_users(&self, names: &[String]) -> Result<()> {
        for name in names {
            match self.users.get_mut(name) {
                Some(mut user) => user.enabled = false,
                None => {
                    return Err(AccountingError::Storage(format!("unknown user: {name}")));
                }
            }
        }
        Ok(())
    }
}
