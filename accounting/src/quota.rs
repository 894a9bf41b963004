use crate::current_timestamp;
use crate::error::Result;
use crate::snapshot::Snapshotter;
use crate::store::UserStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Disables users that ran out of volume or passed their expiry, and reports
/// which inbound listeners must be reloaded so the disabled credentials stop
/// being accepted.
pub struct QuotaEnforcer {
    snapshotter: Arc<Snapshotter>,
    users: Arc<dyn UserStore>,
    persist_detail: bool,
}

impl QuotaEnforcer {
    pub fn new(
        snapshotter: Arc<Snapshotter>,
        users: Arc<dyn UserStore>,
        persist_detail: bool,
    ) -> Self {
        Self {
            snapshotter,
            users,
            persist_detail,
        }
    }

    /// Run one enforcement pass. Returns the deduplicated inbound tags of
    /// newly disabled users, in deterministic order.
    pub async fn run(&self) -> Result<Vec<String>> {
        // Flush the counters so the check sees current totals.
        self.snapshotter.run(self.persist_detail).await?;

        let now = current_timestamp();
        let quotas = self.users.load_quotas().await?;

        let mut depleted = Vec::new();
        let mut affected = BTreeSet::new();
        for user in quotas {
            if !user.is_depleted(now) {
                continue;
            }
            debug!(
                "User {} depleted: consumed={} limit={} expires_at={}",
                user.name, user.consumed, user.volume_limit, user.expires_at
            );
            affected.extend(user.inbounds.iter().cloned());
            depleted.push(user.name);
        }

        if depleted.is_empty() {
            return Ok(Vec::new());
        }

        self.users.disable_users(&depleted).await?;
        info!("Disabled {} depleted user(s): {:?}", depleted.len(), depleted);

        Ok(affected.into_iter().collect())
    }
}
