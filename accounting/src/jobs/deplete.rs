use super::Job;
use crate::error::{AccountingError, Result};
use crate::quota::QuotaEnforcer;
use crate::store::InboundControl;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Periodic quota pass: disable depleted users, then reload the inbounds they
/// were provisioned on so their credentials stop being accepted.
pub struct DepleteJob {
    enforcer: Arc<QuotaEnforcer>,
    inbounds: Arc<dyn InboundControl>,
}

impl DepleteJob {
    pub fn new(enforcer: Arc<QuotaEnforcer>, inbounds: Arc<dyn InboundControl>) -> Self {
        Self { enforcer, inbounds }
    }
}

#[async_trait]
impl Job for DepleteJob {
    fn name(&self) -> &'static str {
        "deplete"
    }

    async fn run(&self) -> Result<()> {
        let affected = self.enforcer.run().await?;
        if affected.is_empty() {
            return Ok(());
        }

        info!("Reloading {} inbound(s) after quota enforcement", affected.len());
        let mut first_failure = None;
        for tag in &affected {
            match self.inbounds.restart_inbound(tag).await {
                Ok(()) => {}
                Err(AccountingError::InboundNotFound(_)) => {
                    // Already gone; nothing to reload.
                    debug!("Inbound {} not present, skipping", tag);
                }
                Err(e) => {
                    error!("Unable to restart inbound {}: {}", tag, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
