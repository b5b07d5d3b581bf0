use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::model::{BatchAddRequest, CustomerGroup};
use super::store::{CustomerGroupStore, StoreError};

/// Upper bound for a single backoff sleep between conflicting writes.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(25),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after the given failed attempt. Grows linearly
    /// and saturates at [`MAX_RETRY_DELAY`].
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .checked_mul(attempt)
            .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
    }
}

#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("customer group {0} was not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Entry point for customer group reads and membership changes.
#[derive(Clone)]
pub struct CustomerGroupService {
    store: Arc<dyn CustomerGroupStore>,
    retry: RetryPolicy,
}

impl CustomerGroupService {
    pub fn new(store: Arc<dyn CustomerGroupStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    pub async fn get_group(&self, group_id: &str) -> Result<CustomerGroup, MembershipError> {
        self.store
            .find_group(group_id)
            .await?
            .ok_or_else(|| MembershipError::NotFound(group_id.to_string()))
    }

    /// Adds the requested customers to the group and returns its full
    /// membership. Customers already in the group and ids with no matching
    /// customer are skipped, so repeating a batch is harmless.
    pub async fn add_customers_to_group(
        &self,
        request: BatchAddRequest,
    ) -> Result<CustomerGroup, MembershipError> {
        let BatchAddRequest {
            group_id,
            customer_ids,
        } = request;

        let group = self.get_group(&group_id).await?;

        let candidates: Vec<String> = dedup_preserving_order(customer_ids)
            .into_iter()
            .filter(|customer_id| !group.has_member(customer_id))
            .collect();

        if candidates.is_empty() {
            tracing::debug!(group_id = %group_id, "batch adds no new customers");
            return Ok(group);
        }

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.store.add_members(&group_id, &candidates).await {
                Ok(Some(outcome)) => {
                    tracing::info!(
                        group_id = %group_id,
                        requested = candidates.len(),
                        added = outcome.added,
                        unknown = outcome.unknown,
                        "customers added to group"
                    );
                    return Ok(outcome.group);
                }
                Ok(None) => return Err(MembershipError::NotFound(group_id)),
                Err(StoreError::Conflict(reason)) if attempt < max_attempts => {
                    tracing::warn!(
                        group_id = %group_id,
                        attempt,
                        "membership update conflicted, retrying: {reason}"
                    );
                    tokio::time::sleep(self.retry.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
