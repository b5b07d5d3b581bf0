use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{CustomerGroupStore, StoreError};
use crate::customer_groups::model::{AddMembersOutcome, CustomerGroup};

#[derive(Default)]
pub struct InMemoryCustomerGroupStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    groups: HashMap<String, CustomerGroup>,
    customers: HashSet<String>,
}

impl InMemoryCustomerGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_customer(&self, customer_id: impl Into<String>) {
        let mut state = self.state.write().await;
        state.customers.insert(customer_id.into());
    }

    pub async fn insert_group(&self, group: CustomerGroup) {
        let mut state = self.state.write().await;
        state.groups.insert(group.id.clone(), group);
    }
}

#[async_trait]
impl CustomerGroupStore for InMemoryCustomerGroupStore {
    async fn find_group(&self, group_id: &str) -> Result<Option<CustomerGroup>, StoreError> {
        let state = self.state.read().await;
        Ok(state.groups.get(group_id).cloned())
    }

    async fn add_members(
        &self,
        group_id: &str,
        customer_ids: &[String],
    ) -> Result<Option<AddMembersOutcome>, StoreError> {
        // The whole update runs under one guard with no await point.
        let mut state = self.state.write().await;
        let MemoryState { groups, customers } = &mut *state;

        let Some(group) = groups.get_mut(group_id) else {
            return Ok(None);
        };

        let mut added = 0;
        let mut unknown = 0;
        for customer_id in customer_ids {
            if !customers.contains(customer_id) {
                unknown += 1;
                continue;
            }
            if group.customer_ids.insert(customer_id.clone()) {
                added += 1;
            }
        }

        if added > 0 {
            group.updated_at = OffsetDateTime::now_utc();
        }

        Ok(Some(AddMembersOutcome {
            group: group.clone(),
            added,
            unknown,
        }))
    }
}
