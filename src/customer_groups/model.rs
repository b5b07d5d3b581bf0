use std::collections::BTreeSet;

use serde_json::Value;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerGroup {
    pub id: String,
    pub name: String,
    pub metadata: Option<Value>,
    pub customer_ids: BTreeSet<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl CustomerGroup {
    /// Empty group stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            name: name.into(),
            metadata: None,
            customer_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_member(&self, customer_id: &str) -> bool {
        self.customer_ids.contains(customer_id)
    }
}

/// Validated input of a batch add. `customer_ids` keeps the caller's order
/// and may still contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAddRequest {
    pub group_id: String,
    pub customer_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddMembersOutcome {
    pub group: CustomerGroup,
    pub added: usize,
    pub unknown: usize,
}
