use async_trait::async_trait;
use thiserror::Error;

use super::model::{AddMembersOutcome, CustomerGroup};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCustomerGroupStore;
pub use postgres::PgCustomerGroupStore;

// SQLSTATE serialization_failure / deadlock_detected
const RETRYABLE_SQLSTATES: [&str; 2] = ["40001", "40P01"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let retryable = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| RETRYABLE_SQLSTATES.contains(&code.as_ref()));

        if retryable {
            StoreError::Conflict(err.to_string())
        } else {
            StoreError::Database(err)
        }
    }
}

#[async_trait]
pub trait CustomerGroupStore: Send + Sync {
    async fn find_group(&self, group_id: &str) -> Result<Option<CustomerGroup>, StoreError>;

    /// Adds every known customer in `customer_ids` to the group in one atomic
    /// step. Ids already present are left alone and ids with no matching
    /// customer are counted as unknown. Returns `None` when the group does not
    /// exist, in which case nothing was written.
    async fn add_members(
        &self,
        group_id: &str,
        customer_ids: &[String],
    ) -> Result<Option<AddMembersOutcome>, StoreError>;
}
