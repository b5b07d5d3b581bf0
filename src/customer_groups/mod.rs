pub mod http;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use model::{AddMembersOutcome, BatchAddRequest, CustomerGroup};
pub use service::{CustomerGroupService, MembershipError, RetryPolicy};
pub use store::{CustomerGroupStore, StoreError};
pub use validation::{ValidationError, validate_batch_add};
