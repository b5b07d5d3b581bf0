use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

mod dto;
pub(crate) mod handlers;

pub use dto::{AddCustomersBatchRequest, CustomerGroupDto, CustomerGroupResponse, CustomerIdRef};
pub use handlers::{add_customers_batch, get_customer_group};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_customer_group))
        .route("/{id}/customers/batch", post(add_customers_batch))
}
