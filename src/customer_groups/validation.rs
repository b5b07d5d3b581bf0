use thiserror::Error;

use super::http::AddCustomersBatchRequest;
use super::model::BatchAddRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Checks a deserialized batch payload against `group_id`.
///
/// Ids are passed through exactly as sent; blank ones are rejected. Order and
/// duplicates are kept and an empty list is a valid request that changes
/// nothing.
pub fn validate_batch_add(
    group_id: &str,
    request: AddCustomersBatchRequest,
    max_batch_size: usize,
) -> Result<BatchAddRequest, ValidationError> {
    if is_blank(group_id) {
        return Err(ValidationError::new("id is required"));
    }

    if request.customer_ids.len() > max_batch_size {
        return Err(ValidationError::new(format!(
            "customerIds can contain up to {max_batch_size} values"
        )));
    }

    let mut customer_ids = Vec::with_capacity(request.customer_ids.len());
    for (index, customer) in request.customer_ids.into_iter().enumerate() {
        if is_blank(&customer.id) {
            return Err(ValidationError::new(format!(
                "customerIds[{index}].id cannot be empty"
            )));
        }
        customer_ids.push(customer.id);
    }

    Ok(BatchAddRequest {
        group_id: group_id.to_string(),
        customer_ids,
    })
}

fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}
