use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use crate::{
    AppState,
    customer_groups::validation::validate_batch_add,
    error::{ApiError, ApiResult},
    extractors::admin_user::AdminUser,
};

use super::dto::{AddCustomersBatchRequest, CustomerGroupResponse};

#[utoipa::path(
    get,
    path = "/admin/customer-groups/{id}",
    params(
        ("id" = String, Path, description = "Customer group id")
    ),
    responses(
        (status = 200, description = "Customer group", body = CustomerGroupResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Customer group not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Customer Groups"
)]
pub async fn get_customer_group(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<(StatusCode, Json<CustomerGroupResponse>)> {
    let group = state.customer_groups.get_group(&group_id).await?;

    Ok((StatusCode::OK, Json(group.into())))
}

#[utoipa::path(
    post,
    path = "/admin/customer-groups/{id}/customers/batch",
    params(
        ("id" = String, Path, description = "Customer group id")
    ),
    request_body = AddCustomersBatchRequest,
    responses(
        (status = 200, description = "Customers added to the group", body = CustomerGroupResponse),
        (status = 400, description = "Invalid batch payload", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Customer group not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Customer Groups"
)]
pub async fn add_customers_batch(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    payload: Result<Json<AddCustomersBatchRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CustomerGroupResponse>)> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = validate_batch_add(&group_id, payload, state.max_batch_size)?;
    tracing::debug!(
        admin_id = %admin.id,
        group_id = %request.group_id,
        customers = request.customer_ids.len(),
        "batch add requested"
    );

    let group = state.customer_groups.add_customers_to_group(request).await?;

    Ok((StatusCode::OK, Json(group.into())))
}
