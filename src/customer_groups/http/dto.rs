use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::customer_groups::model::CustomerGroup;

#[derive(Deserialize, ToSchema)]
pub struct CustomerIdRef {
    pub id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomersBatchRequest {
    pub customer_ids: Vec<CustomerIdRef>,
}

#[derive(Serialize, ToSchema)]
pub struct CustomerGroupDto {
    pub id: String,
    pub name: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub customer_ids: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

#[derive(Serialize, ToSchema)]
pub struct CustomerGroupResponse {
    #[serde(rename = "customerGroup")]
    pub customer_group: CustomerGroupDto,
}

impl From<CustomerGroup> for CustomerGroupResponse {
    fn from(group: CustomerGroup) -> Self {
        Self {
            customer_group: CustomerGroupDto {
                id: group.id,
                name: group.name,
                metadata: group.metadata,
                customer_ids: group.customer_ids.into_iter().collect(),
                created_at: group.created_at,
                updated_at: group.updated_at,
            },
        }
    }
}
