use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use crate::customer_groups::service::CustomerGroupService;

pub mod app;
pub mod config;
pub mod core;
pub mod customer_groups;
pub mod error;
mod extractors;

#[derive(Clone)]
pub struct AppState {
    pub customer_groups: CustomerGroupService,
    pub jwt_dec: DecodingKey,
    pub max_batch_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin user id
    pub iat: i64,
    pub exp: i64,
}
