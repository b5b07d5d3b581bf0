#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use customer_groups_api::customer_groups::{
    CustomerGroup, CustomerGroupService, CustomerGroupStore, RetryPolicy,
    store::InMemoryCustomerGroupStore,
};
use customer_groups_api::{AppState, Claims, app::router::build_router};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, encode};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";
pub const TEST_MAX_BATCH_SIZE: usize = 50;

pub struct TestApp {
    app: Router,
}

pub fn admin_token() -> String {
    token_expiring_at(OffsetDateTime::now_utc() + time::Duration::hours(1))
}

pub fn expired_token() -> String {
    token_expiring_at(OffsetDateTime::now_utc() - time::Duration::hours(1))
}

fn token_expiring_at(exp: OffsetDateTime) -> String {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        iat: OffsetDateTime::now_utc().unix_timestamp(),
        exp: exp.unix_timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token")
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: std::time::Duration::from_millis(1),
    }
}

/// Seeds `group_id` holding `members`; every member is also registered as a
/// customer.
pub async fn seed_group(store: &InMemoryCustomerGroupStore, group_id: &str, members: &[&str]) {
    let mut group = CustomerGroup::new(group_id, format!("group-{group_id}"));
    for member in members {
        store.insert_customer(*member).await;
        group.customer_ids.insert(member.to_string());
    }
    store.insert_group(group).await;
}

pub async fn seed_customers(store: &InMemoryCustomerGroupStore, customer_ids: &[&str]) {
    for customer_id in customer_ids {
        store.insert_customer(*customer_id).await;
    }
}

pub fn member_ids(response: &Value) -> Vec<String> {
    response
        .pointer("/customerGroup/customer_ids")
        .and_then(Value::as_array)
        .expect("response misses customerGroup.customer_ids")
        .iter()
        .map(|id| id.as_str().expect("customer id is not a string").to_string())
        .collect()
}

impl TestApp {
    pub fn new(store: Arc<dyn CustomerGroupStore>) -> Self {
        let state = AppState {
            customer_groups: CustomerGroupService::new(store, fast_retry()),
            jwt_dec: DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
            max_batch_size: TEST_MAX_BATCH_SIZE,
        };

        Self {
            app: build_router(state),
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let body = serde_json::to_vec(&body).expect("failed to serialize request body");
        self.request_json(Method::POST, path, Some(body), bearer)
            .await
    }

    pub async fn post_raw(&self, path: &str, body: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, Some(body.as_bytes().to_vec()), bearer)
            .await
    }

    pub async fn get_json(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::GET, path, None, bearer).await
    }

    pub async fn get_text(&self, path: &str, bearer: Option<&str>) -> (StatusCode, String) {
        let (status, bytes) = self.request(Method::GET, path, None, bearer).await;
        let text = String::from_utf8(bytes).expect("response is not valid utf-8 text");
        (status, text)
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, path, body, bearer).await;

        if bytes.is_empty() {
            return (status, Value::Null);
        }

        let value = serde_json::from_slice(&bytes).expect("response is not valid json");
        (status, value)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        bearer: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req_builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            req_builder = req_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body)
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        (status, bytes.to_vec())
    }
}
