use axum::{Router, routing::get};

use crate::AppState;
use crate::app::docs;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(crate::core::http::routes())
        .nest(
            "/admin/customer-groups",
            crate::customer_groups::http::routes(),
        )
        .route("/docs", get(docs::swagger_ui))
        .route(docs::OPENAPI_PATH, get(docs::openapi_spec))
        .with_state(state)
}
