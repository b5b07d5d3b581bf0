use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Customer Groups Admin API"),
    paths(
        crate::core::http::handlers::health,
        crate::customer_groups::http::handlers::get_customer_group,
        crate::customer_groups::http::handlers::add_customers_batch
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::customer_groups::http::AddCustomersBatchRequest,
        crate::customer_groups::http::CustomerIdRef,
        crate::customer_groups::http::CustomerGroupDto,
        crate::customer_groups::http::CustomerGroupResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Core", description = "Service endpoints"),
        (name = "Customer Groups", description = "Customer group membership endpoints")
    )
)]
pub struct ApiDoc;
