use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Proxy Service API",
        version = "1.0.0",
        description = "Thin CRUD proxy in front of the Backendless 'users1' data table.\n\nEvery operation forwards a single call upstream and hands the reply back with the upstream's status code. Records are owned by Backendless; the proxy keeps no state of its own.",
        contact(
            name = "Users Proxy Service Team",
            email = "support@users-proxy-service.com"
        )
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users proxy
        crate::api::users::get_all_users,
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::backendless_service::CreateUserRequest,
            crate::services::backendless_service::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Users", description = "CRUD proxy over the Backendless 'users1' table. objectId is assigned upstream, never generated here."),
        (name = "Health", description = "Health check and metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
