use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::backendless_service;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub upstream: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "users-proxy-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: backendless_service::collection_url(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
