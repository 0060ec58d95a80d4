use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::api::metrics;
use crate::services::backendless_service::{
    self, CreateUserRequest, UpdateUserRequest, UpstreamResponse,
};

/// Converte a resposta normalizada do upstream em resposta local com o mesmo status
fn upstream_reply(upstream: UpstreamResponse) -> HttpResponse {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if status.is_client_error() || status.is_server_error() {
        metrics::increment_error_count();
    }
    HttpResponse::build(status).json(upstream.body)
}

fn connectivity_error(details: String) -> HttpResponse {
    metrics::increment_error_count();
    metrics::increment_upstream_connect_error_count();
    HttpResponse::ServiceUnavailable().json(json!({
        "error": "Failed to connect to Backendless API",
        "details": details
    }))
}

fn bad_request(message: &str) -> HttpResponse {
    metrics::increment_error_count();
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

/// GET /users - Lista todos os usuários da tabela 'users1'
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records, exactly as returned by Backendless", body = Value),
        (status = 503, description = "Backendless unreachable")
    )
)]
pub async fn get_all_users() -> impl Responder {
    metrics::increment_request_count();
    log::info!("📋 GET /users - listing all users");

    match backendless_service::fetch_all_users().await {
        Ok(upstream) => upstream_reply(upstream),
        Err(e) => {
            log::error!("❌ Network or API connectivity error: {}", e);
            connectivity_error(e)
        }
    }
}

/// POST /users - Cria um usuário ('nombre' e 'email' obrigatórios)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Record created, body as returned by Backendless", body = Value),
        (status = 400, description = "Body is not JSON, or 'nombre'/'email' missing or empty"),
        (status = 503, description = "Backendless unreachable")
    )
)]
pub async fn create_user(body: web::Bytes) -> impl Responder {
    metrics::increment_request_count();

    let data: Value = match serde_json::from_slice(&body) {
        Ok(data) => data,
        Err(_) => {
            log::warn!("⚠️ POST /users - body is not valid JSON");
            return bad_request("Missing JSON in request");
        }
    };

    let nombre = data.get("nombre").and_then(Value::as_str).unwrap_or_default();
    let email = data.get("email").and_then(Value::as_str).unwrap_or_default();

    if nombre.is_empty() || email.is_empty() {
        log::warn!("⚠️ POST /users - missing 'nombre' and/or 'email'");
        return bad_request("Missing required fields: 'nombre' and 'email'");
    }

    // Only these two fields are ever forwarded on create
    let request = CreateUserRequest {
        nombre: nombre.to_string(),
        email: email.to_string(),
    };

    log::info!("📝 POST /users - creating '{}'", request.nombre);

    match backendless_service::create_user(&request).await {
        Ok(upstream) => upstream_reply(upstream),
        Err(e) => {
            log::error!("❌ Network or API connectivity error: {}", e);
            connectivity_error(e)
        }
    }
}

/// GET /users/{object_id} - Busca um usuário pelo objectId
#[utoipa::path(
    get,
    path = "/users/{object_id}",
    tag = "Users",
    params(
        ("object_id" = String, Path, description = "objectId assigned by Backendless")
    ),
    responses(
        (status = 200, description = "The record, exactly as returned by Backendless", body = Value),
        (status = 404, description = "No record with that objectId upstream"),
        (status = 503, description = "Backendless unreachable")
    )
)]
pub async fn get_user(path: web::Path<String>) -> impl Responder {
    metrics::increment_request_count();
    let object_id = path.into_inner();

    log::info!("🔍 GET /users/{}", object_id);

    match backendless_service::fetch_user(&object_id).await {
        Ok(upstream) => upstream_reply(upstream),
        Err(e) => {
            log::error!("❌ Network or API connectivity error: {}", e);
            connectivity_error(e)
        }
    }
}

/// PUT /users/{object_id} - Atualização parcial ('nombre' e/ou 'email')
#[utoipa::path(
    put,
    path = "/users/{object_id}",
    tag = "Users",
    params(
        ("object_id" = String, Path, description = "objectId assigned by Backendless")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Record updated, body as returned by Backendless", body = Value),
        (status = 400, description = "Body is not JSON, or carries neither 'nombre' nor 'email'"),
        (status = 503, description = "Backendless unreachable")
    )
)]
pub async fn update_user(path: web::Path<String>, body: web::Bytes) -> impl Responder {
    metrics::increment_request_count();
    let object_id = path.into_inner();

    let data: Value = match serde_json::from_slice(&body) {
        Ok(data) => data,
        Err(_) => {
            log::warn!("⚠️ PUT /users/{} - body is not valid JSON", object_id);
            return bad_request("Missing JSON in request");
        }
    };

    // Only the fields present in the body go upstream
    let request = UpdateUserRequest {
        nombre: data.get("nombre").and_then(Value::as_str).map(String::from),
        email: data.get("email").and_then(Value::as_str).map(String::from),
    };

    if request.nombre.is_none() && request.email.is_none() {
        log::warn!("⚠️ PUT /users/{} - no updatable fields in body", object_id);
        return bad_request("No valid fields provided for update ('nombre' or 'email')");
    }

    log::info!("🔧 PUT /users/{} - updating", object_id);

    match backendless_service::update_user(&object_id, &request).await {
        Ok(upstream) => upstream_reply(upstream),
        Err(e) => {
            log::error!("❌ Network or API connectivity error: {}", e);
            connectivity_error(e)
        }
    }
}

/// DELETE /users/{object_id} - Remove um usuário pelo objectId
#[utoipa::path(
    delete,
    path = "/users/{object_id}",
    tag = "Users",
    params(
        ("object_id" = String, Path, description = "objectId assigned by Backendless")
    ),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 503, description = "Backendless unreachable")
    )
)]
pub async fn delete_user(path: web::Path<String>) -> impl Responder {
    metrics::increment_request_count();
    let object_id = path.into_inner();

    log::info!("🗑️ DELETE /users/{}", object_id);

    match backendless_service::delete_user(&object_id).await {
        // Backendless DELETE returns 200/204, often with no content, on success
        Ok(upstream) if upstream.status == 200 || upstream.status == 204 => {
            HttpResponse::Ok().json(json!({
                "message": format!("User {} successfully deleted", object_id)
            }))
        }
        Ok(upstream) => upstream_reply(upstream),
        Err(e) => {
            log::error!("❌ Network or API connectivity error: {}", e);
            connectivity_error(e)
        }
    }
}
