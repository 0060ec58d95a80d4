use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;

// Backendless data API for the 'users1' table
const BACKENDLESS_API_URL: &str = "https://strongquestion-us.backendless.app/api/data/users1";

#[cfg(test)]
pub(crate) static TEST_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// URL da coleção no Backendless (sobrescrevível via BACKENDLESS_API_URL no .env)
pub fn collection_url() -> String {
    env::var("BACKENDLESS_API_URL").unwrap_or_else(|_| BACKENDLESS_API_URL.to_string())
}

/// URL de um registro individual (objectId vai percent-encoded no path)
fn item_url(object_id: &str) -> String {
    format!("{}/{}", collection_url(), urlencoding::encode(object_id))
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub nombre: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Upstream reply already funneled through `normalize_response`.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

/// Standardizes the reply coming back from Backendless.
///
/// JSON body + 2xx status goes through untouched; JSON body + error status is
/// reshaped into `{error, details}`; a body that is not JSON at all (empty
/// 200/204 replies from DELETE/PUT) becomes `{message}`. The upstream status
/// code is preserved in every branch.
pub async fn normalize_response(response: reqwest::Response) -> Result<UpstreamResponse, String> {
    let status = response.status();
    let text = response.text().await.map_err(|e| e.to_string())?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(data) => {
            if status.is_success() {
                data
            } else {
                // Backendless error structure usually includes a 'message' or 'code'
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("An unexpected Backendless error occurred.")
                    .to_string();
                json!({ "error": message, "details": data })
            }
        }
        Err(_) => {
            let message = if text.is_empty() {
                "Operation successful".to_string()
            } else {
                text
            };
            json!({ "message": message })
        }
    };

    Ok(UpstreamResponse {
        status: status.as_u16(),
        body,
    })
}

/// Busca todos os registros da tabela 'users1'
pub async fn fetch_all_users() -> Result<UpstreamResponse, String> {
    let url = collection_url();
    log::info!("📡 GET {} - fetching all users", url);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    normalize_response(response).await
}

/// Cria um novo registro na tabela 'users1'
pub async fn create_user(request: &CreateUserRequest) -> Result<UpstreamResponse, String> {
    let url = collection_url();
    log::info!("📡 POST {} - creating user '{}'", url, request.nombre);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("Accept", "application/json")
        .json(request)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    normalize_response(response).await
}

/// Busca um registro pelo objectId
pub async fn fetch_user(object_id: &str) -> Result<UpstreamResponse, String> {
    let url = item_url(object_id);
    log::info!("📡 GET {} - fetching user {}", url, object_id);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    normalize_response(response).await
}

/// Atualiza um registro pelo objectId (somente os campos presentes vão no PUT)
pub async fn update_user(
    object_id: &str,
    request: &UpdateUserRequest,
) -> Result<UpstreamResponse, String> {
    let url = item_url(object_id);
    log::info!("📡 PUT {} - updating user {}", url, object_id);

    let client = reqwest::Client::new();
    let response = client
        .put(&url)
        .header("Accept", "application/json")
        .json(request)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    normalize_response(response).await
}

/// Remove um registro pelo objectId
pub async fn delete_user(object_id: &str) -> Result<UpstreamResponse, String> {
    let url = item_url(object_id);
    log::info!("📡 DELETE {} - deleting user {}", url, object_id);

    let client = reqwest::Client::new();
    let response = client
        .delete(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    normalize_response(response).await
}
