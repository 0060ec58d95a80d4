use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static UPSTREAM_CONNECT_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_upstream_connect_error_count() {
    UPSTREAM_CONNECT_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text format metrics")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let requests = REQUEST_COUNT.load(Ordering::Relaxed);
    let errors = ERROR_COUNT.load(Ordering::Relaxed);
    let upstream_errors = UPSTREAM_CONNECT_ERROR_COUNT.load(Ordering::Relaxed);

    let metrics = format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP error responses\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n\
         \n\
         # HELP upstream_connect_errors_total Failures to reach the Backendless API\n\
         # TYPE upstream_connect_errors_total counter\n\
         upstream_connect_errors_total {}\n",
        requests, errors, upstream_errors
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[actix_web::test]
    async fn exposes_all_three_counters() {
        increment_request_count();
        increment_error_count();
        increment_upstream_connect_error_count();

        let resp = get_metrics().await;
        let bytes = resp
            .into_body()
            .try_into_bytes()
            .unwrap_or_else(|_| panic!("metrics body should be inline"));
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.contains("http_requests_total"));
        assert!(text.contains("http_errors_total"));
        assert!(text.contains("upstream_connect_errors_total"));
    }
}
