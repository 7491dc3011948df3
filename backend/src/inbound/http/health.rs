//! Health endpoints: liveness and readiness probes plus the root greeting.

use actix_web::{HttpResponse, get, http::header};

use crate::domain::ApiResult;
use crate::inbound::http::envelope::Envelope;

fn probe_response() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Root greeting, kept for uptime checks pointed at `/`.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting")),
    tags = ["health"],
    operation_id = "root",
    security([])
)]
#[get("/")]
pub async fn root() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Envelope::message("BloodLink server is running.")))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Process is alive")),
    tags = ["health"],
    operation_id = "healthLive",
    security([])
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe_response()
}

/// Readiness probe. The in-process store needs no warm-up, so readiness
/// follows liveness.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses((status = 200, description = "Ready for traffic")),
    tags = ["health"],
    operation_id = "healthReady",
    security([])
)]
#[get("/health/ready")]
pub async fn ready() -> HttpResponse {
    probe_response()
}
