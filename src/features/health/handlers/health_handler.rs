use axum::Json;

use crate::features::health::dtos::{HealthResponseDto, ProbeResponseDto};

/// Report service liveness
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponseDto),
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto::running())
}

/// Reachability check
///
/// Answers every HTTP method (GET, POST, PUT, PATCH, DELETE, ...) with the same
/// payload. The document lists it under GET only.
#[utoipa::path(
    get,
    path = "/api/test",
    responses(
        (status = 200, description = "Process is reachable, whatever the method", body = ProbeResponseDto),
    ),
    tag = "health"
)]
pub async fn test_probe() -> Json<ProbeResponseDto> {
    Json(ProbeResponseDto::ok())
}
