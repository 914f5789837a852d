use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API version reported by the health check
pub const API_VERSION: &str = "1.0";

/// Payload returned by `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Server is running")]
    pub message: String,
    #[schema(example = "1.0")]
    pub api_version: String,
}

impl HealthResponseDto {
    pub fn running() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Server is running".to_string(),
            api_version: API_VERSION.to_string(),
        }
    }
}

/// Payload returned by the `/api/test` probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponseDto {
    #[schema(example = "ok")]
    pub test: String,
}

impl ProbeResponseDto {
    pub fn ok() -> Self {
        Self {
            test: "ok".to_string(),
        }
    }
}
