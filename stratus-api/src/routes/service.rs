//! Service banner endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub service: String,
}

/// GET / - identify the service.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Weather Cache Backend".to_string(),
        service: "weather-cache-backend".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_the_service() {
        let info = ServiceInfo {
            message: "Weather Cache Backend".to_string(),
            service: "weather-cache-backend".to_string(),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"service\":\"weather-cache-backend\""));
    }
}
