//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Liveness report for the back-office engine and its database
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "reachable",
        Err(_) => "unreachable",
    };

    Json(HealthResponse {
        status: "ok",
        service: "store-backoffice",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_names_the_service() {
        let response = HealthResponse {
            status: "ok",
            service: "store-backoffice",
            version: env!("CARGO_PKG_VERSION"),
            database: "reachable",
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["service"], "store-backoffice");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "reachable");
    }
}
