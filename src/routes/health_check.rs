use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};

/// Health check body
#[derive(serde::Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
}

/// Health check handler, independent of the database
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
