use actix_web::{get, HttpResponse, Responder};
use serde::Serialize;
use utoipa::OpenApi;

use crate::openapi::{ApiDoc, HealthDoc};

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: i64,
}

/// 健康检查端点
///
/// 供外部监控系统确认服务仍在响应请求。
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "服务健康", body = HealthDoc)
    )
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// 以 JSON 形式返回 OpenAPI 文档
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
