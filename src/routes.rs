use actix_web::web;

use crate::controllers;
use crate::utils::error::AppError;

/// 请求体无法解析为 JSON 时返回带 `message` 的 400
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("请求体解析失败: {}", err);
        AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
    })
}

/// 查询参数无法解析时同样返回带 `message` 的 400
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("查询参数解析失败: {}", err);
        AppError::BadRequest(format!("Invalid query string: {err}")).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(controllers::health_check) // GET /health
        .service(controllers::openapi_json) // GET /api-docs/openapi.json
        .service(
            web::scope("/api")
                .service(controllers::get_player) // GET /api/player/{id}
                .service(controllers::update_player) // POST /api/player/{id}
                .service(controllers::create_players), // POST /api/players/create
        );
}
