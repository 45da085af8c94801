use actix_web::{post, web, HttpResponse};
use serde_json::Value;

use crate::models::{DatasetCreatedResponse, FileQuery};
use crate::openapi::{DatasetCreatedDoc, MessageDoc, PlayerDoc};
use crate::services::PlayerStoreService;
use crate::utils::error::{AppError, AppResult};
use crate::utils::file_name::resolve_file_name;

pub const MISSING_CREATE_FILE_MESSAGE: &str = "Missing required file parameter in query string.";
pub const NOT_AN_ARRAY_MESSAGE: &str = "Request body must be an array of players.";

/// 用请求体中的玩家数组创建 (或整体覆盖) 数据文件
///
/// 即使在单文件模式下也必须显式提供 `file`。
#[utoipa::path(
    post,
    path = "/api/players/create",
    tag = "players",
    params(FileQuery),
    request_body = Vec<PlayerDoc>,
    responses(
        (status = 201, description = "数据文件已创建", body = DatasetCreatedDoc),
        (status = 400, description = "缺少 file 参数或请求体不是数组", body = MessageDoc),
        (status = 500, description = "写入失败", body = MessageDoc)
    )
)]
#[post("/players/create")]
pub async fn create_players(
    query: web::Query<FileQuery>,
    body: web::Json<Value>,
    store: web::Data<PlayerStoreService>,
) -> AppResult<HttpResponse> {
    let file_name = resolve_file_name(query.file.as_deref(), None, MISSING_CREATE_FILE_MESSAGE)?;

    let players = match body.into_inner() {
        Value::Array(players) => players,
        _ => return Err(AppError::BadRequest(NOT_AN_ARRAY_MESSAGE.to_string())),
    };

    log::info!("创建数据文件 {}，共 {} 条记录", file_name, players.len());

    store.create_dataset(&players, &file_name).await?;

    Ok(HttpResponse::Created().json(DatasetCreatedResponse {
        message: format!("New players created and saved to {file_name}."),
        file_name,
    }))
}
