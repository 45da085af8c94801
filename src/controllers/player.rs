use actix_web::{get, post, web, HttpResponse};
use log::debug;
use serde_json::Value;

use crate::models::{FileQuery, PlayerPatch, PlayerUpdatedResponse};
use crate::openapi::{MessageDoc, PlayerDoc, PlayerUpdatedDoc};
use crate::services::PlayerStoreService;
use crate::utils::error::AppResult;
use crate::utils::file_name::resolve_file_name;

pub const MISSING_FILE_MESSAGE: &str = "Missing file parameter.";

/// 按 ID 获取玩家
///
/// 查询参数 `file` 指定数据文件；单文件模式下可省略。
#[utoipa::path(
    get,
    path = "/api/player/{id}",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID"),
        FileQuery
    ),
    responses(
        (status = 200, description = "玩家记录", body = PlayerDoc),
        (status = 400, description = "缺少或非法的 file 参数", body = MessageDoc),
        (status = 404, description = "玩家不存在", body = MessageDoc),
        (status = 500, description = "数据文件损坏", body = MessageDoc)
    )
)]
#[get("/player/{id}")]
pub async fn get_player(
    path: web::Path<String>,
    query: web::Query<FileQuery>,
    store: web::Data<PlayerStoreService>,
) -> AppResult<HttpResponse> {
    let player_id = path.into_inner();
    let file_name = resolve_file_name(query.file.as_deref(), store.default_file(), MISSING_FILE_MESSAGE)?;

    debug!("接收到获取玩家请求: id={}, file={}", player_id, file_name);

    let player = store.get_player(&player_id, &file_name).await?;

    Ok(HttpResponse::Ok().json(player))
}

/// 更新玩家数据
///
/// 请求体中的字段会覆盖已有记录的同名字段，`name` 和 `score` 为必填。
#[utoipa::path(
    post,
    path = "/api/player/{id}",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID"),
        FileQuery
    ),
    request_body = PlayerDoc,
    responses(
        (status = 200, description = "更新成功", body = PlayerUpdatedDoc),
        (status = 400, description = "缺少 name/score 或 file 参数", body = MessageDoc),
        (status = 404, description = "玩家不存在", body = MessageDoc),
        (status = 500, description = "写入失败", body = MessageDoc)
    )
)]
#[post("/player/{id}")]
pub async fn update_player(
    path: web::Path<String>,
    query: web::Query<FileQuery>,
    body: web::Json<Value>,
    store: web::Data<PlayerStoreService>,
) -> AppResult<HttpResponse> {
    let player_id = path.into_inner();
    let patch = PlayerPatch::from_value(body.into_inner())?;
    let file_name = resolve_file_name(query.file.as_deref(), store.default_file(), MISSING_FILE_MESSAGE)?;

    debug!("接收到更新玩家请求: id={}, file={}", player_id, file_name);

    let player = store.update_player(&player_id, &patch, &file_name).await?;

    Ok(HttpResponse::Ok().json(PlayerUpdatedResponse {
        message: "Player updated successfully".to_string(),
        player,
    }))
}
