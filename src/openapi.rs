// 以下结构体只用于生成文档
#![allow(dead_code)]

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

/// 玩家记录，除下列字段外还可以携带任意其他字段
#[derive(ToSchema)]
pub struct PlayerDoc {
    pub id: String,
    pub name: String,
    pub score: f64,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    pub message: String,
}

#[derive(ToSchema)]
pub struct PlayerUpdatedDoc {
    pub message: String,
    pub player: PlayerDoc,
}

#[derive(Serialize, ToSchema)]
pub struct DatasetCreatedDoc {
    pub message: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(ToSchema)]
pub struct HealthDoc {
    pub status: String,
    pub timestamp: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::controllers::health::health_check,
        crate::controllers::player::get_player,
        crate::controllers::player::update_player,
        crate::controllers::dataset::create_players,
    ),
    components(
        schemas(
            PlayerDoc,
            MessageDoc,
            PlayerUpdatedDoc,
            DatasetCreatedDoc,
            HealthDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "players")
    )
)]
pub struct ApiDoc;
