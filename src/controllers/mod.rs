pub mod dataset;
pub mod health;
pub mod player;

pub use dataset::create_players;
pub use health::{health_check, openapi_json};
pub use player::{get_player, update_player};
