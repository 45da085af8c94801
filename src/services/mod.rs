pub mod player_store;

pub use player_store::PlayerStoreService;
