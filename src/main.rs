use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;

mod config;
mod controllers;
mod models;
mod openapi;
mod routes;
mod services;
mod utils;

use config::AppConfig;
use services::PlayerStoreService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载.env文件
    dotenv::dotenv().ok();

    // 初始化日志
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let player_store = web::Data::new(PlayerStoreService::new(&config));

    log::info!("Data directory: {}", player_store.data_dir().display());
    match player_store.default_file() {
        Some(file) => log::info!("单文件模式，默认数据文件: {}", file),
        None => log::info!("多文件模式，请求需携带 file 参数"),
    }

    log::info!("Server is running on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        // 允许任意来源跨域访问
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(player_store.clone())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
