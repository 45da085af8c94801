use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// 存放所有玩家数据文件的目录
    pub data_dir: PathBuf,
    /// 单文件模式下使用的固定数据文件，未设置时每个请求必须携带 `file` 参数
    #[serde(default)]
    pub default_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            default_file: None,
        }
    }
}

impl AppConfig {
    /// 从环境变量 (以及 .env 文件) 读取配置
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let default_file = env::var("DEFAULT_DATA_FILE")
            .ok()
            .filter(|f| !f.trim().is_empty());

        Self {
            host,
            port,
            data_dir,
            default_file,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| AppError::ConfigError(format!("无法打开配置文件 {}: {e}", path.display())))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AppError::ConfigError(format!("读取配置文件失败: {e}")))?;

        serde_json::from_str(&contents)
            .map_err(|e| AppError::ConfigError(format!("解析配置文件失败: {e}")))
    }

    /// 如果设置了 CONFIG_FILE 则从文件加载，否则使用环境变量
    pub fn load() -> AppResult<Self> {
        dotenv::dotenv().ok();

        match env::var("CONFIG_FILE") {
            Ok(path) if !path.trim().is_empty() => {
                log::info!("Loading config from {}", path);
                Self::from_file(path)
            }
            _ => Ok(Self::from_env()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_fills_optional_default_file() {
        let dir = env::temp_dir().join(format!("player-store-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"host":"0.0.0.0","port":8081,"data_dir":"/srv/players"}"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8081);
        assert_eq!(config.data_dir, PathBuf::from("/srv/players"));
        assert!(config.default_file.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
