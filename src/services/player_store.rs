use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::config::AppConfig;
use crate::models::player::{find_player_index, Dataset, PlayerPatch};
use crate::utils::error::{AppError, AppResult, StorageError};

pub const PLAYER_NOT_FOUND: &str = "Player not found";
pub const PLAYER_NOT_FOUND_FOR_UPDATE: &str = "Player not found for update";
pub const UPDATE_FAILED: &str = "Server error during update";
pub const CREATE_FAILED: &str = "Server error: Could not write new player data.";

/// 临时文件所在的子目录，合法的数据文件名不能以 `.` 开头，因此不会与之冲突
const TMP_DIR: &str = ".tmp";

type LockMap = Mutex<HashMap<String, Arc<AsyncMutex<()>>>>;

/// 读取数据文件的结果
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetLoad {
    /// 文件不存在，按空数据集处理
    Missing,
    /// 文件存在但无法读取或不是 JSON 数组
    Corrupt(String),
    Loaded(Dataset),
}

impl DatasetLoad {
    /// 文件不存在视为空数据集，文件损坏则返回错误
    pub fn into_players(self, file_name: &str) -> AppResult<Dataset> {
        match self {
            DatasetLoad::Loaded(players) => Ok(players),
            DatasetLoad::Missing => Ok(Vec::new()),
            DatasetLoad::Corrupt(reason) => {
                log::error!("拒绝使用损坏的数据文件 {}: {}", file_name, reason);
                Err(AppError::CorruptDataset(file_name.to_string()))
            }
        }
    }
}

/// 基于 JSON 文件的玩家数据服务
///
/// 每个请求都完整地读取、修改、写回一个文件。同一文件的读写通过按文件名划分的
/// 异步锁串行执行，不同文件之间互不影响。
#[derive(Clone)]
pub struct PlayerStoreService {
    data_dir: PathBuf,
    default_file: Option<String>,
    locks: Arc<LockMap>,
}

/// 持有某个数据文件的锁，释放时若没有其他请求在等待则从锁表中移除
struct FileLock<'a> {
    locks: &'a LockMap,
    file_name: String,
    lock: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // 锁表和自身各持有一份引用
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.file_name);
        }
    }
}

impl PlayerStoreService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            default_file: config.default_file.clone(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn default_file(&self) -> Option<&str> {
        self.default_file.as_deref()
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    async fn lock_file(&self, file_name: &str) -> FileLock<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(file_name.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        let guard = lock.clone().lock_owned().await;

        FileLock {
            locks: &self.locks,
            file_name: file_name.to_string(),
            lock,
            guard: Some(guard),
        }
    }

    /// 读取整个数据文件
    pub async fn load_dataset(&self, file_name: &str) -> DatasetLoad {
        let path = self.file_path(file_name);

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("数据文件 {} 不存在，按空数据集处理", file_name);
                return DatasetLoad::Missing;
            }
            Err(e) => {
                log::error!("Error reading data file {}: {}", file_name, e);
                return DatasetLoad::Corrupt(e.to_string());
            }
        };

        match serde_json::from_str::<Dataset>(&contents) {
            Ok(players) => {
                log::debug!("已从 {} 加载 {} 条玩家记录", file_name, players.len());
                DatasetLoad::Loaded(players)
            }
            Err(e) => {
                log::warn!("数据文件 {} 解析失败: {}", file_name, e);
                DatasetLoad::Corrupt(e.to_string())
            }
        }
    }

    /// 用 `players` 整体覆盖数据文件
    ///
    /// 先写入数据目录下 `.tmp/` 中的临时文件再重命名，避免读到写了一半的内容。
    /// 临时文件名只由 uuid 构成，与数据文件名的长度无关。
    pub async fn save_dataset(&self, players: &[Value], file_name: &str) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            file: file_name.to_string(),
            source,
        };

        let data = serde_json::to_string_pretty(players).map_err(|source| StorageError::Serialize {
            file: file_name.to_string(),
            source,
        })?;

        let tmp_dir = self.data_dir.join(TMP_DIR);
        fs::create_dir_all(&tmp_dir).await.map_err(io_error)?;

        let target = self.file_path(file_name);
        let tmp = tmp_dir.join(format!("{}.tmp", uuid::Uuid::new_v4()));

        let written = match fs::write(&tmp, data.as_bytes()).await {
            Ok(()) => fs::rename(&tmp, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            fs::remove_file(&tmp).await.ok();
            return Err(io_error(e));
        }

        log::info!("已写入 {} 条玩家记录到 {}", players.len(), file_name);
        Ok(())
    }

    pub async fn get_player(&self, player_id: &str, file_name: &str) -> AppResult<Value> {
        let _lock = self.lock_file(file_name).await;

        let mut players = self.load_dataset(file_name).await.into_players(file_name)?;

        match find_player_index(&players, player_id) {
            Some(index) => Ok(players.swap_remove(index)),
            None => Err(AppError::NotFound(PLAYER_NOT_FOUND.to_string())),
        }
    }

    /// 合并部分字段到已有玩家并写回整个文件
    pub async fn update_player(
        &self,
        player_id: &str,
        patch: &PlayerPatch,
        file_name: &str,
    ) -> AppResult<Value> {
        let _lock = self.lock_file(file_name).await;

        let mut players = self.load_dataset(file_name).await.into_players(file_name)?;

        let index = find_player_index(&players, player_id)
            .ok_or_else(|| AppError::NotFound(PLAYER_NOT_FOUND_FOR_UPDATE.to_string()))?;

        patch.apply_to(&mut players[index]);

        if let Err(e) = self.save_dataset(&players, file_name).await {
            log::error!("更新玩家 {} 失败: {} ({:?})", player_id, e, e);
            return Err(AppError::Storage {
                message: UPDATE_FAILED,
                source: e,
            });
        }

        Ok(players.swap_remove(index))
    }

    /// 用新的玩家列表创建 (或覆盖) 数据文件，不校验单条记录
    pub async fn create_dataset(&self, players: &[Value], file_name: &str) -> AppResult<()> {
        let _lock = self.lock_file(file_name).await;

        self.save_dataset(players, file_name).await.map_err(|e| {
            log::error!("创建数据文件失败: {} ({:?})", e, e);
            AppError::Storage {
                message: CREATE_FAILED,
                source: e,
            }
        })
    }
}
