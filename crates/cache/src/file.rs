use async_trait::async_trait;
use intraday_core::cache::error::CacheError;
use intraday_core::cache::port::Cache;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// # Summary
/// 基于本地文件的持久化缓存，每个键对应根目录下的一个 JSON 文件。
///
/// Layout: `{root}/{key}.json`
///
/// # Invariants
/// - 写入先落到 `.tmp` 再原子重命名，读取方不会看到半截文件。
/// - 根目录在首次写入时创建。
/// - 单写者：同一键不做跨进程加锁。
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// # Summary
    /// 计算键对应的文件路径。
    ///
    /// # Logic
    /// 1. 拒绝空键。
    /// 2. 字母、数字、`-`、`_`、`.` 以外的字符替换为 `_`，防止路径穿越。
    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() {
            return Err(CacheError::Storage("empty cache key".into()));
        }
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Ok(self.root.join(format!("{name}.json")))
    }
}

#[async_trait]
impl Cache for FileCache {
    async fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::Storage(format!("failed to create dir: {e}")))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &value)
            .await
            .map_err(|e| CacheError::Storage(format!("write failed: {e}")))?;

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                debug!("failed to remove {}: {}", tmp_path.display(), cleanup);
            }
            return Err(CacheError::Storage(format!("atomic rename failed: {e}")));
        }

        debug!("cache entry {} written ({} bytes)", path.display(), value.len());
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Storage(format!("read failed: {e}"))),
        }
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Storage(format!("remove failed: {e}"))),
        }
    }
}
