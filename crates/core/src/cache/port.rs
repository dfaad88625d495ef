use crate::cache::error::CacheError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// # Summary
/// 本地持久化键值存储接口 (Port)。
///
/// # Invariants
/// - 处理原始字节，保持 Trait 对象安全，以便以 `Arc<dyn Cache>` 注入流水线。
/// - 不提供过期策略，条目一经写入即长期有效，直到被覆盖或删除。
#[async_trait]
pub trait Cache: Send + Sync {
    /// # Summary
    /// 写入原始字节，覆盖同名条目。
    ///
    /// # Arguments
    /// * `key`: 条目名称。
    /// * `value`: 原始字节。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `CacheError::Storage`。
    async fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;

    /// # Summary
    /// 读取原始字节。
    ///
    /// # Returns
    /// 条目存在返回 `Some`，不存在返回 `None`。
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// 删除条目，条目不存在时同样返回 Ok。
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// # Summary
/// 强类型读写扩展，以 JSON 作为持久化格式。
///
/// # Invariants
/// - 自动为所有实现 `Cache` 的类型 (包括 `dyn Cache`) 提供。
#[async_trait]
pub trait CacheExt: Cache {
    /// # Summary
    /// 以 JSON 序列化后写入对象。
    ///
    /// # Logic
    /// 1. `serde_json::to_vec` 序列化。
    /// 2. 调用底层 `set_raw`。
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value).map_err(|e| CacheError::Serialize(e.to_string()))?;
        self.set_raw(key, bytes).await
    }

    /// # Summary
    /// 读取并反序列化对象。
    ///
    /// # Logic
    /// 1. 调用底层 `get_raw`。
    /// 2. 条目存在时以 JSON 反序列化为目标类型。
    ///
    /// # Returns
    /// * `Ok(None)`: 条目不存在。
    /// * `Err(CacheError::Deserialize)`: 条目存在但内容损坏。
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| CacheError::Deserialize(e.to_string())),
            None => Ok(None),
        }
    }
}

impl<T: Cache + ?Sized> CacheExt for T {}
