use async_trait::async_trait;
use dashmap::DashMap;
use intraday_core::cache::error::CacheError;
use intraday_core::cache::port::Cache;

/// # Summary
/// 基于 DashMap 的进程内缓存。
///
/// # Invariants
/// - 生命周期与进程相同，不做持久化。
/// - 不提供自动过期或容量限制。
pub struct MemCache {
    // 线程安全的 KV 容器
    storage: DashMap<String, Vec<u8>>,
}

impl MemCache {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// 当前条目数量
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemCache {
    /// 插入或覆盖同名条目。
    async fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.storage.insert(key.to_string(), value);
        Ok(())
    }

    /// 克隆出条目字节，避免持有分片锁跨越 await。
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.storage.get(key).map(|v| v.value().clone()))
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }
}
