use thiserror::Error;

/// # Summary
/// 本地键值存储错误枚举。
///
/// # Invariants
/// - `Deserialize` 专指已存条目无法还原为目标类型 (条目损坏或结构过期)。
/// - 调用方可据此区分 "条目损坏" 与 "存储不可用"。
#[derive(Error, Debug)]
pub enum CacheError {
    // 写入前序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
    // 已存条目无法反序列化
    #[error("Deserialize error: {0}")]
    Deserialize(String),
    // 底层存储 (内存/文件) 故障
    #[error("Storage error: {0}")]
    Storage(String),
}
