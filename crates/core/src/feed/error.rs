use thiserror::Error;

/// # Summary
/// 行情源错误枚举，覆盖传输、协议与兜底数据问题。
///
/// # Invariants
/// - 配额耗尽不属于错误，由 `ProviderResponse::QuotaExceeded` 表达。
/// - 所有变体的 `Display` 都非空，可直接作为界面错误信息。
#[derive(Error, Debug)]
pub enum FeedError {
    // 网络层故障 (连接失败、读取中断等)
    #[error("Network error: {0}")]
    Network(String),
    // HTTP 状态码非 2xx
    #[error("Something went wrong (HTTP {0})")]
    Status(u16),
    // 响应体既不是行情数据也不是配额提示
    #[error("Parse error: {0}")]
    Parse(String),
    // 数据源明确返回的错误信息 (例如非法参数)
    #[error("Provider error: {0}")]
    Provider(String),
    // 内置兜底数据集无法读取
    #[error("Fallback dataset error: {0}")]
    Fallback(String),
}
