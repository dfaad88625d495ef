use crate::common::Instrument;
use crate::feed::error::FeedError;
use crate::quote::entity::RawTimeSeries;
use async_trait::async_trait;

/// # Summary
/// 数据源一次查询的判别结果。
///
/// # Invariants
/// - 由适配器依据响应体结构判定，不依据 HTTP 状态码 (两种情况均为 200)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    // 正常返回的原始时间序列
    Success(RawTimeSeries),
    // 配额耗尽时数据源给出的提示信息
    QuotaExceeded(String),
}

/// # Summary
/// 日内行情数据源接口 (Port)。
///
/// # Invariants
/// - 标的与访问凭证在构造时注入，调用方不感知。
/// - 每次 `fetch` 至多发起一次网络请求，不做重试。
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// 数据源所服务的标的
    fn instrument(&self) -> &Instrument;

    /// # Summary
    /// 拉取标的的日内时间序列。
    ///
    /// # Logic
    /// 1. 发起一次查询请求。
    /// 2. 传输失败或非成功状态码返回 `FeedError`。
    /// 3. 根据响应体结构区分正常数据与配额提示。
    ///
    /// # Returns
    /// 成功返回 `ProviderResponse`，失败返回 `FeedError`。
    async fn fetch(&self) -> Result<ProviderResponse, FeedError>;
}
