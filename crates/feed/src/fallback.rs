use crate::alphavantage::AlphaVantagePayload;
use intraday_core::feed::error::FeedError;
use intraday_core::quote::entity::RawTimeSeries;

// 与成功响应结构完全一致的静态快照，编译期嵌入
const BUNDLED_PAYLOAD: &str = include_str!("../assets/alphavantage_ibm_5min.json");

/// # Summary
/// 读取内置的兜底数据集。
///
/// # Logic
/// 解析编译期嵌入的快照，取出其中的 5 分钟时间序列。
///
/// # Returns
/// 成功返回原始时间序列；快照结构不符返回 `FeedError::Fallback`。
pub fn bundled() -> Result<RawTimeSeries, FeedError> {
    parse_payload(BUNDLED_PAYLOAD)
}

/// # Summary
/// 将成功响应形状的 JSON 文本解析为原始时间序列。
///
/// # Arguments
/// * `json`: 与数据源成功响应结构一致的文本。
///
/// # Returns
/// 缺少时间序列字段或 JSON 非法时返回 `FeedError::Fallback`。
pub fn parse_payload(json: &str) -> Result<RawTimeSeries, FeedError> {
    let payload: AlphaVantagePayload =
        serde_json::from_str(json).map_err(|e| FeedError::Fallback(e.to_string()))?;
    payload
        .time_series
        .ok_or_else(|| FeedError::Fallback("missing \"Time Series (5min)\"".into()))
}
