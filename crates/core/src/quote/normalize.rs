use crate::quote::entity::{Quote, RawQuote, RawTimeSeries, TimeSeries};

/// # Summary
/// 将数据源的序号字段名映射为标准字段名。
///
/// # Logic
/// `1. open → open`, `2. high → high`, `3. low → low`, `4. close → close`, `5. volume → volume`。
/// 值按文本原样透传。
impl From<&RawQuote> for Quote {
    fn from(raw: &RawQuote) -> Self {
        Self {
            open: raw.open.clone(),
            high: raw.high.clone(),
            low: raw.low.clone(),
            close: raw.close.clone(),
            volume: raw.volume.clone(),
        }
    }
}

/// # Summary
/// 标准化原始时间序列。
///
/// # Logic
/// 1. 按源顺序遍历每个时间戳。
/// 2. 对每条记录执行字段重命名。
///
/// # Arguments
/// * `raw`: 数据源返回 (或兜底数据集) 的原始时间序列。
///
/// # Returns
/// 与输入一一对应、顺序一致的标准化时间序列。纯函数，不过滤、不校验。
pub fn normalize(raw: &RawTimeSeries) -> TimeSeries {
    raw.iter().map(|(ts, q)| (ts, Quote::from(q))).collect()
}
