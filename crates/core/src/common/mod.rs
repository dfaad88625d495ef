use serde::{Deserialize, Serialize};
use std::fmt;

/// # Summary
/// 交易标的身份，代表看板所关注的单一证券。
///
/// # Invariants
/// - `symbol` 必须是数据源可识别的交易代码。
/// - 在一次看板生命周期内保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    // 交易代码 (例如: IBM)
    pub symbol: String,
}

impl Instrument {
    /// 使用交易代码创建标的身份
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
