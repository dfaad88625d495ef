use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// # Summary
/// 数据源返回的单条原始报价，字段名带有序号前缀。
///
/// # Invariants
/// - 所有数值均为文本，不做任何解析。
/// - 仅存在于数据源响应到标准化之间的短暂阶段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

/// # Summary
/// 标准化后的报价记录。
///
/// # Invariants
/// - 序列化字段顺序固定为 open, high, low, close, volume。
/// - 值原样透传，不做数值校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

/// # Summary
/// 以时间戳为键的有序映射，序列化为 JSON 对象。
///
/// # Invariants
/// - 迭代顺序等于插入顺序 (即源 JSON 对象中的顺序)，从不按时间排序。
/// - 键唯一：重复插入同一时间戳时原位替换值，保留首次出现的位置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series<V> {
    entries: IndexMap<String, V>,
}

/// 标准化后的时间序列
pub type TimeSeries = Series<Quote>;

/// 数据源原始时间序列
pub type RawTimeSeries = Series<RawQuote>;

impl<V> Series<V> {
    /// 创建空序列
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// # Summary
    /// 插入一条记录。
    ///
    /// # Logic
    /// 已存在的时间戳原位替换值，否则追加到末尾。
    ///
    /// # Returns
    /// 被替换的旧值 (如有)。
    pub fn insert(&mut self, timestamp: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(timestamp.into(), value)
    }

    pub fn get(&self, timestamp: &str) -> Option<&V> {
        self.entries.get(timestamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序迭代 `(时间戳, 记录)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(ts, v)| (ts.as_str(), v))
    }

    /// 按插入顺序返回全部时间戳
    pub fn timestamps(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Series<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(ts, v)| (ts.into(), v)).collect(),
        }
    }
}

impl<V> IntoIterator for Series<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
