//! # `intraday-feed` - 行情源适配器
//!
//! - [`alphavantage::AlphaVantageProvider`]: 通过 Alpha Vantage 查询接口拉取日内行情。
//! - [`fallback::bundled`]: 配额耗尽时使用的内置静态数据集。

pub mod alphavantage;
pub mod fallback;
