//! # `intraday-cache` - 本地键值存储适配器
//!
//! 为 `intraday_core::cache::port::Cache` 提供内存与文件两种实现。

pub mod file;
pub mod mem;
