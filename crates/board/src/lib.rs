//! # `intraday-board` - 日内行情看板
//!
//! 单向数据流：缓存闸门 → (未命中) 数据源解析 → 标准化 → 回写缓存 → 展示；
//! 或缓存闸门 → (命中) 展示。

pub mod board;
pub mod pipeline;
pub mod state;
pub mod view;
