//! # `intraday-core` - 领域核心
//!
//! 定义日内行情看板的实体、端口 (Port) 与错误类型。
//! 本 crate 不依赖任何具体的网络或存储实现，适配器位于 `intraday-cache` 与 `intraday-feed`。

pub mod cache {
    pub mod error;
    pub mod port;
}

pub mod common;
pub mod config;

pub mod feed {
    pub mod error;
    pub mod port;
}

pub mod quote {
    pub mod entity;
    pub mod normalize;
}
