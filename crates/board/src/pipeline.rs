use crate::state::PipelineState;
use intraday_core::cache::port::{Cache, CacheExt};
use intraday_core::common::Instrument;
use intraday_core::feed::error::FeedError;
use intraday_core::feed::port::{ProviderResponse, QuoteSource};
use intraday_core::quote::entity::{RawTimeSeries, TimeSeries};
use intraday_core::quote::normalize::normalize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// # Summary
/// 流水线错误枚举。
///
/// # Invariants
/// - 缓存读写故障与配额提示都不会出现在这里。
#[derive(Error, Debug)]
pub enum PipelineError {
    // 数据源失败，信息原样透传给界面
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// 时间序列的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    // 缓存命中，未发起网络请求
    Cache,
    // 数据源正常返回
    Provider,
    // 数据源配额耗尽，使用内置快照
    Fallback,
}

/// 一次流水线运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub series: TimeSeries,
    pub origin: Origin,
}

/// # Summary
/// 日内行情获取流水线：缓存闸门、数据源解析、标准化、缓存回写。
///
/// # Invariants
/// - 缓存与数据源均以 Trait 对象注入，可替换为内存实现进行测试。
/// - 同一缓存键单写者，不做加锁。
/// - 不重试，不设超时。
pub struct QuotePipeline {
    // 本地键值存储
    cache: Arc<dyn Cache>,
    // 行情数据源
    source: Arc<dyn QuoteSource>,
    // 配额耗尽时替代的原始时间序列
    fallback: RawTimeSeries,
    // 缓存条目名称
    cache_key: String,
}

impl QuotePipeline {
    /// # Summary
    /// 组装流水线。
    ///
    /// # Arguments
    /// * `cache`: 本地键值存储。
    /// * `source`: 行情数据源 (标的与凭证已在其构造时注入)。
    /// * `fallback`: 与成功响应同构的兜底原始序列。
    /// * `cache_key`: 缓存条目名称。
    pub fn new(
        cache: Arc<dyn Cache>,
        source: Arc<dyn QuoteSource>,
        fallback: RawTimeSeries,
        cache_key: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            source,
            fallback,
            cache_key: cache_key.into(),
        }
    }

    pub fn instrument(&self) -> &Instrument {
        self.source.instrument()
    }

    /// # Summary
    /// 缓存闸门：读取先前标准化的结果。
    ///
    /// # Logic
    /// 1. 按键读取并反序列化为 `TimeSeries`。
    /// 2. 条目损坏或存储故障均视为未命中，只记录日志。
    ///
    /// # Returns
    /// 命中返回序列，否则返回 None。
    async fn check_cache(&self) -> Option<TimeSeries> {
        match self.cache.get::<TimeSeries>(&self.cache_key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(
                    "cache entry '{}' unusable, treating as miss: {}",
                    self.cache_key, e
                );
                None
            }
        }
    }

    /// # Summary
    /// 数据源解析与标准化。
    ///
    /// # Logic
    /// 1. 调用数据源发起一次请求，失败直接返回错误。
    /// 2. `Success` 使用返回数据，`QuotaExceeded` 替换为兜底数据。
    /// 3. 对选定的原始序列执行标准化。
    async fn resolve(&self) -> Result<Outcome, FeedError> {
        let outcome = match self.source.fetch().await? {
            ProviderResponse::Success(raw) => Outcome {
                series: normalize(&raw),
                origin: Origin::Provider,
            },
            ProviderResponse::QuotaExceeded(info) => {
                warn!(
                    "provider quota exhausted for {}, using bundled snapshot: {}",
                    self.instrument(),
                    info
                );
                Outcome {
                    series: normalize(&self.fallback),
                    origin: Origin::Fallback,
                }
            }
        };
        Ok(outcome)
    }

    /// # Summary
    /// 执行一次完整流水线。
    ///
    /// # Logic
    /// 1. 缓存命中则直接返回，不请求网络、不回写。
    /// 2. 未命中则解析数据源并标准化。
    /// 3. 回写缓存；回写失败仅记录日志，不影响结果。
    ///
    /// # Returns
    /// 成功返回序列及其来源，数据源失败返回 `PipelineError`。
    pub async fn run(&self) -> Result<Outcome, PipelineError> {
        if let Some(series) = self.check_cache().await {
            info!(
                "cache hit for {} ({} rows), skipping fetch",
                self.instrument(),
                series.len()
            );
            return Ok(Outcome {
                series,
                origin: Origin::Cache,
            });
        }

        let outcome = self.resolve().await?;
        info!(
            "fetched {} rows for {} via {:?}",
            outcome.series.len(),
            self.instrument(),
            outcome.origin
        );

        match self.cache.set(&self.cache_key, &outcome.series).await {
            Ok(()) => debug!("cache entry '{}' updated", self.cache_key),
            Err(e) => warn!("failed to write cache entry '{}': {}", self.cache_key, e),
        }

        Ok(outcome)
    }

    /// 执行流水线并折叠为终态
    pub async fn run_to_state(&self) -> PipelineState {
        match self.run().await {
            Ok(outcome) => PipelineState::Ready(outcome.series),
            Err(e) => PipelineState::Error(e.to_string()),
        }
    }
}
