use async_trait::async_trait;
use intraday_board::board::QuoteBoard;
use intraday_board::pipeline::{Origin, PipelineError, QuotePipeline};
use intraday_board::state::PipelineState;
use intraday_board::view;
use intraday_cache::mem::MemCache;
use intraday_core::cache::error::CacheError;
use intraday_core::cache::port::{Cache, CacheExt};
use intraday_core::common::Instrument;
use intraday_core::feed::error::FeedError;
use intraday_core::feed::port::{ProviderResponse, QuoteSource};
use intraday_core::quote::entity::{RawQuote, RawTimeSeries, TimeSeries};
use intraday_core::quote::normalize::normalize;
use intraday_feed::fallback;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const KEY: &str = "realTimeOptionsData";

/// # Summary
/// 为测试提供的模拟行情源，记录调用次数。
struct MockSource {
    instrument: Instrument,
    response: fn() -> Result<ProviderResponse, FeedError>,
    calls: AtomicUsize,
    // 模拟挂起的请求
    delay: Option<Duration>,
}

impl MockSource {
    fn new(response: fn() -> Result<ProviderResponse, FeedError>) -> Arc<Self> {
        Arc::new(Self {
            instrument: Instrument::new("IBM"),
            response,
            calls: AtomicUsize::new(0),
            delay: None,
        })
    }

    fn hanging() -> Arc<Self> {
        Arc::new(Self {
            instrument: Instrument::new("IBM"),
            response: sample_success,
            calls: AtomicUsize::new(0),
            delay: Some(Duration::from_secs(3600)),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MockSource {
    fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    async fn fetch(&self) -> Result<ProviderResponse, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.response)()
    }
}

/// # Summary
/// 写入总是失败的缓存。
struct ReadOnlyCache;

#[async_trait]
impl Cache for ReadOnlyCache {
    async fn set_raw(&self, _: &str, _: Vec<u8>) -> Result<(), CacheError> {
        Err(CacheError::Storage("disk full".into()))
    }

    async fn get_raw(&self, _: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn del(&self, _: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

/// # Summary
/// 读取总是失败的缓存 (存储不可用，而非条目损坏)。
struct UnreadableCache;

#[async_trait]
impl Cache for UnreadableCache {
    async fn set_raw(&self, _: &str, _: Vec<u8>) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get_raw(&self, _: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Storage("disk unavailable".into()))
    }

    async fn del(&self, _: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

fn sample_raw() -> RawTimeSeries {
    let mut series = RawTimeSeries::new();
    series.insert(
        "2024-06-01 15:55:00",
        RawQuote {
            open: "190.1".into(),
            high: "191.0".into(),
            low: "189.8".into(),
            close: "190.5".into(),
            volume: "12000".into(),
        },
    );
    series.insert(
        "2024-06-01 15:50:00",
        RawQuote {
            open: "189.9".into(),
            high: "190.2".into(),
            low: "189.7".into(),
            close: "190.1".into(),
            volume: "8000".into(),
        },
    );
    series
}

fn sample_success() -> Result<ProviderResponse, FeedError> {
    Ok(ProviderResponse::Success(sample_raw()))
}

fn quota_signal() -> Result<ProviderResponse, FeedError> {
    Ok(ProviderResponse::QuotaExceeded("limit reached".into()))
}

fn http_error() -> Result<ProviderResponse, FeedError> {
    Err(FeedError::Status(500))
}

fn pipeline(cache: Arc<dyn Cache>, source: Arc<MockSource>) -> QuotePipeline {
    QuotePipeline::new(cache, source, fallback::bundled().unwrap(), KEY)
}

/// # Summary
/// 端到端：原始记录经标准化后渲染为固定列顺序的一行，并回写缓存。
#[tokio::test]
async fn test_fetch_normalizes_and_writes_back() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(sample_success);

    let outcome = pipeline(cache.clone(), source.clone()).run().await?;
    assert_eq!(outcome.origin, Origin::Provider);
    assert_eq!(source.calls(), 1);

    let rows = view::rows(&outcome.series);
    assert_eq!(
        rows[0],
        [
            "2024-06-01 15:55:00",
            "190.1",
            "191.0",
            "189.8",
            "190.5",
            "12000"
        ]
        .map(String::from)
    );
    assert_eq!(rows[1][0], "2024-06-01 15:50:00");

    let stored: TimeSeries = cache.get(KEY).await?.unwrap();
    assert_eq!(stored, outcome.series);
    Ok(())
}

/// # Summary
/// 幂等：缓存未变时二次运行输出一致，且不再发起网络请求。
#[tokio::test]
async fn test_second_run_hits_cache() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(sample_success);
    let pipeline = pipeline(cache.clone(), source.clone());

    let first = pipeline.run_to_state().await;
    let second_outcome = pipeline.run().await?;
    let second = PipelineState::Ready(second_outcome.series);

    assert_eq!(second_outcome.origin, Origin::Cache);
    assert_eq!(source.calls(), 1);
    assert_eq!(view::render(&first, "t"), view::render(&second, "t"));
    Ok(())
}

/// # Summary
/// 配额提示：输出与直接标准化内置快照一致，不视为错误，并回写缓存。
#[tokio::test]
async fn test_quota_signal_uses_bundled_snapshot() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(quota_signal);

    let outcome = pipeline(cache.clone(), source).run().await?;
    assert_eq!(outcome.origin, Origin::Fallback);
    assert_eq!(outcome.series, normalize(&fallback::bundled()?));
    assert!(cache.get_raw(KEY).await?.is_some());
    Ok(())
}

/// # Summary
/// 传输错误：进入错误态，信息非空，不写缓存。
#[tokio::test]
async fn test_http_error_surfaces_without_cache_write() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(http_error);
    let pipeline = pipeline(cache.clone(), source);

    assert!(matches!(
        pipeline.run().await,
        Err(PipelineError::Feed(FeedError::Status(500)))
    ));

    let state = pipeline.run_to_state().await;
    match &state {
        PipelineState::Error(msg) => assert!(!msg.is_empty()),
        other => panic!("expected error state, got {:?}", other),
    }
    assert!(cache.is_empty());
    Ok(())
}

/// # Summary
/// 缓存命中：跳过网络阶段，原样渲染缓存中的记录。
#[tokio::test]
async fn test_cache_entry_skips_network() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    cache
        .set_raw(
            KEY,
            br#"{"2024-01-01 09:30:00": {"open":"1","high":"2","low":"0.5","close":"1.5","volume":"100"}}"#
                .to_vec(),
        )
        .await?;
    let source = MockSource::new(http_error);

    let state = pipeline(cache, source.clone()).run_to_state().await;
    assert_eq!(source.calls(), 0);

    let PipelineState::Ready(series) = &state else {
        panic!("expected ready state");
    };
    assert_eq!(
        view::rows(series),
        vec![["2024-01-01 09:30:00", "1", "2", "0.5", "1.5", "100"].map(String::from)]
    );
    Ok(())
}

/// # Summary
/// 缓存条目损坏：视为未命中，重新拉取并覆盖。
#[tokio::test]
async fn test_malformed_cache_falls_through() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    cache.set_raw(KEY, b"{\"truncated".to_vec()).await?;
    let source = MockSource::new(sample_success);

    let outcome = pipeline(cache.clone(), source.clone()).run().await?;
    assert_eq!(outcome.origin, Origin::Provider);
    assert_eq!(source.calls(), 1);

    let repaired: TimeSeries = cache.get(KEY).await?.unwrap();
    assert_eq!(repaired.len(), 2);
    Ok(())
}

/// # Summary
/// 缓存读取故障：视为未命中，照常拉取。
#[tokio::test]
async fn test_cache_read_failure_falls_through() -> anyhow::Result<()> {
    let source = MockSource::new(sample_success);

    let outcome = pipeline(Arc::new(UnreadableCache), source.clone())
        .run()
        .await?;
    assert_eq!(outcome.origin, Origin::Provider);
    assert_eq!(source.calls(), 1);

    let state = pipeline(Arc::new(UnreadableCache), source.clone())
        .run_to_state()
        .await;
    assert!(matches!(state, PipelineState::Ready(ref s) if s.len() == 2));
    assert_eq!(source.calls(), 2);
    Ok(())
}

/// # Summary
/// 回写失败不影响结果。
#[tokio::test]
async fn test_cache_write_failure_is_not_fatal() -> anyhow::Result<()> {
    let source = MockSource::new(sample_success);
    let state = pipeline(Arc::new(ReadOnlyCache), source)
        .run_to_state()
        .await;
    assert!(matches!(state, PipelineState::Ready(ref s) if s.len() == 2));
    Ok(())
}

/// # Summary
/// 看板挂载：初始为 Loading，完成后进入 Ready 并可渲染。
#[tokio::test]
async fn test_board_settles_ready() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(sample_success);
    let mut board = QuoteBoard::mount(pipeline(cache, source));

    let state = board.wait_settled().await;
    assert!(matches!(state, PipelineState::Ready(_)));
    assert_eq!(board.title(), "Real-Time Options for IBM");

    let text = board.render();
    assert!(text.starts_with("Real-Time Options for IBM\n"));
    assert!(text.contains("2024-06-01 15:55:00 | 190.1"));
    Ok(())
}

#[tokio::test]
async fn test_board_settles_error() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::new(http_error);
    let mut board = QuoteBoard::mount(pipeline(cache, source));

    board.wait_settled().await;
    assert_eq!(board.render(), "Error: Something went wrong (HTTP 500)");
    Ok(())
}

/// # Summary
/// 卸载：挂起的请求被取消，之后不再写缓存。
#[tokio::test]
async fn test_unmount_cancels_in_flight_fetch() -> anyhow::Result<()> {
    let cache = Arc::new(MemCache::new());
    let source = MockSource::hanging();
    let board = QuoteBoard::mount(pipeline(cache.clone(), source.clone()));

    // 等待任务进入挂起的请求
    while source.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(board.state().is_loading());
    assert_eq!(board.render(), "Loading...");

    board.unmount();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(cache.is_empty());
    // 被取消的任务已释放对数据源的引用
    assert_eq!(Arc::strong_count(&source), 1);
    Ok(())
}
