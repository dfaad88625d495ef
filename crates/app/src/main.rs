mod logging;
mod settings;

use std::process::ExitCode;
use std::sync::Arc;

use intraday_board::board::QuoteBoard;
use intraday_board::pipeline::QuotePipeline;
use intraday_board::state::PipelineState;
use intraday_cache::file::FileCache;
use intraday_cache::mem::MemCache;
use intraday_core::cache::port::Cache;
use intraday_core::config::CacheBackend;
use intraday_feed::alphavantage::AlphaVantageProvider;
use intraday_feed::fallback;
use tracing::{error, info};

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 实例化基础设施层 (Cache、Feed、兜底数据集)。
/// 3. 组装流水线并挂载看板。
/// 4. 等待看板进入终态或收到 Ctrl-C (卸载并取消在途请求)。
/// 5. 将看板渲染到 stdout，错误态以非零码退出。
#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load(settings::DEFAULT_CONFIG_PATH)?;
    let _log_guard = logging::init(&config.log)?;
    info!("Intraday board starting for {}...", config.provider.symbol);

    // 2. 基础设施层
    let cache: Arc<dyn Cache> = match config.cache.backend {
        CacheBackend::File => Arc::new(FileCache::new(&config.cache.data_dir)),
        CacheBackend::Memory => Arc::new(MemCache::new()),
    };
    let source = Arc::new(AlphaVantageProvider::new(config.provider.clone())?);
    let snapshot = fallback::bundled()?;

    // 3. 流水线与看板
    let pipeline = QuotePipeline::new(cache, source, snapshot, config.cache.key.clone());
    let mut board = QuoteBoard::mount(pipeline);

    // 4. 等待终态
    let settled = tokio::select! {
        state = board.wait_settled() => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };

    let Some(state) = settled else {
        info!("Shutdown signal received. Unmounting board...");
        board.unmount();
        return Ok(ExitCode::from(130));
    };

    // 5. 展示
    println!("{}", board.render());
    match state {
        PipelineState::Error(msg) => {
            error!("Board settled in error state: {}", msg);
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
