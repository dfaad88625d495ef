use crate::pipeline::QuotePipeline;
use crate::state::PipelineState;
use crate::view;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// # Summary
/// 已挂载的行情看板，持有流水线任务与当前状态。
///
/// # Invariants
/// - 每次挂载恰好运行一次流水线，不可重入，不可刷新。
/// - 卸载 (显式或 Drop) 后任务被取消，取消的任务不再发布任何状态。
pub struct QuoteBoard {
    // 状态订阅端，初始为 Loading
    state_rx: watch::Receiver<PipelineState>,
    // 与看板生命周期绑定的取消令牌
    cancel: CancellationToken,
    title: String,
}

impl QuoteBoard {
    /// # Summary
    /// 挂载看板并启动流水线。
    ///
    /// # Logic
    /// 1. 创建初值为 `Loading` 的 watch 通道。
    /// 2. 在 tokio 运行时上派生任务，使流水线与取消信号竞争。
    /// 3. 流水线先完成则发布终态；取消先到则丢弃在途请求，不更新状态。
    ///
    /// # Arguments
    /// * `pipeline`: 已组装的流水线。
    ///
    /// # Returns
    /// 看板句柄。必须在 tokio 运行时内调用。
    pub fn mount(pipeline: QuotePipeline) -> Self {
        let (state_tx, state_rx) = watch::channel(PipelineState::Loading);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let title = format!("Real-Time Options for {}", pipeline.instrument());

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("board unmounted before pipeline settled");
                }
                state = pipeline.run_to_state() => {
                    if state_tx.send(state).is_err() {
                        debug!("board dropped, discarding pipeline result");
                    }
                }
            }
        });

        Self {
            state_rx,
            cancel,
            title,
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> PipelineState {
        self.state_rx.borrow().clone()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// # Summary
    /// 等待流水线进入终态。
    ///
    /// # Returns
    /// 终态；若任务在发布前被取消，返回仍为 `Loading` 的当前状态。
    pub async fn wait_settled(&mut self) -> PipelineState {
        let settled = self
            .state_rx
            .wait_for(PipelineState::is_settled)
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            // 发送端已随被取消的任务释放
            Err(_) => self.state(),
        }
    }

    /// 按当前状态渲染
    pub fn render(&self) -> String {
        view::render(&self.state_rx.borrow(), &self.title)
    }

    /// 卸载看板，取消在途任务
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for QuoteBoard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
