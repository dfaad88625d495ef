use intraday_core::quote::entity::TimeSeries;

/// # Summary
/// 看板流水线的三态状态机。
///
/// # Invariants
/// - 线性迁移：`Loading → Ready | Error`，后两者为终态。
/// - 不支持回到 `Loading` (无手动刷新)，需重新挂载。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Loading,
    Ready(TimeSeries),
    // 面向用户的错误信息，非空
    Error(String),
}

impl PipelineState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PipelineState::Loading)
    }

    /// 已进入终态
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}
