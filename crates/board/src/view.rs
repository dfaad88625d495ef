//! 看板的文本展示，只消费已标准化的数据，无状态。

use crate::state::PipelineState;
use intraday_core::quote::entity::TimeSeries;

/// 表头，顺序即列顺序
pub const HEADERS: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "Volume"];

/// # Summary
/// 将时间序列展开为表格行。
///
/// # Returns
/// 每个时间戳一行，按迭代顺序；列顺序为 timestamp, open, high, low, close, volume。
pub fn rows(series: &TimeSeries) -> Vec<[String; 6]> {
    series
        .iter()
        .map(|(ts, q)| {
            [
                ts.to_string(),
                q.open.clone(),
                q.high.clone(),
                q.low.clone(),
                q.close.clone(),
                q.volume.clone(),
            ]
        })
        .collect()
}

/// # Summary
/// 按状态渲染看板。
///
/// # Logic
/// - `Loading` → 加载提示，不访问数据。
/// - `Error` → 错误信息，不访问数据。
/// - `Ready` 且为空 → 无数据提示。
/// - `Ready` 且有数据 → 标题、表头与逐行数据，列宽取各列最宽单元格。
pub fn render(state: &PipelineState, title: &str) -> String {
    match state {
        PipelineState::Loading => "Loading...".to_string(),
        PipelineState::Error(msg) => format!("Error: {msg}"),
        PipelineState::Ready(series) if series.is_empty() => "No data available".to_string(),
        PipelineState::Ready(series) => render_table(title, &rows(series)),
    }
}

fn render_table(title: &str, rows: &[[String; 6]]) -> String {
    // 填充按字符计数，列宽同样按字符计
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format_line(&HEADERS, &widths));
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line<S: AsRef<str>>(cells: &[S; 6], widths: &[usize; 6]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell.as_ref(), w = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}
