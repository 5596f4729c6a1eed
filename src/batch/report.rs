//! # 运行报告
//!
//! ## 功能
//! - 终端汇总表格（`tabled`）
//! - 失败文件列表（最多 10 条）
//! - 可选的逐文件 CSV 报告
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `shell/` 调用
//! - 使用 `utils/output.rs`, `utils/size.rs`

use super::engine::RunOutcome;
use crate::error::{FsOp, PixbatchError, Result};
use crate::models::{Outcome, TransformKind, TransformResult};
use crate::transform::Transform;
use crate::utils::{output, size};

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

const MAX_LISTED_FAILURES: usize = 10;

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// CSV 报告行
#[derive(Debug, Serialize)]
struct ReportRow {
    source: String,
    output: String,
    original_size: u64,
    new_size: Option<u64>,
    outcome: Outcome,
    error: String,
}

impl From<&TransformResult> for ReportRow {
    fn from(r: &TransformResult) -> Self {
        ReportRow {
            source: r.source.display().to_string(),
            output: r
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            original_size: r.original_size,
            new_size: r.new_size,
            outcome: r.outcome,
            error: r.reason.clone().unwrap_or_default(),
        }
    }
}

/// 打印运行汇总
pub fn print_summary(transform: &dyn Transform, outcome: &RunOutcome) {
    if outcome.stats.total_detected == 0 {
        output::print_warning("No matching images found.");
        return;
    }

    output::print_separator();
    output::print_done(transform.completion_message());
    println!("{}", Table::new(summary_rows(transform.kind(), outcome)));

    let (listed, hidden) = failure_list(outcome);
    if !listed.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in &listed {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if let Some(note) = overflow_note(hidden) {
            output::print_warning(&note);
        }
    }
}

/// 汇总表格的行
fn summary_rows(kind: TransformKind, outcome: &RunOutcome) -> Vec<SummaryRow> {
    let stats = &outcome.stats;
    let row = |metric, value: String| SummaryRow { metric, value };

    let mut rows = vec![
        row("Total detected", stats.total_detected.to_string()),
        row("Total converted", stats.total_converted.to_string()),
        row("Total ignored", stats.total_ignored.to_string()),
        row("Total failed", stats.total_failed.to_string()),
        row("Reconcile failures", stats.reconcile_failures.to_string()),
    ];
    // 缩放会保留原文件，节省空间没有意义
    if kind != TransformKind::Resize {
        rows.push(row(
            "Total space saved",
            size::format_size(stats.total_space_saved),
        ));
    }
    let reconcile = &outcome.reconcile;
    if reconcile.deleted > 0 || !reconcile.renamed.is_empty() {
        rows.push(row("Originals deleted", reconcile.deleted.to_string()));
        rows.push(row("Replacements renamed", reconcile.renamed.len().to_string()));
    }
    rows
}

/// 需要列出的失败项（转换失败在前，回收失败在后），以及未列出的数量
fn failure_list(outcome: &RunOutcome) -> (Vec<(String, String)>, usize) {
    let mut failures: Vec<(String, String)> = outcome
        .results
        .iter()
        .filter(|r| r.outcome == Outcome::Failed)
        .map(|r| {
            (
                r.source.display().to_string(),
                r.reason.clone().unwrap_or_default(),
            )
        })
        .chain(
            outcome
                .reconcile
                .failures
                .iter()
                .map(|f| (f.path.display().to_string(), f.error.clone())),
        )
        .collect();

    let hidden = failures.len().saturating_sub(MAX_LISTED_FAILURES);
    failures.truncate(MAX_LISTED_FAILURES);
    (failures, hidden)
}

fn overflow_note(hidden: usize) -> Option<String> {
    (hidden > 0).then(|| format!("  ... and {} more", hidden))
}

/// 写出逐文件 CSV 报告
pub fn write_csv(results: &[TransformResult], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for result in results {
        wtr.serialize(ReportRow::from(result))?;
    }

    wtr.flush()
        .map_err(|e| PixbatchError::fs(FsOp::Write, output_path, e))?;

    Ok(())
}
