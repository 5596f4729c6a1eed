//! # 回收阶段（删除原文件 / 重命名输出）
//!
//! 转换阶段只把磁盘操作排入队列；`ReconcilePlan` 只能由
//! `TransformPass::finish` 构造，因此删除和重命名不可能与转换交错执行。
//!
//! ## 功能
//! - 先执行所有删除，再执行所有重命名
//! - 尽力而为：单项失败只记录并继续，不回滚已完成的操作
//! - 原文件未能删除时跳过对应的重命名，避免覆盖原文件
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 调用
//! - 使用 `utils/output.rs` 打印失败信息

use crate::error::{FsOp, PixbatchError};
use crate::utils::output;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// 一个排队中的磁盘操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiskOp {
    /// 要删除的原文件
    pub delete: PathBuf,
    /// 删除后执行的重命名 (from, to)
    pub rename: Option<(PathBuf, PathBuf)>,
}

/// 回收阶段单项失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// 回收阶段结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub deleted: usize,
    /// 成功的重命名 (from, to)
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub failures: Vec<ReconcileFailure>,
}

/// 所有转换完成后才能得到的回收计划
#[derive(Debug)]
pub struct ReconcilePlan {
    ops: Vec<PendingDiskOp>,
}

impl ReconcilePlan {
    pub(super) fn new(ops: Vec<PendingDiskOp>) -> Self {
        Self { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// 执行回收
    pub fn execute(self) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        if self.is_empty() {
            return report;
        }

        output::print_info("Deleting original files...");
        let mut undeleted = HashSet::new();
        for op in &self.ops {
            match fs::remove_file(&op.delete) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    let err = PixbatchError::fs(FsOp::Delete, &op.delete, e);
                    output::print_error(&err.to_string());
                    report.failures.push(ReconcileFailure {
                        path: op.delete.clone(),
                        error: err.to_string(),
                    });
                    undeleted.insert(op.delete.clone());
                }
            }
        }

        let renames: Vec<_> = self
            .ops
            .iter()
            .filter_map(|op| op.rename.as_ref().map(|r| (&op.delete, r)))
            .collect();
        if renames.is_empty() {
            return report;
        }

        output::print_info("Renaming replacement files...");
        for (original, (from, to)) in renames {
            if undeleted.contains(original) {
                let msg = format!(
                    "Not renaming {} to {}: original could not be deleted",
                    from.display(),
                    to.display()
                );
                output::print_warning(&msg);
                report.failures.push(ReconcileFailure {
                    path: from.clone(),
                    error: msg,
                });
                continue;
            }

            match fs::rename(from, to) {
                Ok(()) => report.renamed.push((from.clone(), to.clone())),
                Err(e) => {
                    let msg = format!(
                        "Error renaming {} to {}: {}",
                        from.display(),
                        to.display(),
                        e
                    );
                    output::print_error(&msg);
                    report.failures.push(ReconcileFailure {
                        path: from.clone(),
                        error: msg,
                    });
                }
            }
        }

        report
    }
}
