//! # 运行统计
//!
//! 单次运行内单调累加，运行结束时打印。
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 和 `batch/report.rs` 使用
//! - 使用 `models/job.rs`

use super::job::{Outcome, TransformResult};

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 检测到的文件数（含忽略的文件）
    pub total_detected: usize,
    /// 转换成功数
    pub total_converted: usize,
    /// 忽略数
    pub total_ignored: usize,
    /// 失败数
    pub total_failed: usize,
    /// 节省的空间（字节，可为负）
    pub total_space_saved: i64,
    /// 回收阶段（删除/重命名）失败数
    pub reconcile_failures: usize,
}

impl RunStats {
    /// 合并单个文件结果
    pub fn merge(&mut self, result: &TransformResult) {
        self.total_detected += 1;
        match result.outcome {
            Outcome::Converted => {
                self.total_converted += 1;
                self.total_space_saved += result.space_saved();
            }
            Outcome::Ignored => self.total_ignored += 1,
            Outcome::Failed => self.total_failed += 1,
        }
    }

    /// 是否有任何失败
    pub fn has_failures(&self) -> bool {
        self.total_failed > 0 || self.reconcile_failures > 0
    }
}
