//! # 数据模型模块
//!
//! 定义批处理任务、单文件结果和运行统计的数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/`, `transform/` 和 `commands/` 使用
//! - 子模块: job, stats

pub mod job;
pub mod stats;

pub use job::{Outcome, TransformJob, TransformKind, TransformParams, TransformResult};
pub use stats::RunStats;
