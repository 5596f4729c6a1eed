//! # 批处理模块
//!
//! 目录批量转换流水线：扫描 -> 规划 -> 转换 -> 回收 -> 报告。
//!
//! ## 功能
//! - 递归收集匹配文件
//! - 输出路径规划与冲突处理
//! - 并行转换与进度反馈
//! - 删除/重命名延迟到所有转换完成之后
//! - 统计汇总与 CSV 报告
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `shell/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod engine;
pub mod plan;
pub mod reconcile;
pub mod report;
pub mod scanner;

pub use engine::{BatchEngine, EngineOptions, RunOutcome};
pub use plan::CollisionPolicy;
