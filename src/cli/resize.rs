//! # resize 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/resize.rs`

use super::BatchArgs;

use clap::Args;

/// resize 子命令参数
#[derive(Args, Debug, Clone)]
pub struct ResizeArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Resize percentage, e.g. 50 for 50% (required when DIR is given)
    #[arg(short, long)]
    pub percent: Option<f64>,
}
