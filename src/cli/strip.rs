//! # strip-metadata 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/strip.rs`

use super::BatchArgs;

use clap::Args;

/// strip-metadata 子命令参数
#[derive(Args, Debug, Clone)]
pub struct StripArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
}
