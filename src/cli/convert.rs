//! # to-jpg / to-webp 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use super::BatchArgs;
use crate::transform::convert::{DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};

use clap::Args;

/// to-jpg 子命令参数
#[derive(Args, Debug, Clone)]
pub struct ToJpgArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// JPEG quality (1-100); also the default offered by the interactive prompt
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,
}

/// to-webp 子命令参数
#[derive(Args, Debug, Clone)]
pub struct ToWebpArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// WebP quality (1-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_WEBP_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,
}
