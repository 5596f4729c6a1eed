//! # to-jpg / to-webp 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `transform/convert.rs`

use super::{run_batch, run_interactive, RunStatus};
use crate::cli::convert::{ToJpgArgs, ToWebpArgs};
use crate::error::Result;
use crate::models::TransformKind;
use crate::shell::ShellConfig;
use crate::transform::convert::{DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
use crate::transform::{ToJpg, ToWebp};

/// 执行 to-jpg 命令
pub fn execute_to_jpg(args: ToJpgArgs) -> Result<RunStatus> {
    match &args.batch.dir {
        Some(dir) => run_batch(&args.batch, dir, &ToJpg::new(args.quality)),
        None => run_interactive(
            &args.batch,
            ShellConfig {
                kind: TransformKind::ToJpg,
                jpeg_quality: args.quality,
                webp_quality: DEFAULT_WEBP_QUALITY,
                report: args.batch.report.clone(),
            },
        ),
    }
}

/// 执行 to-webp 命令
pub fn execute_to_webp(args: ToWebpArgs) -> Result<RunStatus> {
    match &args.batch.dir {
        Some(dir) => run_batch(&args.batch, dir, &ToWebp::new(args.quality)),
        None => run_interactive(
            &args.batch,
            ShellConfig {
                kind: TransformKind::ToWebp,
                jpeg_quality: DEFAULT_JPEG_QUALITY,
                webp_quality: args.quality,
                report: args.batch.report.clone(),
            },
        ),
    }
}
