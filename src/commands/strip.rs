//! # strip-metadata 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/strip.rs` 定义的参数
//! - 使用 `transform/strip.rs`

use super::{run_batch, run_interactive, RunStatus};
use crate::cli::strip::StripArgs;
use crate::error::Result;
use crate::models::TransformKind;
use crate::shell::ShellConfig;
use crate::transform::convert::{DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
use crate::transform::StripMetadata;

/// 执行 strip-metadata 命令
pub fn execute(args: StripArgs) -> Result<RunStatus> {
    match &args.batch.dir {
        Some(dir) => run_batch(&args.batch, dir, &StripMetadata),
        None => run_interactive(
            &args.batch,
            ShellConfig {
                kind: TransformKind::StripMetadata,
                jpeg_quality: DEFAULT_JPEG_QUALITY,
                webp_quality: DEFAULT_WEBP_QUALITY,
                report: args.batch.report.clone(),
            },
        ),
    }
}
