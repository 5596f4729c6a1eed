//! # resize 命令实现
//!
//! 非交互模式必须给出 `--percent`；交互模式每次运行都会询问。
//!
//! ## 依赖关系
//! - 使用 `cli/resize.rs` 定义的参数
//! - 使用 `transform/resize.rs`

use super::{run_batch, run_interactive, RunStatus};
use crate::cli::resize::ResizeArgs;
use crate::error::{PixbatchError, Result};
use crate::models::TransformKind;
use crate::shell::ShellConfig;
use crate::transform::convert::{DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
use crate::transform::Resize;

/// 执行 resize 命令
pub fn execute(args: ResizeArgs) -> Result<RunStatus> {
    match &args.batch.dir {
        Some(dir) => {
            let percent = args.percent.ok_or_else(|| {
                PixbatchError::InvalidArgument(
                    "--percent is required when a directory is given".to_string(),
                )
            })?;
            run_batch(&args.batch, dir, &Resize::new(percent)?)
        }
        None => run_interactive(
            &args.batch,
            ShellConfig {
                kind: TransformKind::Resize,
                jpeg_quality: DEFAULT_JPEG_QUALITY,
                webp_quality: DEFAULT_WEBP_QUALITY,
                report: args.batch.report.clone(),
            },
        ),
    }
}
