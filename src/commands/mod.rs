//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑：给出目录时运行一次，否则进入交互模式。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `shell/`, `transform/`
//! - 子模块: convert, resize, strip

pub mod convert;
pub mod resize;
pub mod strip;

use crate::batch::{report, BatchEngine};
use crate::cli::{BatchArgs, Commands};
use crate::codec::ImageRsCodec;
use crate::error::Result;
use crate::shell::{Shell, ShellConfig, TermPrompt};
use crate::transform::Transform;
use crate::utils::output;

use std::path::Path;

/// 执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// 全部成功
    Clean,
    /// 运行完成，但有文件处理失败或回收失败
    WithFailures,
}

/// 执行命令
pub fn run(cmd: Commands) -> Result<RunStatus> {
    match cmd {
        Commands::ToJpg(args) => convert::execute_to_jpg(args),
        Commands::ToWebp(args) => convert::execute_to_webp(args),
        Commands::Resize(args) => resize::execute(args),
        Commands::StripMetadata(args) => strip::execute(args),
    }
}

/// 对单个目录运行一次批处理并打印报告
pub(crate) fn run_batch(
    args: &BatchArgs,
    dir: &Path,
    transform: &dyn Transform,
) -> Result<RunStatus> {
    output::print_header(&format!(
        "pixbatch {} '{}'",
        transform.kind(),
        dir.display()
    ));

    let codec = ImageRsCodec::new();
    let engine = BatchEngine::new(&codec, args.engine_options());
    let outcome = engine.run(dir, transform)?;

    report::print_summary(transform, &outcome);

    if let Some(path) = &args.report {
        report::write_csv(&outcome.results, path)?;
        output::print_success(&format!("Report written to '{}'", path.display()));
    }

    Ok(status(outcome.stats.has_failures()))
}

/// 进入交互模式
pub(crate) fn run_interactive(args: &BatchArgs, config: ShellConfig) -> Result<RunStatus> {
    output::print_header(&format!("pixbatch {} (interactive)", config.kind));

    let codec = ImageRsCodec::new();
    let engine = BatchEngine::new(&codec, args.engine_options());
    let mut shell = Shell::new(TermPrompt::new(), engine, config);
    let runs = shell.run()?;

    Ok(status(runs.iter().any(|r| r.stats.has_failures())))
}

fn status(has_failures: bool) -> RunStatus {
    if has_failures {
        RunStatus::WithFailures
    } else {
        RunStatus::Clean
    }
}
