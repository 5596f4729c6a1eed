//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `to-jpg`: WebP -> JPEG
//! - `to-webp`: JPEG/PNG -> WebP
//! - `resize`: 按百分比缩放
//! - `strip-metadata`: 去除元数据
//!
//! 每个子命令给出 `DIR` 时只运行一次；省略时进入交互模式。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, resize, strip

pub mod convert;
pub mod resize;
pub mod strip;

use crate::batch::{CollisionPolicy, EngineOptions};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pixbatch - 目录批量图像处理工具
#[derive(Parser, Debug)]
#[command(name = "pixbatch")]
#[command(version)]
#[command(
    about = "Batch convert, resize and strip metadata from images in a directory tree",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert .webp images to .jpg, replacing the originals
    ToJpg(convert::ToJpgArgs),

    /// Convert .jpg/.jpeg/.png images to .webp, replacing the originals
    ToWebp(convert::ToWebpArgs),

    /// Resize images by a percentage, keeping the originals
    Resize(resize::ResizeArgs),

    /// Re-encode images without metadata, replacing the originals
    StripMetadata(strip::StripArgs),
}

/// 所有子命令共用的批处理参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Root directory to process (omit to start the interactive prompt)
    pub dir: Option<PathBuf>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "PIXBATCH_JOBS")]
    pub jobs: usize,

    /// What to do when an output file already exists
    #[arg(
        long,
        value_enum,
        default_value_t = CollisionPolicy::Skip,
        env = "PIXBATCH_ON_COLLISION"
    )]
    pub on_collision: CollisionPolicy,

    /// Write a per-file CSV report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl BatchArgs {
    /// 转换为引擎配置
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            jobs: self.jobs,
            collision: self.on_collision,
            show_progress: !self.no_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_to_webp_defaults() {
        let cli = Cli::try_parse_from(["pixbatch", "to-webp", "/photos"]).unwrap();
        match cli.command {
            Commands::ToWebp(args) => {
                assert_eq!(args.batch.dir, Some(PathBuf::from("/photos")));
                assert_eq!(args.quality, 80);
                let opts = args.batch.engine_options();
                assert_eq!(opts.collision, CollisionPolicy::Skip);
                assert!(opts.show_progress);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_interactive_without_dir() {
        let cli = Cli::try_parse_from(["pixbatch", "strip-metadata"]).unwrap();
        match cli.command {
            Commands::StripMetadata(args) => assert!(args.batch.dir.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_common_options() {
        let cli = Cli::try_parse_from([
            "pixbatch",
            "resize",
            "imgs",
            "--percent",
            "50",
            "-j",
            "4",
            "--on-collision",
            "uniquify",
            "--report",
            "out.csv",
            "--no-progress",
        ])
        .unwrap();
        match cli.command {
            Commands::Resize(args) => {
                assert_eq!(args.percent, Some(50.0));
                assert_eq!(args.batch.jobs, 4);
                assert_eq!(args.batch.on_collision, CollisionPolicy::Uniquify);
                assert_eq!(args.batch.report, Some(PathBuf::from("out.csv")));
                assert!(!args.batch.engine_options().show_progress);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_jpg_quality_range_is_enforced() {
        assert!(Cli::try_parse_from(["pixbatch", "to-jpg", "d", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["pixbatch", "to-jpg", "d", "-q", "101"]).is_err());
        let cli = Cli::try_parse_from(["pixbatch", "to-jpg", "d", "-q", "90"]).unwrap();
        match cli.command {
            Commands::ToJpg(args) => assert_eq!(args.quality, 90),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
