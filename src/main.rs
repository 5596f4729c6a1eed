//! # pixbatch - 目录批量图像处理工具
//!
//! 递归遍历目录树，对其中的图像批量执行一种操作，汇总统计并按需替换原文件。
//!
//! ## 子命令
//! - `to-jpg` - WebP 转 JPEG
//! - `to-webp` - JPEG/PNG 转 WebP
//! - `resize` - 按百分比缩放
//! - `strip-metadata` - 去除元数据
//!
//! ## 退出码
//! - 0: 成功
//! - 1: 致命错误（目录不存在、参数无效、报告写入失败）
//! - 2: 运行完成，但有文件处理失败或回收失败
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── shell/     (交互模式)
//!   │     └── batch/     (扫描、规划、转换、回收、报告)
//!   │           ├── transform/ (四种转换策略)
//!   │           ├── codec/     (图像编解码)
//!   │           └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod codec;
mod commands;
mod error;
mod models;
mod shell;
mod transform;
mod utils;

use clap::Parser;
use cli::Cli;
use commands::RunStatus;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    match commands::run(cli.command) {
        Ok(RunStatus::Clean) => {}
        Ok(RunStatus::WithFailures) => std::process::exit(2),
        Err(e) => {
            utils::output::print_error(&format!("{}", e));
            std::process::exit(1);
        }
    }
}
