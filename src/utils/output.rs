//! # 美化输出工具
//!
//! 提供统一的终端输出样式。每个函数都是无状态的：
//! 是否着色由 `colored` 在调用时根据终端与 `NO_COLOR` / `CLICOLOR` 决定。
//!
//! ## 依赖关系
//! - 被所有 `batch/`, `commands/`, `shell/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印多行帮助文本
pub fn print_help(text: &str) {
    for line in text.lines() {
        println!("{}", line.magenta());
    }
}

/// 交互提示文本
pub fn prompt_text(msg: &str) -> String {
    format!("{} ", msg.cyan())
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
