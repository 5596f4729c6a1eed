//! # 文件大小格式化
//!
//! 以 1024 为进制换算为 B/KB/MB/GB/TB，保留两位小数；负数保留符号。
//!
//! ## 依赖关系
//! - 被 `batch/report.rs` 使用
//! - 无外部模块依赖

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// 格式化字节数
pub fn format_size(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let mut value = bytes.unsigned_abs() as f64;

    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{}{:.2} {}", sign, value, unit);
        }
        value /= 1024.0;
    }

    format!("{}{:.2} {}", sign, value, UNITS[UNITS.len() - 1])
}
