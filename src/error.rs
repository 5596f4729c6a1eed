//! # 统一错误处理模块
//!
//! 定义 pixbatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! 单个文件的失败不会中断批处理：`batch/` 把它们转换为
//! `TransformResult` 数据，只有致命错误才会一路 `?` 传播到 `main.rs`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 文件系统操作类型（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Read,
    Write,
    Delete,
    Metadata,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsOp::Read => write!(f, "read"),
            FsOp::Write => write!(f, "write"),
            FsOp::Delete => write!(f, "delete"),
            FsOp::Metadata => write!(f, "stat"),
        }
    }
}

/// pixbatch 统一错误类型
#[derive(Error, Debug)]
pub enum PixbatchError {
    // ─────────────────────────────────────────────────────────────
    // 图像编解码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to decode image: {path}: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {format} image: {path}: {reason}")]
    EncodeError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Scaling {width}x{height} by {percent}% gives an empty image")]
    EmptyResize {
        width: u32,
        height: u32,
        percent: f64,
    },

    // ─────────────────────────────────────────────────────────────
    // 文件系统错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to {op} {path}: {source}")]
    FileSystemError {
        op: FsOp,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 报告 / 运行时错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Terminal I/O error: {0}")]
    Terminal(#[source] std::io::Error),
}

impl PixbatchError {
    /// 构造文件系统错误
    pub fn fs(op: FsOp, path: &std::path::Path, source: std::io::Error) -> Self {
        PixbatchError::FileSystemError {
            op,
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PixbatchError>;
