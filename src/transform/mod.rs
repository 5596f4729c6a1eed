//! # 转换策略模块
//!
//! 四种转换共用同一个批处理引擎，差异只体现在 `Transform` trait 的实现上：
//! - 输入格式集合
//! - 已是目标格式的文件（计为忽略）
//! - 中间输出文件命名与回收阶段的重命名目标
//! - 对单个文件执行的图像操作
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 使用 `codec/`, `models/`
//! - 子模块: convert, resize, strip

pub mod convert;
pub mod resize;
pub mod strip;

pub use convert::{ToJpg, ToWebp};
pub use resize::Resize;
pub use strip::StripMetadata;

use crate::codec::{ImageCodec, ImageFormatKind};
use crate::error::Result;
use crate::models::{TransformKind, TransformParams};

use std::path::{Path, PathBuf};

/// 单文件转换策略
pub trait Transform: Sync {
    /// 转换类型
    fn kind(&self) -> TransformKind;

    /// 转换参数
    fn params(&self) -> TransformParams;

    /// 参与转换的输入格式
    fn input_formats(&self) -> &'static [ImageFormatKind];

    /// 已经是目标格式的文件：计入检测数和忽略数，但不处理
    fn is_already_target(&self, _format: ImageFormatKind) -> bool {
        false
    }

    /// 转换阶段写出的中间文件路径
    fn output_path(&self, source: &Path) -> PathBuf;

    /// 回收阶段重命名的目标路径；None 表示原文件与输出共存
    fn final_path(&self, source: &Path) -> Option<PathBuf>;

    /// 对单个文件执行转换，把结果写到 `output`
    fn execute(&self, codec: &dyn ImageCodec, source: &Path, output: &Path) -> Result<()>;

    /// 进度条动词，如 "Converting"
    fn verb(&self) -> &'static str;

    /// 完成消息，如 "Conversion complete!"
    fn completion_message(&self) -> &'static str;

    /// 交互模式 `help` 的说明
    fn help(&self) -> &'static str;
}

/// 文件名（不含扩展名）
pub(crate) fn file_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 原文件扩展名（保留大小写）
pub(crate) fn file_extension(source: &Path) -> String {
    source
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 同目录下的 `<stem><suffix>.<ext>`
pub(crate) fn sibling(source: &Path, suffix: &str, ext: &str) -> PathBuf {
    let name = if ext.is_empty() {
        format!("{}{}", file_stem(source), suffix)
    } else {
        format!("{}{}.{}", file_stem(source), suffix, ext)
    };
    source.with_file_name(name)
}
