//! # 去除元数据
//!
//! 解码后以原格式重新编码（有损格式质量 100）到 `<stem>_nometa<ext>`，
//! 回收阶段删除原文件并把输出重命名回原文件名。
//!
//! ## 依赖关系
//! - 实现 `transform::Transform`
//! - 使用 `codec::ImageCodec`

use super::{file_extension, sibling, Transform};
use crate::codec::{ImageCodec, ImageFormatKind};
use crate::error::{PixbatchError, Result};
use crate::models::{TransformKind, TransformParams};

use std::path::{Path, PathBuf};

const STRIP_QUALITY: u8 = 100;

/// 去除元数据
#[derive(Debug, Default, Clone, Copy)]
pub struct StripMetadata;

impl Transform for StripMetadata {
    fn kind(&self) -> TransformKind {
        TransformKind::StripMetadata
    }

    fn params(&self) -> TransformParams {
        TransformParams {
            quality: Some(STRIP_QUALITY),
            scale_percent: None,
        }
    }

    fn input_formats(&self) -> &'static [ImageFormatKind] {
        &[
            ImageFormatKind::Jpeg,
            ImageFormatKind::Png,
            ImageFormatKind::WebP,
        ]
    }

    fn output_path(&self, source: &Path) -> PathBuf {
        sibling(source, "_nometa", &file_extension(source))
    }

    fn final_path(&self, source: &Path) -> Option<PathBuf> {
        Some(source.to_path_buf())
    }

    fn execute(&self, codec: &dyn ImageCodec, source: &Path, output: &Path) -> Result<()> {
        let format = ImageFormatKind::from_path(source).ok_or_else(|| {
            PixbatchError::InvalidArgument(format!("unsupported image: {}", source.display()))
        })?;

        let image = codec.strip_metadata(codec.decode(source)?);
        codec.encode(&image, format, STRIP_QUALITY, output)
    }

    fn verb(&self) -> &'static str {
        "Processing"
    }

    fn completion_message(&self) -> &'static str {
        "Metadata removal complete!"
    }

    fn help(&self) -> &'static str {
        "Removes all metadata from supported image formats (.jpeg, .jpg, .png, .webp).\n\
         It processes all subdirectories in the provided directory, removes metadata, and renames files."
    }
}
