//! # 按百分比缩放
//!
//! 输出 `<stem>_resized<ext>`，原文件保留，不做删除或重命名。
//! 新尺寸为 `floor(原尺寸 * percent / 100)`，使用三次插值。
//!
//! ## 依赖关系
//! - 实现 `transform::Transform`
//! - 使用 `codec::ImageCodec`

use super::{file_extension, sibling, Transform};
use crate::codec::{ImageCodec, ImageFormatKind};
use crate::error::{PixbatchError, Result};
use crate::models::{TransformKind, TransformParams};

use std::path::{Path, PathBuf};

/// 缩放后有损格式的编码质量
pub const RESIZE_QUALITY: u8 = 95;

/// 按百分比缩放
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    percent: f64,
}

impl Resize {
    /// 百分比必须为有限正数
    pub fn new(percent: f64) -> Result<Self> {
        if !percent.is_finite() || percent <= 0.0 {
            return Err(PixbatchError::InvalidArgument(format!(
                "resize percentage must be a positive number, got {}",
                percent
            )));
        }
        Ok(Self { percent })
    }
}

impl Default for Resize {
    fn default() -> Self {
        Self { percent: 100.0 }
    }
}

/// 计算缩放后的尺寸
pub fn scaled_dimensions(width: u32, height: u32, percent: f64) -> Result<(u32, u32)> {
    let scale = |v: u32| (v as f64 * percent / 100.0).floor();
    let (w, h) = (scale(width), scale(height));

    if w < 1.0 || h < 1.0 || w > u32::MAX as f64 || h > u32::MAX as f64 {
        return Err(PixbatchError::EmptyResize {
            width,
            height,
            percent,
        });
    }

    Ok((w as u32, h as u32))
}

impl Transform for Resize {
    fn kind(&self) -> TransformKind {
        TransformKind::Resize
    }

    fn params(&self) -> TransformParams {
        TransformParams {
            quality: Some(RESIZE_QUALITY),
            scale_percent: Some(self.percent),
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
        sibling(source, "_resized", &file_extension(source))
    }

    fn final_path(&self, _source: &Path) -> Option<PathBuf> {
        None
    }

    fn execute(&self, codec: &dyn ImageCodec, source: &Path, output: &Path) -> Result<()> {
        let format = ImageFormatKind::from_path(source).ok_or_else(|| {
            PixbatchError::InvalidArgument(format!("unsupported image: {}", source.display()))
        })?;

        let image = codec.decode(source)?;
        let (width, height) = scaled_dimensions(image.width(), image.height(), self.percent)?;
        let resized = codec.resize(&image, width, height);
        codec.encode(&resized, format, RESIZE_QUALITY, output)
    }

    fn verb(&self) -> &'static str {
        "Processing"
    }

    fn completion_message(&self) -> &'static str {
        "Image resizing complete!"
    }

    fn help(&self) -> &'static str {
        "Resizes images by a percentage.\n\
         It processes all subdirectories in the provided directory, resizes images, \
         and saves them with '_resized' appended to the filename."
    }
}
