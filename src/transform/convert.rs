//! # 格式转换策略
//!
//! - `ToJpg`: `.webp` -> `<stem>1.jpg`，回收后重命名为 `<stem>.jpg`
//! - `ToWebp`: `.jpg/.jpeg/.png` -> `<stem>1.webp`，回收后重命名为 `<stem>.webp`；
//!   已有的 `.webp` 文件计为忽略
//!
//! ## 依赖关系
//! - 实现 `transform::Transform`
//! - 使用 `codec::ImageCodec`

use super::{sibling, Transform};
use crate::codec::{ImageCodec, ImageFormatKind};
use crate::error::Result;
use crate::models::{TransformKind, TransformParams};

use std::path::{Path, PathBuf};

/// JPEG 默认质量
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// WebP 默认质量（与 libwebp 常用默认值一致）
pub const DEFAULT_WEBP_QUALITY: u8 = 80;

/// WebP -> JPEG
#[derive(Debug, Clone, Copy)]
pub struct ToJpg {
    quality: u8,
}

impl ToJpg {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for ToJpg {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl Transform for ToJpg {
    fn kind(&self) -> TransformKind {
        TransformKind::ToJpg
    }

    fn params(&self) -> TransformParams {
        TransformParams {
            quality: Some(self.quality),
            scale_percent: None,
        }
    }

    fn input_formats(&self) -> &'static [ImageFormatKind] {
        &[ImageFormatKind::WebP]
    }

    fn output_path(&self, source: &Path) -> PathBuf {
        sibling(source, "1", "jpg")
    }

    fn final_path(&self, source: &Path) -> Option<PathBuf> {
        Some(sibling(source, "", "jpg"))
    }

    fn execute(&self, codec: &dyn ImageCodec, source: &Path, output: &Path) -> Result<()> {
        let image = codec.decode(source)?;
        codec.encode_jpeg(&image, self.quality, output)
    }

    fn verb(&self) -> &'static str {
        "Converting"
    }

    fn completion_message(&self) -> &'static str {
        "Conversion complete!"
    }

    fn help(&self) -> &'static str {
        "Converts .webp images to .jpg format.\n\
         It processes all subdirectories in the provided directory, converting and renaming files.\n\
         Files that are already .jpg are not touched."
    }
}

/// JPEG/PNG -> WebP
#[derive(Debug, Clone, Copy)]
pub struct ToWebp {
    quality: u8,
}

impl ToWebp {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for ToWebp {
    fn default() -> Self {
        Self::new(DEFAULT_WEBP_QUALITY)
    }
}

impl Transform for ToWebp {
    fn kind(&self) -> TransformKind {
        TransformKind::ToWebp
    }

    fn params(&self) -> TransformParams {
        TransformParams {
            quality: Some(self.quality),
            scale_percent: None,
        }
    }

    fn input_formats(&self) -> &'static [ImageFormatKind] {
        &[ImageFormatKind::Jpeg, ImageFormatKind::Png]
    }

    fn is_already_target(&self, format: ImageFormatKind) -> bool {
        format == ImageFormatKind::WebP
    }

    fn output_path(&self, source: &Path) -> PathBuf {
        sibling(source, "1", "webp")
    }

    fn final_path(&self, source: &Path) -> Option<PathBuf> {
        Some(sibling(source, "", "webp"))
    }

    fn execute(&self, codec: &dyn ImageCodec, source: &Path, output: &Path) -> Result<()> {
        let image = codec.decode(source)?;
        codec.encode_webp(&image, self.quality, output)
    }

    fn verb(&self) -> &'static str {
        "Converting"
    }

    fn completion_message(&self) -> &'static str {
        "Conversion complete!"
    }

    fn help(&self) -> &'static str {
        "Converts .jpeg, .jpg and .png images to .webp format.\n\
         It processes all subdirectories in the provided directory, converting and renaming files.\n\
         Images that are already .webp are counted as ignored."
    }
}
