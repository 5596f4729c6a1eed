//! # 图像编解码模块
//!
//! 批处理引擎通过 `ImageCodec` trait 使用图像库，不直接依赖具体实现。
//!
//! 所有解码结果都被展平为 8 位 RGB：alpha 通道会被丢弃，这是有损且不可逆的。
//!
//! ## 依赖关系
//! - 被 `transform/` 使用
//! - 子模块: format, image_rs

pub mod format;
pub mod image_rs;

pub use format::ImageFormatKind;
pub use image_rs::ImageRsCodec;

use crate::error::Result;
use image::RgbImage;
use std::path::Path;

/// 图像编解码能力
pub trait ImageCodec: Sync {
    /// 解码图像文件并展平为 RGB
    fn decode(&self, path: &Path) -> Result<RgbImage>;

    /// 编码为 JPEG
    fn encode_jpeg(&self, image: &RgbImage, quality: u8, path: &Path) -> Result<()>;

    /// 编码为有损 WebP
    fn encode_webp(&self, image: &RgbImage, quality: u8, path: &Path) -> Result<()>;

    /// 编码为 PNG
    fn encode_png(&self, image: &RgbImage, path: &Path) -> Result<()>;

    /// 三次插值缩放
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;

    /// 去除元数据
    ///
    /// 解码后的像素缓冲区本身不携带元数据，重新编码时也不会写入任何元数据容器。
    fn strip_metadata(&self, image: RgbImage) -> RgbImage {
        image
    }

    /// 按格式分派编码（PNG 忽略 quality）
    fn encode(
        &self,
        image: &RgbImage,
        format: ImageFormatKind,
        quality: u8,
        path: &Path,
    ) -> Result<()> {
        match format {
            ImageFormatKind::Jpeg => self.encode_jpeg(image, quality, path),
            ImageFormatKind::WebP => self.encode_webp(image, quality, path),
            ImageFormatKind::Png => self.encode_png(image, path),
        }
    }
}
