//! # 基于 `image` / `webp` crate 的编解码实现
//!
//! ## 功能
//! - 解码 JPEG/PNG/WebP（按文件内容识别格式，失败时回退到扩展名）
//! - JPEG/PNG 编码使用 `image`
//! - 有损 WebP 编码使用 `webp`（libwebp）
//!
//! 编码失败时会删除写了一半的输出文件。
//!
//! ## 依赖关系
//! - 实现 `codec::ImageCodec`
//! - 使用 `image`, `webp` crate

use super::ImageCodec;
use crate::error::{FsOp, PixbatchError, Result};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// 默认编解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRsCodec;

impl ImageRsCodec {
    pub fn new() -> Self {
        ImageRsCodec
    }
}

impl ImageCodec for ImageRsCodec {
    fn decode(&self, path: &Path) -> Result<RgbImage> {
        let reader = ImageReader::open(path)
            .map_err(|e| PixbatchError::fs(FsOp::Read, path, e))?
            .with_guessed_format()
            .map_err(|e| PixbatchError::fs(FsOp::Read, path, e))?;

        let img = reader.decode().map_err(|source| PixbatchError::DecodeError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(img.to_rgb8())
    }

    fn encode_jpeg(&self, image: &RgbImage, quality: u8, path: &Path) -> Result<()> {
        let quality = quality.clamp(1, 100);
        write_output(path, "JPEG", |writer| {
            image
                .write_with_encoder(JpegEncoder::new_with_quality(writer, quality))
                .map_err(|e| e.to_string())
        })
    }

    fn encode_webp(&self, image: &RgbImage, quality: u8, path: &Path) -> Result<()> {
        let quality = quality.clamp(1, 100);
        let (width, height) = image.dimensions();

        let encoded = webp::Encoder::from_rgb(image.as_raw(), width, height)
            .encode_simple(false, quality as f32)
            .map_err(|e| PixbatchError::EncodeError {
                format: "WebP".to_string(),
                path: path.display().to_string(),
                reason: format!("{:?}", e),
            })?;

        write_output(path, "WebP", |writer| {
            writer.write_all(&encoded).map_err(|e| e.to_string())
        })
    }

    fn encode_png(&self, image: &RgbImage, path: &Path) -> Result<()> {
        write_output(path, "PNG", |writer| {
            image
                .write_with_encoder(PngEncoder::new(writer))
                .map_err(|e| e.to_string())
        })
    }

    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        imageops::resize(image, width, height, FilterType::CatmullRom)
    }
}

/// 创建输出文件并写入编码数据
fn write_output<F>(path: &Path, format: &str, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::result::Result<(), String>,
{
    let file = File::create(path).map_err(|e| PixbatchError::fs(FsOp::Write, path, e))?;
    let mut writer = BufWriter::new(file);

    let result = encode(&mut writer)
        .map_err(|reason| PixbatchError::EncodeError {
            format: format.to_string(),
            path: path.display().to_string(),
            reason,
        })
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| PixbatchError::fs(FsOp::Write, path, e))
        });

    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(path);
    }

    result
}
