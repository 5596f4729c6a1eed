//! # 图像格式识别
//!
//! 按扩展名（不区分大小写）识别支持的图像格式。
//!
//! ## 依赖关系
//! - 被 `codec/`, `transform/` 和 `batch/scanner.rs` 使用
//! - 无外部模块依赖

use std::path::Path;

/// 支持的图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormatKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormatKind {
    /// 从扩展名识别格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormatKind::Jpeg),
            "png" => Some(ImageFormatKind::Png),
            "webp" => Some(ImageFormatKind::WebP),
            _ => None,
        }
    }

    /// 从文件路径识别格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for ImageFormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormatKind::Jpeg => write!(f, "JPEG"),
            ImageFormatKind::Png => write!(f, "PNG"),
            ImageFormatKind::WebP => write!(f, "WebP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(
            ImageFormatKind::from_path(&PathBuf::from("a/B.JPG")),
            Some(ImageFormatKind::Jpeg)
        );
        assert_eq!(
            ImageFormatKind::from_path(&PathBuf::from("c.JpEg")),
            Some(ImageFormatKind::Jpeg)
        );
        assert_eq!(
            ImageFormatKind::from_path(&PathBuf::from("d.WebP")),
            Some(ImageFormatKind::WebP)
        );
        assert_eq!(ImageFormatKind::from_path(&PathBuf::from("e.gif")), None);
        assert_eq!(ImageFormatKind::from_path(&PathBuf::from("png")), None);
    }
}
