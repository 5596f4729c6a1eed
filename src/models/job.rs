//! # 转换任务数据模型
//!
//! 每个匹配到的文件在扫描阶段生成一个 `TransformJob`，
//! 执行后产生一个 `TransformResult`。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `transform/` 使用
//! - 无外部模块依赖

use serde::Serialize;
use std::path::PathBuf;

/// 转换类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// WebP -> JPEG
    ToJpg,
    /// JPEG/PNG -> WebP
    ToWebp,
    /// 按百分比缩放
    Resize,
    /// 去除元数据
    StripMetadata,
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformKind::ToJpg => write!(f, "to-jpg"),
            TransformKind::ToWebp => write!(f, "to-webp"),
            TransformKind::Resize => write!(f, "resize"),
            TransformKind::StripMetadata => write!(f, "strip-metadata"),
        }
    }
}

/// 转换参数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformParams {
    /// 有损编码质量 (1-100)
    pub quality: Option<u8>,
    /// 缩放百分比 (> 0)
    pub scale_percent: Option<f64>,
}

impl std::fmt::Display for TransformParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.quality, self.scale_percent) {
            (Some(q), Some(p)) => write!(f, "quality {}, scale {}%", q, p),
            (Some(q), None) => write!(f, "quality {}", q),
            (None, Some(p)) => write!(f, "scale {}%", p),
            (None, None) => Ok(()),
        }
    }
}

/// 单个文件的转换任务
///
/// 输出路径和最终路径在扫描阶段就已确定（含冲突处理），
/// 执行阶段不再做任何路径决策。
#[derive(Debug, Clone, PartialEq)]
pub struct TransformJob {
    /// 源文件
    pub source: PathBuf,
    /// 转换类型
    pub kind: TransformKind,
    /// 转换参数
    pub params: TransformParams,
    /// 转换阶段写出的中间文件
    pub output: PathBuf,
    /// 回收阶段的重命名目标（None 表示保留中间文件和原文件）
    pub final_path: Option<PathBuf>,
}

/// 单个文件的处理结局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Converted,
    Ignored,
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Converted => write!(f, "converted"),
            Outcome::Ignored => write!(f, "ignored"),
            Outcome::Failed => write!(f, "failed"),
        }
    }
}

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub original_size: u64,
    pub new_size: Option<u64>,
    pub outcome: Outcome,
    /// 失败原因或忽略原因
    pub reason: Option<String>,
}

impl TransformResult {
    /// 转换成功
    pub fn converted(source: PathBuf, output: PathBuf, original_size: u64, new_size: u64) -> Self {
        Self {
            source,
            output: Some(output),
            original_size,
            new_size: Some(new_size),
            outcome: Outcome::Converted,
            reason: None,
        }
    }

    /// 被忽略（已是目标格式，或输出路径冲突）
    pub fn ignored(source: PathBuf, original_size: u64, reason: impl Into<String>) -> Self {
        Self {
            source,
            output: None,
            original_size,
            new_size: None,
            outcome: Outcome::Ignored,
            reason: Some(reason.into()),
        }
    }

    /// 转换失败
    pub fn failed(source: PathBuf, original_size: u64, error: impl Into<String>) -> Self {
        Self {
            source,
            output: None,
            original_size,
            new_size: None,
            outcome: Outcome::Failed,
            reason: Some(error.into()),
        }
    }

    /// 节省的空间（字节），输出更大时为负
    pub fn space_saved(&self) -> i64 {
        match (self.outcome, self.new_size) {
            (Outcome::Converted, Some(new_size)) => self.original_size as i64 - new_size as i64,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_display() {
        let jpeg = TransformParams {
            quality: Some(85),
            scale_percent: None,
        };
        assert_eq!(jpeg.to_string(), "quality 85");

        let resize = TransformParams {
            quality: Some(95),
            scale_percent: Some(12.5),
        };
        assert_eq!(resize.to_string(), "quality 95, scale 12.5%");
        assert_eq!(TransformParams::default().to_string(), "");
    }

    #[test]
    fn test_space_saved_can_be_negative() {
        let r = TransformResult::converted("a.jpg".into(), "a1.webp".into(), 100, 250);
        assert_eq!(r.space_saved(), -150);
    }

    #[test]
    fn test_space_saved_only_counts_conversions() {
        let r = TransformResult::failed("a.jpg".into(), 100, "corrupt");
        assert_eq!(r.space_saved(), 0);
        let r = TransformResult::ignored("c.webp".into(), 100, "already webp");
        assert_eq!(r.space_saved(), 0);
    }
}
