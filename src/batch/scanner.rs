//! # 目录扫描器
//!
//! 递归遍历根目录，按转换策略的扩展名集合收集每个目录中的待处理文件。
//!
//! ## 功能
//! - 深度优先遍历（`walkdir`），目录与文件均按文件名排序，保证结果可复现
//! - 扩展名匹配不区分大小写
//! - 没有任何匹配文件的目录直接跳过
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 调用
//! - 使用 `transform::Transform` 判断文件是否入选

use crate::codec::ImageFormatKind;
use crate::transform::Transform;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 单个目录的扫描结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryScan {
    /// 目录路径
    pub dir: PathBuf,
    /// 需要转换的文件
    pub eligible: Vec<PathBuf>,
    /// 已是目标格式的文件
    pub already_target: Vec<PathBuf>,
}

impl DirectoryScan {
    /// 检测到的文件总数
    pub fn detected(&self) -> usize {
        self.eligible.len() + self.already_target.len()
    }
}

/// 目录扫描器
pub struct Scanner<'a> {
    /// 根目录
    root: PathBuf,
    /// 转换策略
    transform: &'a dyn Transform,
}

impl<'a> Scanner<'a> {
    /// 创建新的扫描器
    pub fn new(root: impl Into<PathBuf>, transform: &'a dyn Transform) -> Self {
        Self {
            root: root.into(),
            transform,
        }
    }

    /// 扫描整棵目录树，只返回含匹配文件的目录
    pub fn scan(&self) -> Vec<DirectoryScan> {
        let walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();

        let mut scans = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    output::print_warning(&format!("Skipping unreadable entry: {}", e));
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            match self.scan_directory(entry.path()) {
                Ok(scan) if scan.detected() > 0 => scans.push(scan),
                Ok(_) => {}
                Err(e) => output::print_warning(&format!(
                    "Skipping directory {}: {}",
                    entry.path().display(),
                    e
                )),
            }
        }

        scans
    }

    /// 扫描单个目录（不递归）
    fn scan_directory(&self, dir: &Path) -> std::io::Result<DirectoryScan> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        let mut scan = DirectoryScan {
            dir: dir.to_path_buf(),
            ..Default::default()
        };

        for file in files {
            let format = match ImageFormatKind::from_path(&file) {
                Some(format) => format,
                None => continue,
            };

            if self.transform.input_formats().contains(&format) {
                scan.eligible.push(file);
            } else if self.transform.is_already_target(format) {
                scan.already_target.push(file);
            }
        }

        Ok(scan)
    }
}
