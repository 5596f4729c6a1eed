//! # 输出路径规划与冲突处理
//!
//! 在任何转换开始之前，为每个待处理文件确定中间输出路径和最终路径。
//!
//! 路径“被占用”指：磁盘上已存在（源文件自身除外），或已被本次运行中
//! 更早的任务占用，或是本次运行中另一个任务的源文件。占用时按
//! `CollisionPolicy` 处理：
//! - `Skip`: 不处理该文件，计为忽略
//! - `Overwrite`: 覆盖磁盘上已有的文件；与本次运行中其他任务冲突时仍然跳过
//! - `Uniquify`: 在扩展名前插入 `-2`, `-3`, ... 直到路径空闲
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 调用
//! - 使用 `batch/scanner.rs` 的扫描结果

use super::scanner::DirectoryScan;
use crate::models::TransformJob;
use crate::transform::{file_extension, file_stem, Transform};

use clap::ValueEnum;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 输出路径冲突策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// Leave the source untouched and count it as ignored
    #[default]
    Skip,
    /// Replace files that already exist on disk
    Overwrite,
    /// Append -2, -3, ... before the extension until the path is free
    Uniquify,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::Skip => write!(f, "skip"),
            CollisionPolicy::Overwrite => write!(f, "overwrite"),
            CollisionPolicy::Uniquify => write!(f, "uniquify"),
        }
    }
}

/// 单个目录的执行计划
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryPlan {
    pub dir: PathBuf,
    /// 需要执行的任务
    pub jobs: Vec<TransformJob>,
    /// 不执行的文件及原因
    pub ignored: Vec<(PathBuf, String)>,
}

/// 路径规划器
pub struct Planner<'a> {
    transform: &'a dyn Transform,
    policy: CollisionPolicy,
    claimed: HashSet<PathBuf>,
    /// 本次运行的全部源文件，任何任务都不能写到其他任务的源文件上
    sources: HashSet<PathBuf>,
}

/// 路径占用情况
enum Occupancy {
    Free,
    OnDisk,
    Claimed,
}

impl<'a> Planner<'a> {
    pub fn new(transform: &'a dyn Transform, policy: CollisionPolicy) -> Self {
        Self {
            transform,
            policy,
            claimed: HashSet::new(),
            sources: HashSet::new(),
        }
    }

    /// 为整棵树的扫描结果生成执行计划
    pub fn plan(mut self, scans: Vec<DirectoryScan>) -> Vec<DirectoryPlan> {
        self.sources = scans
            .iter()
            .flat_map(|scan| scan.eligible.iter().cloned())
            .collect();

        scans
            .into_iter()
            .map(|scan| self.plan_directory(scan))
            .collect()
    }

    fn plan_directory(&mut self, scan: DirectoryScan) -> DirectoryPlan {
        let mut plan = DirectoryPlan {
            dir: scan.dir,
            ..Default::default()
        };

        for source in scan.eligible {
            match self.plan_job(&source) {
                Ok(job) => plan.jobs.push(job),
                Err(reason) => plan.ignored.push((source, reason)),
            }
        }

        for source in scan.already_target {
            plan.ignored.push((source, "already in target format".to_string()));
        }

        plan
    }

    fn plan_job(&mut self, source: &Path) -> std::result::Result<TransformJob, String> {
        let output = self.resolve(source, self.transform.output_path(source))?;
        self.claimed.insert(output.clone());

        let final_path = match self.transform.final_path(source) {
            Some(path) => match self.resolve(source, path) {
                Ok(path) => Some(path),
                Err(reason) => {
                    self.claimed.remove(&output);
                    return Err(reason);
                }
            },
            None => None,
        };
        if let Some(path) = &final_path {
            self.claimed.insert(path.clone());
        }

        Ok(TransformJob {
            source: source.to_path_buf(),
            kind: self.transform.kind(),
            params: self.transform.params(),
            output,
            final_path,
        })
    }

    /// 按冲突策略解析一个候选路径
    fn resolve(&self, source: &Path, candidate: PathBuf) -> std::result::Result<PathBuf, String> {
        let occupancy = self.occupancy(source, &candidate);
        match (occupancy, self.policy) {
            (Occupancy::Free, _) => Ok(candidate),
            (Occupancy::OnDisk, CollisionPolicy::Overwrite) => Ok(candidate),
            (_, CollisionPolicy::Uniquify) => Ok(self.uniquify(source, &candidate)),
            (Occupancy::OnDisk, CollisionPolicy::Skip) => {
                Err(format!("output exists: {}", candidate.display()))
            }
            (Occupancy::Claimed, _) => Err(format!(
                "output claimed by another file in this run: {}",
                candidate.display()
            )),
        }
    }

    fn occupancy(&self, source: &Path, candidate: &Path) -> Occupancy {
        if self.claimed.contains(candidate)
            || (candidate != source && self.sources.contains(candidate))
        {
            Occupancy::Claimed
        } else if candidate != source && candidate.exists() {
            Occupancy::OnDisk
        } else {
            Occupancy::Free
        }
    }

    fn uniquify(&self, source: &Path, candidate: &Path) -> PathBuf {
        let stem = file_stem(candidate);
        let ext = file_extension(candidate);

        (2u32..)
            .map(|n| {
                let name = if ext.is_empty() {
                    format!("{}-{}", stem, n)
                } else {
                    format!("{}-{}.{}", stem, n, ext)
                };
                candidate.with_file_name(name)
            })
            .find(|path| matches!(self.occupancy(source, path), Occupancy::Free))
            .unwrap_or_else(|| candidate.to_path_buf())
    }
}
