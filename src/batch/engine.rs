//! # 批处理引擎
//!
//! 两阶段执行：
//! 1. 转换阶段：按目录逐个执行转换（rayon 线程池并行），只写新文件
//! 2. 回收阶段：所有目录转换完毕后，统一删除原文件、重命名输出
//!
//! ## 功能
//! - 扫描 -> 规划 -> 转换 -> 回收 -> 统计
//! - 每个目录一个进度条
//! - 单文件失败只记录，不中断运行
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `shell/` 调用
//! - 使用 `batch/scanner.rs`, `batch/plan.rs`, `batch/reconcile.rs`
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use super::plan::{CollisionPolicy, DirectoryPlan, Planner};
use super::reconcile::{PendingDiskOp, ReconcilePlan, ReconcileReport};
use super::scanner::Scanner;
use crate::codec::ImageCodec;
use crate::error::{FsOp, PixbatchError, Result};
use crate::models::{RunStats, TransformJob, TransformResult};
use crate::transform::Transform;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 引擎配置
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// 并行作业数（0 = CPU 核数）
    pub jobs: usize,
    /// 输出路径冲突策略
    pub collision: CollisionPolicy,
    /// 是否显示进度条
    pub show_progress: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            jobs: 0,
            collision: CollisionPolicy::Skip,
            show_progress: true,
        }
    }
}

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub stats: RunStats,
    pub results: Vec<TransformResult>,
    pub reconcile: ReconcileReport,
}

/// 转换阶段结果
pub struct TransformPass {
    results: Vec<TransformResult>,
    pending: Vec<PendingDiskOp>,
}

impl TransformPass {
    /// 阶段边界：转换阶段的结果与回收计划
    pub fn finish(self) -> (Vec<TransformResult>, ReconcilePlan) {
        (self.results, ReconcilePlan::new(self.pending))
    }
}

/// 批处理引擎
pub struct BatchEngine<'a> {
    codec: &'a dyn ImageCodec,
    options: EngineOptions,
}

impl<'a> BatchEngine<'a> {
    /// 创建新的批处理引擎
    pub fn new(codec: &'a dyn ImageCodec, options: EngineOptions) -> Self {
        Self { codec, options }
    }

    /// 对整棵目录树执行一次转换
    pub fn run(&self, root: &Path, transform: &dyn Transform) -> Result<RunOutcome> {
        if !root.is_dir() {
            return Err(PixbatchError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }

        let scans = Scanner::new(root, transform).scan();
        let plans = Planner::new(transform, self.options.collision).plan(scans);

        let (mut results, reconcile_plan) = self.transform_pass(&plans, transform)?.finish();
        let reconcile = reconcile_plan.execute();

        // 输出记录为回收后文件的实际位置
        let moved: HashMap<&PathBuf, &PathBuf> =
            reconcile.renamed.iter().map(|(from, to)| (from, to)).collect();
        for result in &mut results {
            if let Some(to) = result.output.as_ref().and_then(|o| moved.get(o)) {
                result.output = Some((*to).clone());
            }
        }

        let mut stats = RunStats::default();
        for result in &results {
            stats.merge(result);
        }
        stats.reconcile_failures = reconcile.failures.len();

        Ok(RunOutcome {
            stats,
            results,
            reconcile,
        })
    }

    /// 转换阶段：所有目录处理完毕才返回
    pub fn transform_pass(
        &self,
        plans: &[DirectoryPlan],
        transform: &dyn Transform,
    ) -> Result<TransformPass> {
        let jobs = if self.options.jobs == 0 {
            num_cpus::get()
        } else {
            self.options.jobs
        };
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

        let mut pass = TransformPass {
            results: Vec::new(),
            pending: Vec::new(),
        };

        for plan in plans {
            let pb = if self.options.show_progress && !plan.jobs.is_empty() {
                progress::create_progress_bar(
                    plan.jobs.len() as u64,
                    &format!("{} in {}", transform.verb(), plan.dir.display()),
                )
            } else {
                ProgressBar::hidden()
            };

            let results: Vec<TransformResult> = pool.install(|| {
                plan.jobs
                    .par_iter()
                    .map(|job| {
                        let result = self.run_job(job, transform, &pb);
                        pb.inc(1);
                        result
                    })
                    .collect()
            });
            pb.finish_and_clear();

            for (job, result) in plan.jobs.iter().zip(results) {
                if let (Some(output), Some(final_path)) = (&result.output, &job.final_path) {
                    pass.pending.push(PendingDiskOp {
                        delete: job.source.clone(),
                        rename: Some((output.clone(), final_path.clone())),
                    });
                }
                pass.results.push(result);
            }

            for (source, reason) in &plan.ignored {
                let size = fs::metadata(source).map(|m| m.len()).unwrap_or(0);
                pass.results
                    .push(TransformResult::ignored(source.clone(), size, reason.clone()));
            }
        }

        Ok(pass)
    }

    /// 执行单个任务
    fn run_job(
        &self,
        job: &TransformJob,
        transform: &dyn Transform,
        pb: &ProgressBar,
    ) -> TransformResult {
        let outcome = fs::metadata(&job.source)
            .map(|m| m.len())
            .map_err(|e| PixbatchError::fs(FsOp::Metadata, &job.source, e))
            .and_then(|original_size| {
                transform.execute(self.codec, &job.source, &job.output)?;
                let new_size = fs::metadata(&job.output)
                    .map(|m| m.len())
                    .map_err(|e| PixbatchError::fs(FsOp::Metadata, &job.output, e))?;
                Ok((original_size, new_size))
            });

        match outcome {
            Ok((original_size, new_size)) => TransformResult::converted(
                job.source.clone(),
                job.output.clone(),
                original_size,
                new_size,
            ),
            Err(e) => {
                let params = job.params.to_string();
                let label = if params.is_empty() {
                    job.kind.to_string()
                } else {
                    format!("{}, {}", job.kind, params)
                };
                pb.suspend(|| {
                    output::print_error(&format!(
                        "Error processing {} ({}): {}",
                        job.source.display(),
                        label,
                        e
                    ));
                });
                let size = fs::metadata(&job.source).map(|m| m.len()).unwrap_or(0);
                TransformResult::failed(job.source.clone(), size, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ImageRsCodec;
    use crate::models::Outcome;
    use crate::transform::{Resize, StripMetadata, ToJpg, ToWebp};
    use image::{Rgb, RgbImage};
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn quiet() -> EngineOptions {
        EngineOptions {
            jobs: 2,
            show_progress: false,
            ..Default::default()
        }
    }

    fn sample(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    fn write_image(path: &Path, width: u32, height: u32) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let codec = ImageRsCodec::new();
        let img = sample(width, height);
        let format = crate::codec::ImageFormatKind::from_path(path).unwrap();
        codec.encode(&img, format, 90, path).unwrap();
    }

    fn listing(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_to_webp_scenario() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 40, 30);
        write_image(&dir.path().join("b.png"), 20, 20);
        write_image(&dir.path().join("c.webp"), 10, 10);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &ToWebp::default()).unwrap();

        assert_eq!(outcome.stats.total_detected, 3);
        assert_eq!(outcome.stats.total_converted, 2);
        assert_eq!(outcome.stats.total_ignored, 1);
        assert_eq!(outcome.stats.total_failed, 0);
        assert_eq!(outcome.stats.reconcile_failures, 0);
        assert_eq!(listing(dir.path()), set(&["a.webp", "b.webp", "c.webp"]));
    }

    #[test]
    fn test_to_webp_second_run_ignores_everything() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("one.jpg"), 16, 16);
        write_image(&dir.path().join("two.jpeg"), 16, 16);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let t = ToWebp::default();

        let first = engine.run(dir.path(), &t).unwrap();
        assert_eq!(first.stats.total_converted, 2);

        let second = engine.run(dir.path(), &t).unwrap();
        assert_eq!(second.stats.total_detected, 2);
        assert_eq!(second.stats.total_converted, 0);
        assert_eq!(second.stats.total_ignored, 2);
        assert_eq!(listing(dir.path()), set(&["one.webp", "two.webp"]));
    }

    #[test]
    fn test_to_jpg_replaces_webp() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("sub/x.webp"), 12, 8);
        write_image(&dir.path().join("sub/keep.jpg"), 12, 8);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &ToJpg::new(85)).unwrap();

        assert_eq!(outcome.stats.total_detected, 1);
        assert_eq!(outcome.stats.total_converted, 1);
        assert_eq!(listing(&dir.path().join("sub")), set(&["keep.jpg", "x.jpg"]));

        let decoded = codec.decode(&dir.path().join("sub/x.jpg")).unwrap();
        assert_eq!(decoded.dimensions(), (12, 8));
    }

    #[test]
    fn test_space_saved_matches_sum_of_deltas() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.png"), 64, 64);
        write_image(&dir.path().join("b.png"), 32, 48);

        let sizes: i64 = ["a.png", "b.png"]
            .iter()
            .map(|n| fs::metadata(dir.path().join(n)).unwrap().len() as i64)
            .sum();

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &ToWebp::default()).unwrap();

        let new_sizes: i64 = ["a.webp", "b.webp"]
            .iter()
            .map(|n| fs::metadata(dir.path().join(n)).unwrap().len() as i64)
            .sum();
        assert_eq!(outcome.stats.total_space_saved, sizes - new_sizes);

        let from_results: i64 = outcome.results.iter().map(|r| r.space_saved()).sum();
        assert_eq!(from_results, outcome.stats.total_space_saved);
    }

    #[test]
    fn test_corrupt_file_fails_and_is_preserved() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.jpg");
        fs::write(&bad, b"this is not an image").unwrap();
        write_image(&dir.path().join("good.png"), 8, 8);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &ToWebp::default()).unwrap();

        assert_eq!(outcome.stats.total_converted, 1);
        assert_eq!(outcome.stats.total_failed, 1);
        assert!(outcome.stats.has_failures());
        assert_eq!(fs::read(&bad).unwrap(), b"this is not an image");
        assert_eq!(listing(dir.path()), set(&["bad.jpg", "good.webp"]));

        let failed = outcome
            .results
            .iter()
            .find(|r| r.outcome == Outcome::Failed)
            .unwrap();
        assert_eq!(failed.source, bad);
        assert!(failed.reason.is_some());
    }

    #[test]
    fn test_resize_keeps_original_and_scales() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("wide.png"), 200, 100);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine
            .run(dir.path(), &Resize::new(50.0).unwrap())
            .unwrap();

        assert_eq!(outcome.stats.total_converted, 1);
        assert!(outcome.reconcile.deleted == 0 && outcome.reconcile.renamed.is_empty());
        assert_eq!(listing(dir.path()), set(&["wide.png", "wide_resized.png"]));

        let resized = codec.decode(&dir.path().join("wide_resized.png")).unwrap();
        assert_eq!(resized.dimensions(), (100, 50));
        let original = codec.decode(&dir.path().join("wide.png")).unwrap();
        assert_eq!(original.dimensions(), (200, 100));
    }

    #[test]
    fn test_resize_to_empty_image_fails() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("thin.png"), 10, 1);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine
            .run(dir.path(), &Resize::new(50.0).unwrap())
            .unwrap();

        assert_eq!(outcome.stats.total_failed, 1);
        assert_eq!(listing(dir.path()), set(&["thin.png"]));
    }

    #[test]
    fn test_strip_metadata_renames_back() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("p.jpg"), 16, 16);
        write_image(&dir.path().join("q.webp"), 16, 16);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &StripMetadata).unwrap();

        assert_eq!(outcome.stats.total_converted, 2);
        assert_eq!(outcome.reconcile.deleted, 2);
        assert_eq!(outcome.reconcile.renamed.len(), 2);
        assert_eq!(listing(dir.path()), set(&["p.jpg", "q.webp"]));
        assert!(codec.decode(&dir.path().join("p.jpg")).is_ok());
    }

    #[test]
    fn test_directories_without_matches_are_untouched() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/readme.txt"), b"hello").unwrap();

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let outcome = engine.run(dir.path(), &ToWebp::default()).unwrap();

        assert_eq!(outcome.stats, RunStats::default());
        assert!(outcome.results.is_empty());
        assert_eq!(listing(&dir.path().join("docs")), set(&["readme.txt"]));
    }

    #[test]
    fn test_uniquify_keeps_both_same_stem_inputs() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 8, 8);
        write_image(&dir.path().join("a.png"), 8, 8);

        let codec = ImageRsCodec::new();
        let options = EngineOptions {
            collision: CollisionPolicy::Uniquify,
            ..quiet()
        };
        let outcome = BatchEngine::new(&codec, options)
            .run(dir.path(), &ToWebp::default())
            .unwrap();

        assert_eq!(outcome.stats.total_converted, 2);
        assert_eq!(listing(dir.path()), set(&["a-2.webp", "a.webp"]));
    }

    #[test]
    fn test_skip_keeps_colliding_source() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 8, 8);
        write_image(&dir.path().join("a.png"), 8, 8);

        let codec = ImageRsCodec::new();
        let outcome = BatchEngine::new(&codec, quiet())
            .run(dir.path(), &ToWebp::default())
            .unwrap();

        assert_eq!(outcome.stats.total_converted, 1);
        assert_eq!(outcome.stats.total_ignored, 1);
        assert_eq!(listing(dir.path()), set(&["a.png", "a.webp"]));
    }

    fn overwrite() -> EngineOptions {
        EngineOptions {
            collision: CollisionPolicy::Overwrite,
            ..quiet()
        }
    }

    #[test]
    fn test_overwrite_strip_leaves_ignored_source_intact() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let nometa = dir.path().join("a_nometa.png");
        write_image(&a, 8, 8);
        write_image(&nometa, 4, 4);
        let a_before = fs::read(&a).unwrap();

        let codec = ImageRsCodec::new();
        let outcome = BatchEngine::new(&codec, overwrite())
            .run(dir.path(), &StripMetadata)
            .unwrap();

        let ignored: Vec<_> = outcome
            .results
            .iter()
            .filter(|r| r.outcome == Outcome::Ignored)
            .map(|r| r.source.clone())
            .collect();
        assert_eq!(ignored, vec![a.clone()]);
        assert_eq!(outcome.stats.total_converted, 1);

        assert_eq!(listing(dir.path()), set(&["a.png", "a_nometa.png"]));
        assert_eq!(fs::read(&a).unwrap(), a_before);
        assert_eq!(codec.decode(&nometa).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_overwrite_resize_never_writes_over_another_input() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let resized = dir.path().join("a_resized.png");
        write_image(&a, 40, 20);
        write_image(&resized, 10, 10);
        let resized_before = fs::read(&resized).unwrap();

        let codec = ImageRsCodec::new();
        let outcome = BatchEngine::new(&codec, overwrite())
            .run(dir.path(), &Resize::new(50.0).unwrap())
            .unwrap();

        assert_eq!(outcome.stats.total_converted, 1);
        assert_eq!(outcome.stats.total_ignored, 1);
        assert_eq!(fs::read(&resized).unwrap(), resized_before);
        assert_eq!(
            listing(dir.path()),
            set(&["a.png", "a_resized.png", "a_resized_resized.png"])
        );
        let twice = codec
            .decode(&dir.path().join("a_resized_resized.png"))
            .unwrap();
        assert_eq!(twice.dimensions(), (5, 5));
    }

    #[test]
    fn test_results_point_at_renamed_outputs() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 8, 8);
        write_image(&dir.path().join("w.png"), 8, 8);

        let codec = ImageRsCodec::new();
        let outcome = BatchEngine::new(&codec, quiet())
            .run(dir.path(), &ToWebp::default())
            .unwrap();

        let outputs: BTreeSet<PathBuf> = outcome
            .results
            .iter()
            .filter_map(|r| r.output.clone())
            .collect();
        let expected: BTreeSet<PathBuf> = [dir.path().join("a.webp"), dir.path().join("w.webp")]
            .into_iter()
            .collect();
        assert_eq!(outputs, expected);
        assert!(outputs.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let err = engine
            .run(&PathBuf::from("/definitely/not/here"), &ToWebp::default())
            .unwrap_err();
        assert!(matches!(err, PixbatchError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_transform_pass_writes_but_never_deletes() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.jpg"), 8, 8);

        let codec = ImageRsCodec::new();
        let engine = BatchEngine::new(&codec, quiet());
        let t = ToWebp::default();
        let scans = Scanner::new(dir.path(), &t).scan();
        let plans = Planner::new(&t, CollisionPolicy::Skip).plan(scans);

        let (results, plan) = engine.transform_pass(&plans, &t).unwrap().finish();
        assert_eq!(results.len(), 1);
        assert!(!plan.is_empty());
        assert_eq!(listing(dir.path()), set(&["a.jpg", "a1.webp"]));

        plan.execute();
        assert_eq!(listing(dir.path()), set(&["a.webp"]));
    }
}
