//! # 交互模式
//!
//! 循环提示输入目录和各转换的参数，每确认一个目录就运行一次批处理引擎。
//!
//! ## 命令
//! - `help`: 显示当前转换的说明
//! - `exit` / `e`: 退出（输入结束时同样退出）
//!
//! 无效的目录或缩放百分比只提示错误并重新询问；无效的 JPG 质量回退到默认值。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `batch/` 执行转换和打印报告
//! - 子模块: prompt

pub mod prompt;

pub use prompt::{Prompt, TermPrompt};

use crate::batch::{report, BatchEngine, RunOutcome};
use crate::error::Result;
use crate::models::TransformKind;
use crate::transform::{Resize, StripMetadata, ToJpg, ToWebp, Transform};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 交互模式配置
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// 转换类型
    pub kind: TransformKind,
    /// JPEG 质量提示的默认值
    pub jpeg_quality: u8,
    /// WebP 质量
    pub webp_quality: u8,
    /// 每次运行后写出的 CSV 报告
    pub report: Option<PathBuf>,
}

/// 参数读取结果
enum ParamInput {
    Ready(Box<dyn Transform>),
    Invalid,
    Eof,
}

/// 交互循环
pub struct Shell<'a, P: Prompt> {
    prompt: P,
    engine: BatchEngine<'a>,
    config: ShellConfig,
}

impl<'a, P: Prompt> Shell<'a, P> {
    pub fn new(prompt: P, engine: BatchEngine<'a>, config: ShellConfig) -> Self {
        Self {
            prompt,
            engine,
            config,
        }
    }

    /// 运行交互循环，返回每次成功运行的结果
    pub fn run(&mut self) -> Result<Vec<RunOutcome>> {
        let mut runs = Vec::new();

        loop {
            let line = match self.ask("Enter directory or type 'help' for more information:")? {
                Some(line) => line,
                None => break,
            };
            let input = line.trim();

            match input.to_lowercase().as_str() {
                "exit" | "e" => break,
                "help" => {
                    self.print_help();
                    continue;
                }
                _ => {}
            }

            let dir = Path::new(input.trim_matches(|c: char| c == '"' || c == '\''));
            if input.is_empty() || !dir.is_dir() {
                output::print_error("Invalid directory. Please try again.");
                continue;
            }

            let transform = match self.read_parameters()? {
                ParamInput::Ready(transform) => transform,
                ParamInput::Invalid => continue,
                ParamInput::Eof => break,
            };

            if let Some(outcome) = self.run_once(dir, transform.as_ref()) {
                runs.push(outcome);
            }
        }

        output::print_info("Exiting program.");
        Ok(runs)
    }

    fn ask(&mut self, msg: &str) -> Result<Option<String>> {
        self.prompt.read_line(&output::prompt_text(msg))
    }

    fn print_help(&self) {
        output::print_help(default_transform(&self.config).help());
        output::print_help("Type 'exit' or 'e' to quit the program.");
    }

    /// 读取当前转换需要的参数
    fn read_parameters(&mut self) -> Result<ParamInput> {
        match self.config.kind {
            TransformKind::ToJpg => {
                let msg = format!(
                    "Enter JPG quality (1-100, default is {}):",
                    self.config.jpeg_quality
                );
                let line = match self.ask(&msg)? {
                    Some(line) => line,
                    None => return Ok(ParamInput::Eof),
                };
                let default = self.config.jpeg_quality;
                let quality = parse_quality(&line, default).unwrap_or_else(|| {
                    output::print_warning(&format!(
                        "Invalid quality, using default of {}.",
                        default
                    ));
                    default
                });
                Ok(ParamInput::Ready(Box::new(ToJpg::new(quality))))
            }
            TransformKind::Resize => {
                let line = match self.ask("Enter resize percentage (e.g., 50 for 50%):")? {
                    Some(line) => line,
                    None => return Ok(ParamInput::Eof),
                };
                let percent: f64 = match line.trim().parse() {
                    Ok(v) => v,
                    Err(_) => {
                        output::print_error("Invalid input. Please enter a number.");
                        return Ok(ParamInput::Invalid);
                    }
                };
                match Resize::new(percent) {
                    Ok(t) => Ok(ParamInput::Ready(Box::new(t))),
                    Err(_) => {
                        output::print_error("Invalid percentage. Please enter a positive number.");
                        Ok(ParamInput::Invalid)
                    }
                }
            }
            TransformKind::ToWebp | TransformKind::StripMetadata => {
                Ok(ParamInput::Ready(default_transform(&self.config)))
            }
        }
    }

    /// 执行一次批处理；失败只打印，不退出循环
    fn run_once(&self, dir: &Path, transform: &dyn Transform) -> Option<RunOutcome> {
        let outcome = match self.engine.run(dir, transform) {
            Ok(outcome) => outcome,
            Err(e) => {
                output::print_error(&e.to_string());
                return None;
            }
        };

        report::print_summary(transform, &outcome);

        if let Some(path) = &self.config.report {
            match report::write_csv(&outcome.results, path) {
                Ok(()) => output::print_success(&format!("Report written to '{}'", path.display())),
                Err(e) => output::print_error(&e.to_string()),
            }
        }

        Some(outcome)
    }
}

/// 使用默认参数构造转换（help 文本、无参数的转换）
fn default_transform(config: &ShellConfig) -> Box<dyn Transform> {
    match config.kind {
        TransformKind::ToJpg => Box::new(ToJpg::new(config.jpeg_quality)),
        TransformKind::ToWebp => Box::new(ToWebp::new(config.webp_quality)),
        TransformKind::Resize => Box::new(Resize::default()),
        TransformKind::StripMetadata => Box::new(StripMetadata),
    }
}

/// 解析质量输入：空输入取默认值，其余必须是 1-100 的整数，否则返回 None
fn parse_quality(input: &str, default: u8) -> Option<u8> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    input.parse::<u8>().ok().filter(|q| (1..=100).contains(q))
}
