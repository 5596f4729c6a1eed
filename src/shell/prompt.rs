//! # 交互输入
//!
//! `Prompt` 把“显示提示、读取一行”抽象出来，交互循环本身不直接接触终端。
//!
//! ## 依赖关系
//! - 被 `shell/mod.rs` 使用
//! - 使用 `console` crate

use crate::error::{PixbatchError, Result};

use console::Term;
use std::io::BufRead;

/// 行输入来源
pub trait Prompt {
    /// 显示提示并读取一行；`None` 表示输入已结束
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// 终端输入
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.term
            .write_str(prompt)
            .map_err(PixbatchError::Terminal)?;

        if self.term.is_term() {
            return self
                .term
                .read_line()
                .map(Some)
                .map_err(PixbatchError::Terminal);
        }

        // 非终端（管道 / 重定向）输入：读到 EOF 时结束
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(PixbatchError::Terminal)?;
        Ok((read > 0).then_some(line))
    }
}

/// 预设输入序列（测试用）
#[cfg(test)]
pub struct ScriptedPrompt {
    lines: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
