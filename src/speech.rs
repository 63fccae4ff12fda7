//! 语音输入
//!
//! 一次性语音转文字，由外部识别命令完成

use std::io;
use std::process::Command;

use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en-US";

/// 参数中的占位符，运行时替换为语言区域
const LOCALE_PLACEHOLDER: &str = "{locale}";

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("未配置语音识别命令")]
    Unavailable,
    #[error("无法启动识别命令 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("识别命令退出异常 ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    #[error("没有识别到语音")]
    NoSpeech,
}

pub trait SpeechRecognizer: Send + Sync {
    /// 阻塞直到得到一次识别结果
    fn recognize(&self, locale: &str) -> Result<String, SpeechError>;
}

/// 调用外部程序，取标准输出的第一行非空文本
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// `command` 第一项为程序，其余为参数
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        let args = self
            .args
            .iter()
            .map(|arg| arg.replace(LOCALE_PLACEHOLDER, locale));

        tracing::debug!(program = %self.program, locale, "启动语音识别");
        let output = Command::new(&self.program)
            .args(args)
            .env("SPEECH_LOCALE", locale)
            .output()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SpeechError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(SpeechError::NoSpeech)
    }
}

/// 未配置命令时使用
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRecognizer;

impl SpeechRecognizer for NoRecognizer {
    fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unavailable)
    }
}
