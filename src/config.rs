use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::speech::DEFAULT_LOCALE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("配置 {path} 格式错误: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置文件结构 (config.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据目录或 http(s) 地址
    pub data: String,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub locale: String,
    /// 识别命令及参数，参数中的 {locale} 会被替换
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: "data".to_string(),
            speech: SpeechConfig::default(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            command: Vec::new(),
        }
    }
}

impl Config {
    /// 文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 命令行参数优先于配置文件
    pub fn with_overrides(mut self, data: Option<String>, locale: Option<String>) -> Self {
        if let Some(data) = data {
            self.data = data;
        }
        if let Some(locale) = locale {
            self.speech.locale = locale;
        }
        self
    }
}

/// 默认配置路径 (~/.config/appshelf/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("appshelf").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.speech.locale, "en-US");
        assert!(config.speech.command.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data = \"https://cdn.example/shelf\"\n\n[speech]\ncommand = [\"whisper-once\", \"--lang\", \"{locale}\"]\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data, "https://cdn.example/shelf");
        assert_eq!(config.speech.locale, "en-US");
        assert_eq!(config.speech.command.len(), 3);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data = [").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("/srv/shelf".into()), None);
        assert_eq!(config.data, "/srv/shelf");
        assert_eq!(config.speech.locale, "en-US");

        let config = config.with_overrides(None, Some("de-DE".into()));
        assert_eq!(config.data, "/srv/shelf");
        assert_eq!(config.speech.locale, "de-DE");
    }
}
