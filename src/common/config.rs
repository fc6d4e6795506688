// src/common/config.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::error::{AppError, Result};
use crate::render::DisplayCharacter;

/// 时钟配置
///
/// 所有字段都有默认值，配置文件中只需写出需要覆盖的部分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// 图片资源根路径，本地相对目录或远程URL，原样拼接
    pub base_path: String,
    /// 图片扩展名
    pub image_extension: String,
    /// 刷新周期（毫秒）
    pub tick_period_ms: u64,
    /// 每个字符的候选图片文件名，覆盖默认的 `<字符>-1.<扩展名>`
    pub candidates: BTreeMap<String, Vec<String>>,
    /// HTML页面输出路径
    pub output_path: PathBuf,
    /// HTML页面标题
    pub page_title: String,
    /// 默认日志级别（RUST_LOG优先）
    pub log_level: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_path: String::from("resources/"),
            image_extension: String::from("png"),
            tick_period_ms: 1000,
            candidates: BTreeMap::new(),
            output_path: PathBuf::from("clock.html"),
            page_title: String::from("数字时钟"),
            log_level: String::from("info"),
        }
    }
}

impl ClockConfig {
    /// 从JSON文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded clock config from {}", path.display());
        Ok(config)
    }

    /// 解析JSON配置并校验
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(AppError::ConfigError(String::from(
                "tick_period_ms must be positive",
            )));
        }
        if self.image_extension.is_empty() {
            return Err(AppError::ConfigError(String::from(
                "image_extension must not be empty",
            )));
        }
        self.candidate_overrides().map(|_| ())
    }

    /// 将候选文件表的键解析为显示字符
    pub fn candidate_overrides(&self) -> Result<Vec<(DisplayCharacter, Vec<String>)>> {
        self.candidates
            .iter()
            .map(|(key, files)| {
                let mut chars = key.chars();
                let c = chars
                    .next()
                    .ok_or_else(|| AppError::ConfigError(String::from("empty candidate key")))?;
                if chars.next().is_some() {
                    return Err(AppError::ConfigError(format!(
                        "candidate key must be a single character: {key}"
                    )));
                }
                let character = DisplayCharacter::from_char(c).ok_or(AppError::InvalidCharacter(c))?;
                Ok((character, files.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ClockConfig::from_json("{}").unwrap();
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.base_path, "resources/");
        assert_eq!(config.tick_period_ms, 1000);
    }

    #[test]
    fn remote_base_path_is_kept_verbatim() {
        let config =
            ClockConfig::from_json(r#"{"base_path": "https://cdn.example.com/clock/"}"#).unwrap();
        assert_eq!(config.base_path, "https://cdn.example.com/clock/");
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = ClockConfig::from_json(r#"{"tick_period_ms": 0}"#).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn candidate_keys_must_be_display_characters() {
        let err = ClockConfig::from_json(r#"{"candidates": {"x": ["x-1.png"]}}"#).unwrap_err();
        assert_eq!(err, AppError::InvalidCharacter('x'));

        let err = ClockConfig::from_json(r#"{"candidates": {"12": []}}"#).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let config =
            ClockConfig::from_json(r#"{"candidates": {"十": ["a.png", "b.png"], "7": []}}"#)
                .unwrap();
        let overrides = config.candidate_overrides().unwrap();
        assert!(overrides.contains(&(DisplayCharacter::Ten, vec!["a.png".into(), "b.png".into()])));
        assert!(overrides.contains(&(DisplayCharacter::Digit(7), vec![])));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.json");
        std::fs::write(&path, r#"{"image_extension": "webp"}"#).unwrap();
        let config = ClockConfig::load(&path).unwrap();
        assert_eq!(config.image_extension, "webp");

        let missing = ClockConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, AppError::Io(_)));
    }
}
