use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::sensitivity::{break_even, linspace, parameter};

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 터미널 표
    #[default]
    Table,
    /// 직렬화된 JSON (외부 보고서 도구용)
    Json,
}

/// 손익분기 배율 범위 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenDefaults {
    pub min_factor: f64,
    pub max_factor: f64,
    pub samples: usize,
}

impl Default for BreakEvenDefaults {
    fn default() -> Self {
        Self {
            min_factor: break_even::DEFAULT_MIN_FACTOR,
            max_factor: break_even::DEFAULT_MAX_FACTOR,
            samples: break_even::DEFAULT_BREAK_EVEN_SAMPLES,
        }
    }
}

impl BreakEvenDefaults {
    pub fn factors(&self) -> Vec<f64> {
        linspace(self.min_factor, self.max_factor, self.samples)
    }
}

/// 민감도 분석 범위 기본값 (현재값 대비 비율).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityDefaults {
    pub low_ratio: f64,
    pub high_ratio: f64,
    pub samples: usize,
}

impl Default for SensitivityDefaults {
    fn default() -> Self {
        Self {
            low_ratio: parameter::DEFAULT_LOW_RATIO,
            high_ratio: parameter::DEFAULT_HIGH_RATIO,
            samples: parameter::DEFAULT_SENSITIVITY_SAMPLES,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en/de)
    pub language: String,
    /// 언어팩 디렉터리 (없으면 locales/ 후 내장 문자열)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    pub output: OutputFormat,
    pub break_even: BreakEvenDefaults,
    pub sensitivity: SensitivityDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            output: OutputFormat::Table,
            break_even: BreakEvenDefaults::default(),
            sensitivity: SensitivityDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

const CONFIG_FILE: &str = "config.toml";

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

/// 지정한 경로의 설정 파일을 읽는다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}
