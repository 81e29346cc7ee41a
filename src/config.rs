use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::base_temperature::BaseTemperatureResolver;
use crate::state::ZoneDefaults;
use crate::tables::{ClimateTable, ClimateZone};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 내장 기후 테이블에 얹을 추가 데이터.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// 우편번호 접두어(2~3자리) → 기후 구역 문자. 예: `"974" = "A"`
    pub postal_overrides: BTreeMap<String, ClimateZone>,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/fr/en/ko)
    pub language: String,
    /// 새 구역 기본값
    pub defaults: ZoneDefaults,
    pub climate: ClimateConfig,
    #[serde(skip)]
    path: Option<PathBuf>,
    /// 읽지 못한 파일을 대신하는 설정이면 저장하지 않는다.
    #[serde(skip)]
    read_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            defaults: ZoneDefaults::default(),
            climate: ClimateConfig::default(),
            path: None,
            read_only: false,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(DEFAULT_CONFIG_PATH)
}

/// 지정한 경로에서 설정을 로드한다. 파일이 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default_at(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "설정 로드");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

/// 설정을 로드하고, 실패하면 경고를 남기고 기본값을 쓴다.
///
/// 대체된 설정은 원래 경로를 기억하지만 [`Config::save`]로 그 파일을 덮어쓰지 않는다.
pub fn load_or_fallback(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    match load_or_default_at(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "설정을 읽지 못해 기본값 사용");
            Config {
                path: Some(path.to_path_buf()),
                read_only: true,
                ..Config::default()
            }
        }
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(없으면 config.toml)에 저장한다.
    /// 읽기에 실패해 대체된 설정이면 아무것도 쓰지 않는다.
    pub fn save(&self) -> Result<(), ConfigError> {
        if self.read_only {
            tracing::warn!(path = ?self.path, "읽지 못한 설정 파일은 덮어쓰지 않음");
            return Ok(());
        }
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    /// 설정의 추가 접두어를 반영한 기본 온도 계산기.
    pub fn resolver(&self) -> BaseTemperatureResolver {
        let table = ClimateTable::with_overrides(
            self.climate
                .postal_overrides
                .iter()
                .map(|(k, v)| (k.as_str(), *v)),
        );
        BaseTemperatureResolver::new(table)
    }
}
