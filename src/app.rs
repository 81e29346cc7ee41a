use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use crate::base_temperature::BaseTemperatureResolver;
use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::state::{AppState, HeatPumpType};
use crate::tables::{AltitudeBand, ClimateZone};
use crate::ui_cli::{self, MenuChoice};
use crate::zone_loss;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("프로젝트 파일 파싱 오류: {0}")]
    ProjectParse(#[from] toml::de::Error),
    #[error("프로젝트 파일 직렬화 오류: {0}")]
    ProjectSerialize(#[from] toml::ser::Error),
}

/// 화면에 표시할 구역 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLine {
    pub id: u32,
    pub name: String,
    pub loss_w: f64,
    pub manual: bool,
}

/// 갱신 사이클 이후의 결과 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub base_temperature_c: f64,
    pub climate_zone: ClimateZone,
    pub altitude_band: AltitudeBand,
    pub seaside: bool,
    pub zones: Vec<ZoneLine>,
    pub total_w: f64,
    pub units: u32,
    pub technology: Option<HeatPumpType>,
    pub model: Option<String>,
}

impl Summary {
    pub fn total_kw(&self) -> f64 {
        self.total_w / 1000.0
    }

    /// 대당 부하 [kW]. 대수가 0이면 전체 부하를 그대로 돌려준다.
    pub fn per_unit_kw(&self) -> f64 {
        self.total_kw() / f64::from(self.units.max(1))
    }
}

/// 입력이 바뀔 때 호출하는 갱신 사이클.
///
/// 기본 온도 계산 → 수혜자에 기록 → 모든 구역 손실 재계산 → 합계 순서를 지킨다.
pub fn recompute(state: &mut AppState, resolver: &BaseTemperatureResolver) -> f64 {
    let base = state.beneficiary.refresh_base_temperature(resolver);
    zone_loss::update_zones_losses(&mut state.project, base);
    let total = zone_loss::total_losses_w(&state.project);
    tracing::info!(
        base_temperature_c = base,
        zones = state.project.zones.len(),
        total_w = total,
        "열손실 재계산"
    );
    total
}

/// 이미 갱신된 상태로부터 요약을 만든다. 재계산은 하지 않는다.
pub fn summarize(state: &AppState, resolver: &BaseTemperatureResolver) -> Summary {
    let beneficiary = &state.beneficiary;
    Summary {
        base_temperature_c: beneficiary
            .base_temperature
            .unwrap_or_else(|| resolver.resolve(beneficiary)),
        climate_zone: resolver.climate_zone(&beneficiary.postal_code),
        altitude_band: beneficiary.altitude_band,
        seaside: beneficiary.seaside,
        zones: state
            .project
            .zones
            .iter()
            .map(|z| ZoneLine {
                id: z.id,
                name: z.name.clone(),
                loss_w: z.calculated_loss,
                manual: z.manual_override,
            })
            .collect(),
        total_w: zone_loss::total_losses_w(&state.project),
        units: state.technology.units,
        technology: state.technology.kind,
        model: state.technology.model.clone(),
    }
}

/// TOML 프로젝트 파일을 읽는다.
pub fn load_project(path: impl AsRef<Path>) -> Result<AppState, AppError> {
    let content = fs::read_to_string(path.as_ref())?;
    let state: AppState = toml::from_str(&content)?;
    tracing::debug!(path = %path.as_ref().display(), zones = state.project.zones.len(), "프로젝트 로드");
    Ok(state)
}

/// 상태를 TOML 프로젝트 파일로 저장한다.
pub fn save_project(state: &AppState, path: impl AsRef<Path>) -> Result<(), AppError> {
    let content = toml::to_string_pretty(state)?;
    fs::write(path.as_ref(), content)?;
    Ok(())
}

/// 파일로 받은 프로젝트를 계산해 요약만 출력한다.
pub fn run_batch(state: &mut AppState, config: &Config, tr: &Translator) {
    let resolver = config.resolver();
    zone_loss::ensure_zones_initialized(&mut state.project);
    recompute(state, &resolver);
    ui_cli::print_summary(tr, &summarize(state, &resolver));
}

/// CLI 애플리케이션의 메인 루프를 표준 입력으로 실행한다.
pub fn run(state: &mut AppState, config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    run_with_input(state, config, tr, &mut stdin.lock())
}

/// 주어진 입력에서 메뉴 선택을 읽어 대화형 세션을 진행한다.
///
/// 폼 단계를 마치면 마법사 단계가 다음으로 넘어간다. 저장 실패는 세션을 끝내지 않는다.
pub fn run_with_input(
    state: &mut AppState,
    config: &mut Config,
    tr: &Translator,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    let resolver = config.resolver();
    zone_loss::ensure_zones_initialized(&mut state.project);
    recompute(state, &resolver);
    loop {
        let choice = ui_cli::main_menu(tr, input, state.step)?;
        match choice {
            MenuChoice::Installer => ui_cli::handle_installer(tr, input, &mut state.installer)?,
            MenuChoice::Beneficiary => {
                ui_cli::handle_beneficiary(tr, input, &mut state.beneficiary)?
            }
            MenuChoice::Zones => {
                ui_cli::handle_zones(tr, input, &mut state.project, config.defaults)?
            }
            MenuChoice::Technology => {
                ui_cli::handle_technology(tr, input, &mut state.technology)?
            }
            MenuChoice::Summary => {}
            MenuChoice::Save => {
                let path = ui_cli::handle_save_path(tr, input)?;
                match save_project(state, &path) {
                    Ok(()) => println!("{} {}", tr.t(i18n::keys::RESULT_SAVED), path.display()),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "프로젝트 저장 실패");
                        println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
                    }
                }
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
        if let Some(step) = choice.step() {
            state.step = step.next();
        }
        recompute(state, &resolver);
        ui_cli::print_summary(tr, &summarize(state, &resolver));
    }
    Ok(())
}
