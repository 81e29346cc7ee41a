//! 마법사 폼의 상태 묶음. UI(호출 측)가 소유하고, 엔진 함수는 빌려서 읽고 파생 값만 쓴다.

use serde::{Deserialize, Serialize};

use crate::base_temperature::BaseTemperatureResolver;
use crate::tables::{AltitudeBand, IsolationClass};

/// 마법사 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Installer,
    Beneficiary,
    Project,
    Technology,
    Summary,
}

impl WizardStep {
    const ORDER: [WizardStep; 5] = [
        WizardStep::Installer,
        WizardStep::Beneficiary,
        WizardStep::Project,
        WizardStep::Technology,
        WizardStep::Summary,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// 다음 단계. 마지막 단계에서는 그대로 머문다.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1).min(Self::ORDER.len() - 1)]
    }
}

/// 설치 업체 정보.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Installer {
    pub company: String,
    pub address: String,
    pub siret: String,
}

/// 수혜자(건물주) 정보와 위치 입력.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Beneficiary {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// 우편번호(보통 5자리). 작성 중인 값도 그대로 받는다.
    pub postal_code: String,
    pub city: String,
    pub construction_year: String,
    /// 해안 지역 여부. 참이면 기본 온도가 -2 °C로 고정된다.
    pub seaside: bool,
    pub altitude_band: AltitudeBand,
    /// 파생 값 [°C]. 계산 전에는 `None`이며 직접 편집하지 않는다.
    pub base_temperature: Option<f64>,
}

impl Beneficiary {
    /// 현재 위치 입력으로 기본 온도를 다시 계산해 기록하고 그 값을 돌려준다.
    pub fn refresh_base_temperature(&mut self, resolver: &BaseTemperatureResolver) -> f64 {
        let t = resolver.resolve(self);
        self.base_temperature = Some(t);
        t
    }
}

/// 방/구역 하나. 기하, 단열 등급, 목표 실내 온도로 손실을 산정한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    /// 바닥 면적 [m²]
    pub surface: f64,
    /// 천장 높이 [m]
    pub height: f64,
    pub isolation: IsolationClass,
    /// 목표 실내 온도 [°C]
    pub ambient_temp: f64,
    pub manual_override: bool,
    /// 수동 손실 값 [W]. 자유 입력 문자열이며 `manual_override`일 때만 쓴다.
    pub manual_loss: String,
    /// 파생 값 [W].
    pub calculated_loss: f64,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            surface: 0.0,
            height: 0.0,
            isolation: IsolationClass::default(),
            ambient_temp: 20.0,
            manual_override: false,
            manual_loss: String::new(),
            calculated_loss: 0.0,
        }
    }
}

/// 새 구역을 만들 때 쓰는 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDefaults {
    pub isolation: IsolationClass,
    pub ambient_temp_c: f64,
}

impl Default for ZoneDefaults {
    fn default() -> Self {
        let zone = Zone::default();
        Self {
            isolation: zone.isolation,
            ambient_temp_c: zone.ambient_temp,
        }
    }
}

/// 구역 목록을 보유한다. 순서는 표시 순서일 뿐 합계에는 영향이 없다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    next_zone_id: u32,
    pub zones: Vec<Zone>,
}

impl Project {
    /// 주어진 기본값으로 구역을 추가하고 그 구역을 돌려준다.
    pub fn add_zone_with(&mut self, defaults: ZoneDefaults) -> &mut Zone {
        let id = self.allocate_id();
        self.zones.push(Zone {
            id,
            name: format!("Zone {}", self.zones.len() + 1),
            isolation: defaults.isolation,
            ambient_temp: defaults.ambient_temp_c,
            ..Zone::default()
        });
        let last = self.zones.len() - 1;
        &mut self.zones[last]
    }

    /// 문서화된 기본값으로 구역을 추가한다.
    pub fn add_zone(&mut self) -> &mut Zone {
        self.add_zone_with(ZoneDefaults::default())
    }

    /// id로 구역을 제거한다. 제거했으면 true.
    pub fn remove_zone(&mut self, id: u32) -> bool {
        let before = self.zones.len();
        self.zones.retain(|z| z.id != id);
        self.zones.len() != before
    }

    pub fn zone_mut(&mut self, id: u32) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    fn allocate_id(&mut self) -> u32 {
        // 파일에서 읽은 구역과 겹치지 않게 한다.
        let max_existing = self
            .zones
            .iter()
            .map(|z| z.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut id = self.next_zone_id.max(max_existing);
        if self.zones.iter().any(|z| z.id == id) {
            // 번호가 u32 끝에 닿으면 비어 있는 가장 작은 번호를 쓴다.
            id = (0..=u32::MAX)
                .find(|candidate| self.zones.iter().all(|z| z.id != *candidate))
                .unwrap_or(id);
        }
        self.next_zone_id = id.saturating_add(1);
        id
    }
}

/// 히트펌프 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatPumpType {
    AirWater,
    AirAir,
    GroundWater,
    WaterWater,
    Hybrid,
}

impl HeatPumpType {
    pub const ALL: [HeatPumpType; 5] = [
        HeatPumpType::AirWater,
        HeatPumpType::AirAir,
        HeatPumpType::GroundWater,
        HeatPumpType::WaterWater,
        HeatPumpType::Hybrid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HeatPumpType::AirWater => "PAC air/eau",
            HeatPumpType::AirAir => "PAC air/air",
            HeatPumpType::GroundWater => "PAC géothermique sol/eau",
            HeatPumpType::WaterWater => "PAC eau/eau",
            HeatPumpType::Hybrid => "PAC hybride",
        }
    }
}

/// 선택한 설비. 총 손실과 용량을 비교하는 사이징 로직의 입력이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologySelection {
    #[serde(rename = "type")]
    pub kind: Option<HeatPumpType>,
    pub model: Option<String>,
    /// 열원 온도 [°C]. 폼 입력 그대로의 문자열.
    pub source_temperature: String,
    pub units: u32,
    /// 풍량 [m³/h]
    pub airflow: Option<f64>,
}

impl Default for TechnologySelection {
    fn default() -> Self {
        Self {
            kind: None,
            model: None,
            source_temperature: "0".to_string(),
            units: 1,
            airflow: None,
        }
    }
}

/// 세션 전체 상태. 시작 시 한 번 기본값으로 만들고 제자리에서 갱신한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub step: WizardStep,
    pub installer: Installer,
    pub beneficiary: Beneficiary,
    pub project: Project,
    pub technology: TechnologySelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_step_advances_and_stops_at_summary() {
        assert_eq!(WizardStep::Installer.next(), WizardStep::Beneficiary);
        assert_eq!(WizardStep::Project.next(), WizardStep::Technology);
        assert_eq!(WizardStep::Summary.next(), WizardStep::Summary);
    }

    #[test]
    fn zone_id_at_u32_limit_does_not_overflow() {
        let mut project = Project::default();
        project.zones.push(Zone {
            id: u32::MAX,
            ..Zone::default()
        });
        let first = project.add_zone().id;
        let second = project.add_zone().id;
        assert_ne!(first, u32::MAX);
        assert_ne!(second, u32::MAX);
        assert_ne!(first, second);
    }

    #[test]
    fn zone_ids_stay_unique_after_removal() {
        let mut project = Project::default();
        let a = project.add_zone().id;
        let b = project.add_zone().id;
        assert!(project.remove_zone(a));
        let c = project.add_zone().id;
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert!(!project.remove_zone(a));
    }

    #[test]
    fn default_state_matches_fresh_session() {
        let state = AppState::default();
        assert_eq!(state.beneficiary.altitude_band, AltitudeBand::Band0To200);
        assert!(state.beneficiary.base_temperature.is_none());
        assert!(state.project.zones.is_empty());
        assert_eq!(state.technology.units, 1);
        assert_eq!(state.technology.source_temperature, "0");
    }
}
