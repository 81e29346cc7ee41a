use crate::state::Beneficiary;
use crate::tables::{ClimateTable, ClimateZone};

/// 해안 지역의 기본 외기 온도 [°C]. 구역/고도와 무관하게 우선한다.
pub const SEASIDE_BASE_TEMPERATURE_C: f64 = -2.0;

/// 위치 입력(우편번호, 고도 구간, 해안 여부)으로 기본 외기 온도를 구한다.
#[derive(Debug, Clone, Default)]
pub struct BaseTemperatureResolver {
    table: ClimateTable,
}

impl BaseTemperatureResolver {
    pub fn new(table: ClimateTable) -> Self {
        Self { table }
    }

    /// 우편번호 접두어로 기후 구역을 찾는다.
    pub fn climate_zone(&self, postal_code: &str) -> ClimateZone {
        self.table.zone_for_postal_code(postal_code)
    }

    /// 기본 외기 온도 [°C]를 계산한다. 순수 함수이며 실패하지 않는다.
    ///
    /// 1. 우편번호 → 기후 구역 (매핑 실패 시 기본 구역)
    /// 2. (구역, 고도 구간) → 누적 보정된 온도
    /// 3. 해안이면 -2 °C로 고정
    pub fn resolve(&self, beneficiary: &Beneficiary) -> f64 {
        if beneficiary.seaside {
            return SEASIDE_BASE_TEMPERATURE_C;
        }
        let zone = self.climate_zone(&beneficiary.postal_code);
        zone.base_temperature_c(beneficiary.altitude_band)
    }
}

/// 내장 테이블로 기본 외기 온도를 계산한다.
pub fn compute_base_temperature(beneficiary: &Beneficiary) -> f64 {
    BaseTemperatureResolver::default().resolve(beneficiary)
}
