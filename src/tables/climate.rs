use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::altitude::AltitudeBand;

/// 프랑스 본토 기본 외기 온도 구역(A~I).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClimateZone {
    A,
    B,
    C,
    /// 파리권. 매핑되지 않은 우편번호의 기본 구역이기도 하다.
    #[default]
    D,
    E,
    F,
    G,
    H,
    I,
}

/// 구역별, 고도 구간별 기본 외기 온도 [°C]. 열 순서는 [`AltitudeBand::ALL`]과 같다.
const BASE_TEMPERATURES_C: [[f64; 10]; 9] = [
    [-2.0, -3.0, -4.0, -5.0, -6.0, -7.0, -8.0, -9.0, -10.0, -11.0],
    [-4.0, -5.0, -6.0, -7.0, -8.0, -9.0, -10.0, -11.0, -12.0, -13.0],
    [-5.0, -6.0, -7.0, -8.0, -9.0, -10.0, -11.0, -12.0, -13.0, -14.0],
    [-7.0, -8.0, -9.0, -11.0, -13.0, -14.0, -15.0, -17.0, -19.0, -21.0],
    [-8.0, -9.0, -11.0, -13.0, -15.0, -17.0, -19.0, -21.0, -23.0, -25.0],
    [-9.0, -10.0, -11.0, -12.0, -13.0, -14.0, -15.0, -16.0, -17.0, -18.0],
    [-10.0, -11.0, -13.0, -14.0, -17.0, -19.0, -21.0, -23.0, -24.0, -25.0],
    [-12.0, -13.0, -15.0, -17.0, -19.0, -21.0, -23.0, -24.0, -25.0, -27.0],
    [-15.0, -15.0, -19.0, -21.0, -23.0, -24.0, -25.0, -27.0, -29.0, -31.0],
];

impl ClimateZone {
    pub const ALL: [ClimateZone; 9] = [
        ClimateZone::A,
        ClimateZone::B,
        ClimateZone::C,
        ClimateZone::D,
        ClimateZone::E,
        ClimateZone::F,
        ClimateZone::G,
        ClimateZone::H,
        ClimateZone::I,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            ClimateZone::A => "A",
            ClimateZone::B => "B",
            ClimateZone::C => "C",
            ClimateZone::D => "D",
            ClimateZone::E => "E",
            ClimateZone::F => "F",
            ClimateZone::G => "G",
            ClimateZone::H => "H",
            ClimateZone::I => "I",
        }
    }

    fn row(self) -> usize {
        match self {
            ClimateZone::A => 0,
            ClimateZone::B => 1,
            ClimateZone::C => 2,
            ClimateZone::D => 3,
            ClimateZone::E => 4,
            ClimateZone::F => 5,
            ClimateZone::G => 6,
            ClimateZone::H => 7,
            ClimateZone::I => 8,
        }
    }

    /// (구역, 고도 구간) 두 키로 기본 외기 온도를 바로 조회한다.
    pub fn base_temperature_c(self, band: AltitudeBand) -> f64 {
        BASE_TEMPERATURES_C[self.row()][band.index()]
    }

    /// 구역 문자(대소문자 무시)를 해석한다. 알 수 없으면 `None`.
    pub fn from_letter(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|z| z.letter().eq_ignore_ascii_case(s))
    }
}

impl From<String> for ClimateZone {
    fn from(value: String) -> Self {
        ClimateZone::from_letter(&value).unwrap_or_default()
    }
}

impl From<ClimateZone> for String {
    fn from(value: ClimateZone) -> Self {
        value.letter().to_string()
    }
}

impl std::fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// 도(département) 번호 → 기후 구역. 참고용 근사치이며 현장 기준으로 검증해야 한다.
const DEPARTMENTS: &[(&str, ClimateZone)] = &[
    ("01", ClimateZone::G),
    ("02", ClimateZone::E),
    ("03", ClimateZone::G),
    ("04", ClimateZone::E),
    ("05", ClimateZone::H),
    ("06", ClimateZone::A),
    ("07", ClimateZone::E),
    ("08", ClimateZone::G),
    ("09", ClimateZone::C),
    ("10", ClimateZone::G),
    ("11", ClimateZone::C),
    ("12", ClimateZone::E),
    ("13", ClimateZone::C),
    ("14", ClimateZone::D),
    ("15", ClimateZone::H),
    ("16", ClimateZone::C),
    ("17", ClimateZone::C),
    ("18", ClimateZone::E),
    ("19", ClimateZone::E),
    ("20", ClimateZone::A),
    ("21", ClimateZone::G),
    ("22", ClimateZone::B),
    ("23", ClimateZone::E),
    ("24", ClimateZone::C),
    ("25", ClimateZone::H),
    ("26", ClimateZone::E),
    ("27", ClimateZone::D),
    ("28", ClimateZone::D),
    ("29", ClimateZone::B),
    ("30", ClimateZone::C),
    ("31", ClimateZone::C),
    ("32", ClimateZone::C),
    ("33", ClimateZone::C),
    ("34", ClimateZone::C),
    ("35", ClimateZone::C),
    ("36", ClimateZone::E),
    ("37", ClimateZone::D),
    ("38", ClimateZone::G),
    ("39", ClimateZone::H),
    ("40", ClimateZone::C),
    ("41", ClimateZone::D),
    ("42", ClimateZone::G),
    ("43", ClimateZone::H),
    ("44", ClimateZone::C),
    ("45", ClimateZone::D),
    ("46", ClimateZone::C),
    ("47", ClimateZone::C),
    ("48", ClimateZone::H),
    ("49", ClimateZone::C),
    ("50", ClimateZone::B),
    ("51", ClimateZone::G),
    ("52", ClimateZone::H),
    ("53", ClimateZone::D),
    ("54", ClimateZone::H),
    ("55", ClimateZone::H),
    ("56", ClimateZone::B),
    ("57", ClimateZone::H),
    ("58", ClimateZone::G),
    ("59", ClimateZone::E),
    ("60", ClimateZone::E),
    ("61", ClimateZone::D),
    ("62", ClimateZone::E),
    ("63", ClimateZone::G),
    ("64", ClimateZone::C),
    ("65", ClimateZone::C),
    ("66", ClimateZone::C),
    ("67", ClimateZone::H),
    ("68", ClimateZone::H),
    ("69", ClimateZone::G),
    ("70", ClimateZone::H),
    ("71", ClimateZone::G),
    ("72", ClimateZone::D),
    ("73", ClimateZone::H),
    ("74", ClimateZone::H),
    ("75", ClimateZone::D),
    ("76", ClimateZone::D),
    ("77", ClimateZone::D),
    ("78", ClimateZone::D),
    ("79", ClimateZone::C),
    ("80", ClimateZone::E),
    ("81", ClimateZone::C),
    ("82", ClimateZone::C),
    ("83", ClimateZone::C),
    ("84", ClimateZone::C),
    ("85", ClimateZone::C),
    ("86", ClimateZone::C),
    ("87", ClimateZone::E),
    ("88", ClimateZone::H),
    ("89", ClimateZone::G),
    ("90", ClimateZone::H),
    ("91", ClimateZone::D),
    ("92", ClimateZone::D),
    ("93", ClimateZone::D),
    ("94", ClimateZone::D),
    ("95", ClimateZone::D),
];

/// 우편번호 접두어로 기후 구역을 찾는 테이블.
///
/// 내장 도 번호 매핑 위에 설정에서 읽은 접두어(2~3자리)를 덮어쓸 수 있다.
/// 접두어가 여러 개 맞으면 가장 긴 쪽이 우선한다.
#[derive(Debug, Clone, Default)]
pub struct ClimateTable {
    overrides: HashMap<String, ClimateZone>,
}

impl ClimateTable {
    /// 추가 접두어 매핑을 얹은 테이블. 키의 공백은 제거한다.
    pub fn with_overrides<I, S>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, ClimateZone)>,
        S: AsRef<str>,
    {
        let overrides = overrides
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_string(), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { overrides }
    }

    /// 우편번호에서 기후 구역을 찾는다. 실패하면 기본 구역(D)을 돌려준다.
    pub fn zone_for_postal_code(&self, postal_code: &str) -> ClimateZone {
        let code = postal_code.trim();
        if let Some(zone) = self.lookup_override(code) {
            return zone;
        }
        let department = code.get(..2).filter(|d| d.bytes().all(|b| b.is_ascii_digit()));
        let found = department.and_then(|d| {
            DEPARTMENTS
                .iter()
                .find(|(prefix, _)| *prefix == d)
                .map(|(_, zone)| *zone)
        });
        match found {
            Some(zone) => zone,
            None => {
                if !code.is_empty() {
                    tracing::debug!(postal_code = code, "매핑되지 않은 우편번호, 기본 구역 사용");
                }
                ClimateZone::default()
            }
        }
    }

    fn lookup_override(&self, code: &str) -> Option<ClimateZone> {
        self.overrides
            .iter()
            .filter(|(prefix, _)| code.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, zone)| *zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_table_has_no_duplicates() {
        for (i, (a, _)) in DEPARTMENTS.iter().enumerate() {
            assert!(
                DEPARTMENTS[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate prefix {a}"
            );
        }
    }

    #[test]
    fn corsica_maps_to_mildest_zone() {
        let table = ClimateTable::default();
        assert_eq!(table.zone_for_postal_code("20000"), ClimateZone::A);
        assert_eq!(table.zone_for_postal_code("20200"), ClimateZone::A);
    }

    #[test]
    fn longest_override_prefix_wins() {
        let table = ClimateTable::with_overrides([("38", ClimateZone::D), ("384", ClimateZone::I)]);
        assert_eq!(table.zone_for_postal_code("38000"), ClimateZone::D);
        assert_eq!(table.zone_for_postal_code("38470"), ClimateZone::I);
    }
}
