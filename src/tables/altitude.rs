use serde::{Deserialize, Serialize};

/// 고도 구간(m). 폼에서 선택하는 고정 범위 목록이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AltitudeBand {
    #[default]
    Band0To200,
    Band201To400,
    Band401To600,
    Band601To800,
    Band801To1000,
    Band1001To1200,
    Band1201To1400,
    Band1401To1600,
    Band1601To1800,
    Band1801To2000,
}

impl AltitudeBand {
    /// 낮은 고도부터 순서대로 나열한 전체 구간.
    pub const ALL: [AltitudeBand; 10] = [
        AltitudeBand::Band0To200,
        AltitudeBand::Band201To400,
        AltitudeBand::Band401To600,
        AltitudeBand::Band601To800,
        AltitudeBand::Band801To1000,
        AltitudeBand::Band1001To1200,
        AltitudeBand::Band1201To1400,
        AltitudeBand::Band1401To1600,
        AltitudeBand::Band1601To1800,
        AltitudeBand::Band1801To2000,
    ];

    /// 폼에 표시되는 구간 문자열.
    pub fn label(self) -> &'static str {
        match self {
            AltitudeBand::Band0To200 => "0-200",
            AltitudeBand::Band201To400 => "201-400",
            AltitudeBand::Band401To600 => "401-600",
            AltitudeBand::Band601To800 => "601-800",
            AltitudeBand::Band801To1000 => "801-1000",
            AltitudeBand::Band1001To1200 => "1001-1200",
            AltitudeBand::Band1201To1400 => "1201-1400",
            AltitudeBand::Band1401To1600 => "1401-1600",
            AltitudeBand::Band1601To1800 => "1601-1800",
            AltitudeBand::Band1801To2000 => "1801-2000",
        }
    }

    /// 온도 테이블의 열 인덱스(0 = 최저 구간).
    pub fn index(self) -> usize {
        match self {
            AltitudeBand::Band0To200 => 0,
            AltitudeBand::Band201To400 => 1,
            AltitudeBand::Band401To600 => 2,
            AltitudeBand::Band601To800 => 3,
            AltitudeBand::Band801To1000 => 4,
            AltitudeBand::Band1001To1200 => 5,
            AltitudeBand::Band1201To1400 => 6,
            AltitudeBand::Band1401To1600 => 7,
            AltitudeBand::Band1601To1800 => 8,
            AltitudeBand::Band1801To2000 => 9,
        }
    }

    /// 구간 문자열을 해석한다. 비어 있거나 알 수 없는 값은 최저 구간으로 처리한다.
    pub fn parse_lenient(label: &str) -> Self {
        let wanted: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        match Self::ALL.iter().find(|band| band.label() == wanted) {
            Some(band) => *band,
            None => {
                if !wanted.is_empty() {
                    tracing::debug!(label, "알 수 없는 고도 구간, 0-200 으로 대체");
                }
                AltitudeBand::default()
            }
        }
    }
}

impl From<String> for AltitudeBand {
    fn from(value: String) -> Self {
        AltitudeBand::parse_lenient(&value)
    }
}

impl From<AltitudeBand> for String {
    fn from(value: AltitudeBand) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for AltitudeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, band) in AltitudeBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }
}
