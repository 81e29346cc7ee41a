use serde::{Deserialize, Serialize};

/// 단열 등급. 폼 선택지 문자열과 1:1로 대응하며, 알 수 없는 값은 `Unknown`으로 받는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IsolationClass {
    #[default]
    Re2020,
    Rt2012,
    Rt2005,
    Good,
    Average,
    Weak,
    Uninsulated,
    /// 비어 있거나 목록에 없는 값. 보수적인 계수를 쓴다.
    Unknown,
}

impl IsolationClass {
    /// 선택 가능한 등급(Unknown 제외), 좋은 단열부터.
    pub const SELECTABLE: [IsolationClass; 7] = [
        IsolationClass::Re2020,
        IsolationClass::Rt2012,
        IsolationClass::Rt2005,
        IsolationClass::Good,
        IsolationClass::Average,
        IsolationClass::Weak,
        IsolationClass::Uninsulated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IsolationClass::Re2020 => "Isolation norme RE2020",
            IsolationClass::Rt2012 => "Isolation norme RT2012",
            IsolationClass::Rt2005 => "Isolation norme RT2005",
            IsolationClass::Good => "Bonne isolation",
            IsolationClass::Average => "Isolation moyenne",
            IsolationClass::Weak => "Faible isolation",
            IsolationClass::Uninsulated => "Aucune isolation",
            IsolationClass::Unknown => "",
        }
    }

    /// 체적 열손실 계수 [W/m³·K].
    pub fn coefficient(self) -> f64 {
        match self {
            IsolationClass::Re2020 => 0.4,
            IsolationClass::Rt2012 => 0.6,
            IsolationClass::Rt2005 => 0.75,
            IsolationClass::Good => 0.9,
            IsolationClass::Average => 1.2,
            IsolationClass::Weak => 1.5,
            IsolationClass::Uninsulated | IsolationClass::Unknown => 1.8,
        }
    }

    /// 라벨 문자열을 해석한다. 대소문자와 앞뒤 공백은 무시한다.
    pub fn parse_lenient(label: &str) -> Self {
        let label = label.trim();
        Self::SELECTABLE
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| {
                tracing::debug!(label, "알 수 없는 단열 등급, 보수적 계수 적용");
                IsolationClass::Unknown
            })
    }
}

impl From<String> for IsolationClass {
    fn from(value: String) -> Self {
        IsolationClass::parse_lenient(&value)
    }
}

impl From<IsolationClass> for String {
    fn from(value: IsolationClass) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for IsolationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsolationClass::Unknown => f.write_str("?"),
            other => f.write_str(other.label()),
        }
    }
}
