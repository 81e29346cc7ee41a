//! 구역별 열손실 계산과 합계.
//!
//! 손실 [W] = 면적 × 높이 × 단열 계수 × (실내 목표 온도 − 기본 외기 온도).
//! 수동 입력이 켜져 있으면 입력 값이 공식 값을 대신한다.

use crate::state::{Project, Zone};

/// 수동 손실 입력을 해석한 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum ManualLoss {
    /// 빈 입력
    Unset,
    /// 숫자가 아니거나 음수/비유한 값. 원문을 보관한다.
    Invalid(String),
    /// 유효한 손실 [W]
    Valid(f64),
}

impl ManualLoss {
    /// 자유 입력 문자열을 관대하게 해석한다.
    ///
    /// 앞뒤 공백, 천 단위 구분 공백("2 000"), 소수점 쉼표("1500,5")를 허용한다.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ManualLoss::Unset;
        }
        let normalized: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => ManualLoss::Valid(v),
            _ => ManualLoss::Invalid(trimmed.to_string()),
        }
    }

    /// 손실 값 [W]. `Unset`/`Invalid`는 0으로 처리한다.
    pub fn watts(&self) -> f64 {
        match self {
            ManualLoss::Valid(v) => *v,
            ManualLoss::Unset | ManualLoss::Invalid(_) => 0.0,
        }
    }
}

/// 공식으로 구한 손실 [W]. 입력을 보정하지 않으므로 면적/높이가 0 이하이면 0 또는 음수가 된다.
pub fn formula_loss(zone: &Zone, base_temperature_c: f64) -> f64 {
    let delta_t = zone.ambient_temp - base_temperature_c;
    let volume_m3 = zone.surface * zone.height;
    volume_m3 * zone.isolation.coefficient() * delta_t
}

/// 수동 입력 우선 규칙을 적용한 구역 손실 [W].
pub fn compute_zone_loss(zone: &Zone, base_temperature_c: f64) -> f64 {
    if zone.manual_override {
        let manual = ManualLoss::parse(&zone.manual_loss);
        if let ManualLoss::Invalid(raw) = &manual {
            tracing::debug!(zone = zone.id, raw = raw.as_str(), "수동 손실 값 해석 실패, 0 W 처리");
        }
        manual.watts()
    } else {
        formula_loss(zone, base_temperature_c)
    }
}

/// 모든 구역의 `calculated_loss`를 현재 기본 온도로 다시 계산한다.
pub fn update_zones_losses(project: &mut Project, base_temperature_c: f64) {
    for zone in project.zones.iter_mut() {
        zone.calculated_loss = compute_zone_loss(zone, base_temperature_c);
    }
}

/// 구역 손실 합계 [W]. 재계산은 하지 않으므로 먼저 [`update_zones_losses`]를 호출해야 한다.
pub fn total_losses_w(project: &Project) -> f64 {
    project.zones.iter().map(|z| z.calculated_loss).sum()
}

/// 구역이 하나도 없으면 기본 구역을 하나 만든다.
pub fn ensure_zones_initialized(project: &mut Project) {
    if project.zones.is_empty() {
        project.add_zone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_loss_accepts_french_number_formats() {
        assert_eq!(ManualLoss::parse(" 2 000 "), ManualLoss::Valid(2000.0));
        assert_eq!(ManualLoss::parse("1500,5"), ManualLoss::Valid(1500.5));
        assert_eq!(ManualLoss::parse(""), ManualLoss::Unset);
        assert_eq!(ManualLoss::parse("   "), ManualLoss::Unset);
    }

    #[test]
    fn manual_loss_rejects_negative_and_garbage() {
        assert!(matches!(ManualLoss::parse("-5"), ManualLoss::Invalid(_)));
        assert!(matches!(ManualLoss::parse("abc"), ManualLoss::Invalid(_)));
        assert!(matches!(ManualLoss::parse("inf"), ManualLoss::Invalid(_)));
        assert!(matches!(ManualLoss::parse("NaN"), ManualLoss::Invalid(_)));
        assert_eq!(ManualLoss::parse("abc").watts(), 0.0);
    }
}
