//! 기본 외기 온도 테이블 회귀 테스트.
use heat_pump_sizing::base_temperature::{BaseTemperatureResolver, SEASIDE_BASE_TEMPERATURE_C};
use heat_pump_sizing::compute_base_temperature;
use heat_pump_sizing::state::Beneficiary;
use heat_pump_sizing::tables::{AltitudeBand, ClimateTable, ClimateZone};
use rstest::rstest;

fn beneficiary(postal_code: &str, band: &str, seaside: bool) -> Beneficiary {
    Beneficiary {
        postal_code: postal_code.to_string(),
        altitude_band: AltitudeBand::parse_lenient(band),
        seaside,
        ..Beneficiary::default()
    }
}

#[test]
fn grenoble_at_altitude() {
    let b = beneficiary("38000", "1201-1400", false);
    assert_eq!(compute_base_temperature(&b), -21.0);
}

#[test]
fn seaside_overrides_altitude() {
    let b = beneficiary("38000", "1801-2000", true);
    assert_eq!(compute_base_temperature(&b), -2.0);
}

#[rstest]
#[case("75001", "0-200")]
#[case("38000", "1801-2000")]
#[case("67000", "1401-1600")]
#[case("", "")]
#[case("xx", "9999")]
#[case("20090", "601-800")]
fn seaside_is_always_minus_two(#[case] postal_code: &str, #[case] band: &str) {
    let b = beneficiary(postal_code, band, true);
    assert_eq!(compute_base_temperature(&b), SEASIDE_BASE_TEMPERATURE_C);
}

#[rstest]
#[case("0-200", -10.0)]
#[case("201-400", -11.0)]
#[case("401-600", -13.0)]
#[case("601-800", -14.0)]
#[case("801-1000", -17.0)]
#[case("1001-1200", -19.0)]
#[case("1201-1400", -21.0)]
#[case("1401-1600", -23.0)]
#[case("1601-1800", -24.0)]
#[case("1801-2000", -25.0)]
fn isere_row_is_cumulative(#[case] band: &str, #[case] expected: f64) {
    let b = beneficiary("38100", band, false);
    assert_eq!(compute_base_temperature(&b), expected);
}

#[test]
fn paris_is_default_zone_at_sea_level() {
    let b = beneficiary("75001", "0-200", false);
    assert_eq!(compute_base_temperature(&b), -7.0);
    let resolver = BaseTemperatureResolver::default();
    assert_eq!(resolver.climate_zone("75001"), ClimateZone::default());
}

#[rstest]
#[case("")]
#[case("7")]
#[case("AB123")]
#[case("97400")]
#[case("  ")]
fn malformed_postal_codes_degrade_to_default_zone(#[case] postal_code: &str) {
    let b = beneficiary(postal_code, "0-200", false);
    assert_eq!(
        compute_base_temperature(&b),
        ClimateZone::default().base_temperature_c(AltitudeBand::Band0To200)
    );
}

#[test]
fn missing_altitude_band_uses_lowest() {
    let b = beneficiary("38000", "", false);
    assert_eq!(b.altitude_band, AltitudeBand::Band0To200);
    assert_eq!(compute_base_temperature(&b), -10.0);
}

#[test]
fn altitude_never_warms_the_site() {
    for zone in ClimateZone::ALL {
        for pair in AltitudeBand::ALL.windows(2) {
            assert!(
                zone.base_temperature_c(pair[1]) <= zone.base_temperature_c(pair[0]),
                "zone {zone} {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn configured_prefix_overrides_builtin_department() {
    let resolver =
        BaseTemperatureResolver::new(ClimateTable::with_overrides([("974", ClimateZone::A)]));
    let b = beneficiary("97400", "0-200", false);
    assert_eq!(resolver.resolve(&b), -2.0);
    // 내장 매핑은 그대로
    assert_eq!(resolver.resolve(&beneficiary("38000", "1201-1400", false)), -21.0);
}

#[test]
fn refresh_writes_back_into_beneficiary() {
    let mut b = beneficiary("38000", "1201-1400", false);
    assert!(b.base_temperature.is_none());
    let t = b.refresh_base_temperature(&BaseTemperatureResolver::default());
    assert_eq!(t, -21.0);
    assert_eq!(b.base_temperature, Some(-21.0));

    b.seaside = true;
    b.refresh_base_temperature(&BaseTemperatureResolver::default());
    assert_eq!(b.base_temperature, Some(-2.0));
}
