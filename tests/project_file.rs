//! 프로젝트 파일/설정 파일을 거친 갱신 사이클 테스트.
use approx::assert_abs_diff_eq;
use heat_pump_sizing::app::{self, load_project, recompute, save_project, summarize};
use heat_pump_sizing::config::{self, Config};
use heat_pump_sizing::state::{AppState, HeatPumpType, WizardStep};
use heat_pump_sizing::tables::{AltitudeBand, ClimateZone, IsolationClass};
use tempfile::tempdir;

const PROJECT: &str = r#"
step = "Project"

[installer]
company = "Chauffage Dupont"

[beneficiary]
last_name = "Martin"
postal_code = "75001"
altitude_band = "0-200"
seaside = false

[[project.zones]]
id = 0
name = "Séjour"
surface = 50.0
height = 2.5
isolation = "Isolation norme RE2020"
ambient_temp = 20.0

[[project.zones]]
id = 1
name = "Chambre"
surface = 12.0
height = 2.5
isolation = "isolation inconnue"
ambient_temp = 18.0
manual_override = true
manual_loss = "1 200,5"

[technology]
type = "air-water"
model = "X-200"
units = 2
"#;

#[test]
fn project_file_runs_through_update_cycle() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("project.toml");
    std::fs::write(&path, PROJECT).expect("write project");

    let mut state = load_project(&path).expect("load project");
    assert_eq!(state.step, WizardStep::Project);
    assert_eq!(state.project.zones[1].isolation, IsolationClass::Unknown);
    assert!(state.beneficiary.base_temperature.is_none());

    let resolver = Config::default().resolver();
    let total = recompute(&mut state, &resolver);
    assert_eq!(state.beneficiary.base_temperature, Some(-7.0));
    assert_abs_diff_eq!(total, 1350.0 + 1200.5, epsilon = 1e-6);

    let summary = summarize(&state, &resolver);
    assert_eq!(summary.climate_zone, ClimateZone::D);
    assert_eq!(summary.technology, Some(HeatPumpType::AirWater));
    assert!(summary.zones[1].manual);
    assert_abs_diff_eq!(summary.per_unit_kw(), 1.27525, epsilon = 1e-9);
}

#[test]
fn saved_project_reloads_identically() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("saved.toml");

    let mut state: AppState = toml::from_str(PROJECT).expect("parse");
    recompute(&mut state, &Config::default().resolver());
    save_project(&state, &path).expect("save");
    let reloaded = load_project(&path).expect("reload");
    assert_eq!(reloaded, state);
}

#[test]
fn added_zone_after_load_gets_fresh_id() {
    let mut state: AppState = toml::from_str(PROJECT).expect("parse");
    let id = state.project.add_zone().id;
    assert!(id > 1);
}

#[test]
fn bad_project_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[[project.zones]\nsurface = ").expect("write");
    assert!(matches!(load_project(&path), Err(app::AppError::ProjectParse(_))));
    assert!(matches!(
        load_project(dir.path().join("missing.toml")),
        Err(app::AppError::Io(_))
    ));
}

#[test]
fn config_is_created_then_reloaded_with_overrides() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");

    let mut cfg = config::load_or_default_at(&path).expect("create default");
    assert!(path.exists());
    assert_eq!(cfg.language, "auto");
    assert_eq!(cfg.defaults.ambient_temp_c, 20.0);

    cfg.language = "en".into();
    cfg.defaults.isolation = IsolationClass::Rt2005;
    cfg.climate
        .postal_overrides
        .insert("974".into(), ClimateZone::A);
    cfg.save().expect("save");

    let reloaded = config::load_or_default_at(&path).expect("reload");
    assert_eq!(reloaded.language, "en");
    assert_eq!(reloaded.defaults.isolation, IsolationClass::Rt2005);

    let mut state = AppState::default();
    state.beneficiary.postal_code = "97410".into();
    state.beneficiary.altitude_band = AltitudeBand::Band0To200;
    recompute(&mut state, &reloaded.resolver());
    assert_eq!(state.beneficiary.base_temperature, Some(-2.0));

    let zone = state.project.add_zone_with(reloaded.defaults);
    assert_eq!(zone.isolation, IsolationClass::Rt2005);
}

#[test]
fn malformed_config_is_never_overwritten() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let original = "language = \"en\"\n[climate.postal_overrides]\n\"974\" = \"A\"\nbroken line\n";
    std::fs::write(&path, original).expect("write config");

    assert!(config::load_or_default_at(&path).is_err());
    let cfg = config::load_or_fallback(&path);
    assert_eq!(cfg.language, "auto");
    cfg.save().expect("save is skipped");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), original);
}
