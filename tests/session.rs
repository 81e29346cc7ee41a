//! 입력을 흘려 넣은 대화형 세션 테스트.
use std::io::{self, Cursor};

use heat_pump_sizing::app::run_with_input;
use heat_pump_sizing::config;
use heat_pump_sizing::i18n::Translator;
use heat_pump_sizing::state::{AppState, WizardStep};
use tempfile::tempdir;

#[test]
fn closed_input_ends_session() {
    let dir = tempdir().expect("tempdir");
    let mut cfg = config::load_or_default_at(dir.path().join("config.toml")).expect("config");
    let mut state = AppState::default();
    run_with_input(&mut state, &mut cfg, &Translator::new("en"), &mut io::empty())
        .expect("session ends on eof");
    assert_eq!(state.project.zones.len(), 1);
}

#[test]
fn failed_save_keeps_session_running() {
    let dir = tempdir().expect("tempdir");
    let mut cfg = config::load_or_default_at(dir.path().join("config.toml")).expect("config");
    let mut state = AppState::default();
    let bad = dir.path().join("missing").join("p.toml");
    let good = dir.path().join("p.toml");
    let script = format!("6\n{}\n6\n{}\n0\n", bad.display(), good.display());

    run_with_input(&mut state, &mut cfg, &Translator::new("en"), &mut Cursor::new(script))
        .expect("session survives a failed save");
    assert!(!bad.exists());
    assert!(good.exists());
}

#[test]
fn exit_keeps_unreadable_config_intact() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let original = "language = \"en\"\n[climate.postal_overrides]\n\"974\" = \"A\"\nbroken line\n";
    std::fs::write(&path, original).expect("write config");

    let mut cfg = config::load_or_fallback(&path);
    let mut state = AppState::default();
    run_with_input(&mut state, &mut cfg, &Translator::new("en"), &mut Cursor::new("0\n"))
        .expect("session");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), original);
}

#[test]
fn finished_form_advances_wizard_step() {
    let dir = tempdir().expect("tempdir");
    let mut cfg = config::load_or_default_at(dir.path().join("config.toml")).expect("config");
    let mut state = AppState::default();
    // 설치 업체 항목 세 개를 그대로 두고 종료한다.
    run_with_input(
        &mut state,
        &mut cfg,
        &Translator::new("en"),
        &mut Cursor::new("\n\n\n\n0\n"),
    )
    .expect("session");
    assert_eq!(state.step, WizardStep::Beneficiary);
}
