use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{AppError, Summary};
use crate::i18n::{keys, Translator};
use crate::state::{
    Beneficiary, HeatPumpType, Installer, Project, TechnologySelection, WizardStep, Zone,
    ZoneDefaults,
};
use crate::tables::{AltitudeBand, IsolationClass};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Installer,
    Beneficiary,
    Zones,
    Technology,
    Summary,
    Save,
    Exit,
}

impl MenuChoice {
    /// 메뉴에 대응하는 마법사 단계.
    pub fn step(self) -> Option<WizardStep> {
        match self {
            MenuChoice::Installer => Some(WizardStep::Installer),
            MenuChoice::Beneficiary => Some(WizardStep::Beneficiary),
            MenuChoice::Zones => Some(WizardStep::Project),
            MenuChoice::Technology => Some(WizardStep::Technology),
            MenuChoice::Summary => Some(WizardStep::Summary),
            MenuChoice::Save | MenuChoice::Exit => None,
        }
    }

    /// 마법사 단계에 대응하는 메뉴.
    pub fn for_step(step: WizardStep) -> Self {
        match step {
            WizardStep::Installer => MenuChoice::Installer,
            WizardStep::Beneficiary => MenuChoice::Beneficiary,
            WizardStep::Project => MenuChoice::Zones,
            WizardStep::Technology => MenuChoice::Technology,
            WizardStep::Summary => MenuChoice::Summary,
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            MenuChoice::Installer => keys::MAIN_MENU_INSTALLER,
            MenuChoice::Beneficiary => keys::MAIN_MENU_BENEFICIARY,
            MenuChoice::Zones => keys::MAIN_MENU_ZONES,
            MenuChoice::Technology => keys::MAIN_MENU_TECHNOLOGY,
            MenuChoice::Summary => keys::MAIN_MENU_SUMMARY,
            MenuChoice::Save => keys::MAIN_MENU_SAVE,
            MenuChoice::Exit => keys::MAIN_MENU_EXIT,
        }
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
///
/// 빈 입력은 현재 단계를 이어서 진행한다. 입력이 끝나면(EOF) 종료로 처리한다.
pub fn main_menu(
    tr: &Translator,
    input: &mut dyn BufRead,
    current: WizardStep,
) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for choice in [
        MenuChoice::Installer,
        MenuChoice::Beneficiary,
        MenuChoice::Zones,
        MenuChoice::Technology,
        MenuChoice::Summary,
        MenuChoice::Save,
        MenuChoice::Exit,
    ] {
        println!("{}", tr.t(choice.label_key()));
    }
    let resume = MenuChoice::for_step(current);
    println!(
        "{}",
        tr.fill(
            keys::MAIN_MENU_CONTINUE,
            &[("step", tr.t(resume.label_key()).to_string())]
        )
    );
    loop {
        let sel = match read_line(input, tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("입력 종료, 메뉴를 닫는다");
                return Ok(MenuChoice::Exit);
            }
            Err(err) => return Err(err),
        };
        match sel.trim() {
            "" => return Ok(resume),
            "1" => return Ok(MenuChoice::Installer),
            "2" => return Ok(MenuChoice::Beneficiary),
            "3" => return Ok(MenuChoice::Zones),
            "4" => return Ok(MenuChoice::Technology),
            "5" => return Ok(MenuChoice::Summary),
            "6" => return Ok(MenuChoice::Save),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설치 업체 입력을 처리한다.
pub fn handle_installer(
    tr: &Translator,
    input: &mut dyn BufRead,
    installer: &mut Installer,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::INSTALLER_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    installer.company = read_text_or(input, tr.t(keys::PROMPT_COMPANY), &installer.company)?;
    installer.address = read_text_or(input, tr.t(keys::PROMPT_ADDRESS), &installer.address)?;
    installer.siret = read_text_or(input, tr.t(keys::PROMPT_SIRET), &installer.siret)?;
    Ok(())
}

/// 수혜자 입력을 처리한다. 기본 온도는 여기서 건드리지 않고 갱신 사이클에 맡긴다.
pub fn handle_beneficiary(
    tr: &Translator,
    input: &mut dyn BufRead,
    b: &mut Beneficiary,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BENEFICIARY_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    b.first_name = read_text_or(input, tr.t(keys::PROMPT_FIRST_NAME), &b.first_name)?;
    b.last_name = read_text_or(input, tr.t(keys::PROMPT_LAST_NAME), &b.last_name)?;
    b.address = read_text_or(input, tr.t(keys::PROMPT_ADDRESS), &b.address)?;
    b.postal_code = read_text_or(input, tr.t(keys::PROMPT_POSTAL_CODE), &b.postal_code)?;
    b.city = read_text_or(input, tr.t(keys::PROMPT_CITY), &b.city)?;
    b.construction_year =
        read_text_or(input, tr.t(keys::PROMPT_CONSTRUCTION_YEAR), &b.construction_year)?;
    b.seaside = read_bool_or(input, tr.t(keys::PROMPT_SEASIDE), b.seaside)?;
    b.altitude_band = read_altitude_band(tr, input, b.altitude_band)?;
    Ok(())
}

/// 구역 추가/수정/삭제 메뉴를 처리한다.
pub fn handle_zones(
    tr: &Translator,
    input: &mut dyn BufRead,
    project: &mut Project,
    defaults: ZoneDefaults,
) -> Result<(), AppError> {
    loop {
        println!("{}", tr.t(keys::ZONES_HEADING));
        if project.zones.is_empty() {
            println!("{}", tr.t(keys::ZONES_EMPTY));
        }
        for z in &project.zones {
            println!(
                "  #{} {} : {:.1} m² × {:.2} m, {}, {:.1} °C",
                z.id, z.name, z.surface, z.height, z.isolation, z.ambient_temp
            );
        }
        println!("{}", tr.t(keys::ZONES_OPTIONS));
        let sel = read_line(input, tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                let zone = project.add_zone_with(defaults);
                edit_zone(tr, input, zone)?;
            }
            "2" => {
                let id = read_u32(tr, input, tr.t(keys::PROMPT_ZONE_ID))?;
                match project.zone_mut(id) {
                    Some(zone) => edit_zone(tr, input, zone)?,
                    None => println!("{}", tr.t(keys::ZONE_NOT_FOUND)),
                }
            }
            "3" => {
                let id = read_u32(tr, input, tr.t(keys::PROMPT_ZONE_ID))?;
                if !project.remove_zone(id) {
                    println!("{}", tr.t(keys::ZONE_NOT_FOUND));
                }
            }
            "0" | "" => return Ok(()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn edit_zone(tr: &Translator, input: &mut dyn BufRead, zone: &mut Zone) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    zone.name = read_text_or(input, tr.t(keys::PROMPT_ZONE_NAME), &zone.name)?;
    zone.surface = read_f64_or(tr, input, tr.t(keys::PROMPT_SURFACE), zone.surface)?;
    zone.height = read_f64_or(tr, input, tr.t(keys::PROMPT_HEIGHT), zone.height)?;
    zone.isolation = read_isolation(tr, input, zone.isolation)?;
    zone.ambient_temp = read_f64_or(tr, input, tr.t(keys::PROMPT_AMBIENT_TEMP), zone.ambient_temp)?;
    zone.manual_override = read_bool_or(input, tr.t(keys::PROMPT_MANUAL_OVERRIDE), zone.manual_override)?;
    if zone.manual_override {
        // 자유 입력 그대로 보관하고 해석은 손실 계산 시에 한다.
        zone.manual_loss = read_text_or(input, tr.t(keys::PROMPT_MANUAL_LOSS), &zone.manual_loss)?;
    }
    Ok(())
}

/// 설비 선택을 처리한다.
pub fn handle_technology(
    tr: &Translator,
    input: &mut dyn BufRead,
    tech: &mut TechnologySelection,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TECHNOLOGY_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    println!("{}", tr.t(keys::TECHNOLOGY_TYPE_OPTIONS));
    for (i, kind) in HeatPumpType::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, kind.label());
    }
    let sel = read_line(input, tr.t(keys::PROMPT_HP_TYPE))?;
    if let Some(kind) = pick(sel.trim(), &HeatPumpType::ALL) {
        tech.kind = Some(kind);
    }
    let model = read_text_or(input, tr.t(keys::PROMPT_MODEL), tech.model.as_deref().unwrap_or(""))?;
    tech.model = (!model.is_empty()).then_some(model);
    tech.source_temperature =
        read_text_or(input, tr.t(keys::PROMPT_SOURCE_TEMP), &tech.source_temperature)?;
    tech.units = read_u32_or(tr, input, tr.t(keys::PROMPT_UNITS), tech.units)?;
    let airflow = read_line(input, tr.t(keys::PROMPT_AIRFLOW))?;
    let airflow = airflow.trim();
    if !airflow.is_empty() {
        tech.airflow = airflow.replace(',', ".").parse::<f64>().ok();
    }
    Ok(())
}

/// 저장 경로를 입력받는다.
pub fn handle_save_path(tr: &Translator, input: &mut dyn BufRead) -> Result<PathBuf, AppError> {
    let path = read_text_or(input, tr.t(keys::PROMPT_SAVE_PATH), "project.toml")?;
    Ok(PathBuf::from(path))
}

/// 계산 요약을 출력한다.
pub fn print_summary(tr: &Translator, summary: &Summary) {
    println!("{}", tr.t(keys::SUMMARY_HEADING));
    if summary.seaside {
        println!(
            "{}",
            tr.fill(
                keys::SUMMARY_SEASIDE,
                &[("temp", format!("{:.0}", summary.base_temperature_c))]
            )
        );
    } else {
        println!(
            "{}",
            tr.fill(
                keys::SUMMARY_BASE_TEMPERATURE,
                &[
                    ("temp", format!("{:.0}", summary.base_temperature_c)),
                    ("zone", summary.climate_zone.to_string()),
                    ("band", summary.altitude_band.to_string()),
                ]
            )
        );
    }
    for z in &summary.zones {
        let mut line = tr.fill(
            keys::SUMMARY_ZONE_LINE,
            &[
                ("id", z.id.to_string()),
                ("name", z.name.clone()),
                ("loss", format!("{:.0}", z.loss_w)),
            ],
        );
        if z.manual {
            line.push(' ');
            line.push_str(tr.t(keys::SUMMARY_MANUAL_TAG));
        }
        println!("{line}");
    }
    println!(
        "{}",
        tr.fill(
            keys::SUMMARY_TOTAL,
            &[
                ("watts", format!("{:.0}", summary.total_w)),
                ("kw", format!("{:.2}", summary.total_kw())),
            ]
        )
    );
    match summary.technology {
        Some(kind) => {
            println!(
                "{}",
                tr.fill(
                    keys::SUMMARY_TECHNOLOGY,
                    &[
                        ("kind", kind.label().to_string()),
                        ("model", summary.model.clone().unwrap_or_default()),
                    ]
                )
            );
            println!(
                "{}",
                tr.fill(
                    keys::SUMMARY_PER_UNIT,
                    &[
                        ("kw", format!("{:.2}", summary.per_unit_kw())),
                        ("units", summary.units.to_string()),
                    ]
                )
            );
        }
        None => println!("{}", tr.t(keys::SUMMARY_NO_TECHNOLOGY)),
    }
}

fn read_altitude_band(
    tr: &Translator,
    input: &mut dyn BufRead,
    current: AltitudeBand,
) -> Result<AltitudeBand, AppError> {
    println!("{}", tr.t(keys::ALTITUDE_OPTIONS));
    for (i, band) in AltitudeBand::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, band);
    }
    let sel = read_line(input, tr.t(keys::PROMPT_ALTITUDE_BAND))?;
    Ok(pick(sel.trim(), &AltitudeBand::ALL).unwrap_or(current))
}

fn read_isolation(
    tr: &Translator,
    input: &mut dyn BufRead,
    current: IsolationClass,
) -> Result<IsolationClass, AppError> {
    println!("{}", tr.t(keys::ISOLATION_OPTIONS));
    for (i, class) in IsolationClass::SELECTABLE.iter().enumerate() {
        println!("  {}) {}", i + 1, class);
    }
    let sel = read_line(input, tr.t(keys::PROMPT_ISOLATION))?;
    Ok(pick(sel.trim(), &IsolationClass::SELECTABLE).unwrap_or(current))
}

/// 1부터 시작하는 번호로 목록에서 고른다.
fn pick<T: Copy>(sel: &str, options: &[T]) -> Option<T> {
    let n = sel.parse::<usize>().ok()?;
    options.get(n.checked_sub(1)?).copied()
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `UnexpectedEof` 오류를 낸다.
fn read_line(input: &mut dyn BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_text_or(input: &mut dyn BufRead, prompt: &str, current: &str) -> Result<String, AppError> {
    let shown = if current.is_empty() {
        prompt.to_string()
    } else {
        format!("{prompt}[{current}] ")
    };
    let s = read_line(input, &shown)?;
    let s = s.trim();
    Ok(if s.is_empty() { current.to_string() } else { s.to_string() })
}

fn read_bool_or(input: &mut dyn BufRead, prompt: &str, current: bool) -> Result<bool, AppError> {
    let s = read_line(input, prompt)?;
    Ok(match s.trim().to_lowercase().as_str() {
        "o" | "oui" | "y" | "yes" | "1" => true,
        "n" | "non" | "no" | "0" => false,
        _ => current,
    })
}

fn read_f64_or(
    tr: &Translator,
    input: &mut dyn BufRead,
    prompt: &str,
    current: f64,
) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, &format!("{prompt}[{current}] "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32(tr: &Translator, input: &mut dyn BufRead, prompt: &str) -> Result<u32, AppError> {
    loop {
        let s = read_line(input, prompt)?;
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32_or(
    tr: &Translator,
    input: &mut dyn BufRead,
    prompt: &str,
    current: u32,
) -> Result<u32, AppError> {
    loop {
        let s = read_line(input, &format!("{prompt}[{current}] "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn closed_input_is_end_of_file_error() {
        let err = read_line(&mut io::empty(), "").expect_err("eof");
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn number_prompts_stop_at_end_of_input() {
        let tr = Translator::new("en");
        let mut input = Cursor::new("abc\n");
        assert!(read_u32(&tr, &mut input, "").is_err());
        let mut input = Cursor::new("x\n");
        assert!(read_f64_or(&tr, &mut input, "", 1.0).is_err());
        let mut input = Cursor::new("");
        assert!(read_u32_or(&tr, &mut input, "", 1).is_err());
    }

    #[test]
    fn menu_exits_when_input_is_closed() {
        let tr = Translator::new("en");
        let mut input = Cursor::new("9\n");
        let choice = main_menu(&tr, &mut input, WizardStep::Installer).expect("menu");
        assert_eq!(choice, MenuChoice::Exit);
    }

    #[test]
    fn blank_menu_entry_resumes_current_step() {
        let tr = Translator::new("en");
        let mut input = Cursor::new("\n");
        let choice = main_menu(&tr, &mut input, WizardStep::Technology).expect("menu");
        assert_eq!(choice, MenuChoice::Technology);
        assert_eq!(MenuChoice::for_step(WizardStep::Project), MenuChoice::Zones);
    }
}
