use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_INSTALLER: &str = "main_menu.installer";
    pub const MAIN_MENU_BENEFICIARY: &str = "main_menu.beneficiary";
    pub const MAIN_MENU_ZONES: &str = "main_menu.zones";
    pub const MAIN_MENU_TECHNOLOGY: &str = "main_menu.technology";
    pub const MAIN_MENU_SUMMARY: &str = "main_menu.summary";
    pub const MAIN_MENU_SAVE: &str = "main_menu.save";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const MAIN_MENU_CONTINUE: &str = "main_menu.continue";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_KEEP_HINT: &str = "prompt.keep_hint";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const INSTALLER_HEADING: &str = "installer.heading";
    pub const PROMPT_COMPANY: &str = "prompt.company";
    pub const PROMPT_ADDRESS: &str = "prompt.address";
    pub const PROMPT_SIRET: &str = "prompt.siret";

    pub const BENEFICIARY_HEADING: &str = "beneficiary.heading";
    pub const PROMPT_FIRST_NAME: &str = "prompt.first_name";
    pub const PROMPT_LAST_NAME: &str = "prompt.last_name";
    pub const PROMPT_POSTAL_CODE: &str = "prompt.postal_code";
    pub const PROMPT_CITY: &str = "prompt.city";
    pub const PROMPT_CONSTRUCTION_YEAR: &str = "prompt.construction_year";
    pub const PROMPT_SEASIDE: &str = "prompt.seaside";
    pub const ALTITUDE_OPTIONS: &str = "beneficiary.altitude_options";
    pub const PROMPT_ALTITUDE_BAND: &str = "prompt.altitude_band";

    pub const ZONES_HEADING: &str = "zones.heading";
    pub const ZONES_OPTIONS: &str = "zones.options";
    pub const ZONES_EMPTY: &str = "zones.empty";
    pub const ZONE_NOT_FOUND: &str = "zones.not_found";
    pub const PROMPT_ZONE_ID: &str = "prompt.zone_id";
    pub const PROMPT_ZONE_NAME: &str = "prompt.zone_name";
    pub const PROMPT_SURFACE: &str = "prompt.surface";
    pub const PROMPT_HEIGHT: &str = "prompt.height";
    pub const ISOLATION_OPTIONS: &str = "zones.isolation_options";
    pub const PROMPT_ISOLATION: &str = "prompt.isolation";
    pub const PROMPT_AMBIENT_TEMP: &str = "prompt.ambient_temp";
    pub const PROMPT_MANUAL_OVERRIDE: &str = "prompt.manual_override";
    pub const PROMPT_MANUAL_LOSS: &str = "prompt.manual_loss";

    pub const TECHNOLOGY_HEADING: &str = "technology.heading";
    pub const TECHNOLOGY_TYPE_OPTIONS: &str = "technology.type_options";
    pub const PROMPT_HP_TYPE: &str = "prompt.hp_type";
    pub const PROMPT_MODEL: &str = "prompt.model";
    pub const PROMPT_SOURCE_TEMP: &str = "prompt.source_temp";
    pub const PROMPT_UNITS: &str = "prompt.units";
    pub const PROMPT_AIRFLOW: &str = "prompt.airflow";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const SUMMARY_BASE_TEMPERATURE: &str = "summary.base_temperature";
    pub const SUMMARY_SEASIDE: &str = "summary.seaside";
    pub const SUMMARY_ZONE_LINE: &str = "summary.zone_line";
    pub const SUMMARY_MANUAL_TAG: &str = "summary.manual_tag";
    pub const SUMMARY_TOTAL: &str = "summary.total";
    pub const SUMMARY_PER_UNIT: &str = "summary.per_unit";
    pub const SUMMARY_TECHNOLOGY: &str = "summary.technology";
    pub const SUMMARY_NO_TECHNOLOGY: &str = "summary.no_technology";

    pub const PROMPT_SAVE_PATH: &str = "prompt.save_path";
    pub const RESULT_SAVED: &str = "result.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Fr,
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::Fr
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(fr/en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 fr로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 프랑스어 순으로 찾는다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| fr(key)),
            Language::Ko => ko(key).unwrap_or_else(|| fr(key)),
            Language::Fr => fr(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key).to_string();
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "fr".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("fr") => Some("fr".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "fr" | "en" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn fr(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Erreur",
        APP_EXIT => "Fin du programme.",
        MAIN_MENU_TITLE => "\n=== Dimensionnement pompe à chaleur ===",
        MAIN_MENU_INSTALLER => "1) Installateur",
        MAIN_MENU_BENEFICIARY => "2) Bénéficiaire",
        MAIN_MENU_ZONES => "3) Zones / déperditions",
        MAIN_MENU_TECHNOLOGY => "4) Technologie",
        MAIN_MENU_SUMMARY => "5) Synthèse",
        MAIN_MENU_SAVE => "6) Enregistrer le projet",
        MAIN_MENU_EXIT => "0) Quitter",
        MAIN_MENU_CONTINUE => "Entrée) Continuer : {step}",
        PROMPT_MENU_SELECT => "Choix du menu : ",
        PROMPT_SELECT => "Choix : ",
        PROMPT_KEEP_HINT => "(Entrée pour conserver la valeur actuelle)",
        INVALID_SELECTION_RETRY => "Saisie invalide. Recommencez.",
        ERROR_INVALID_NUMBER => "Veuillez saisir un nombre.",
        INSTALLER_HEADING => "\n-- Installateur --",
        PROMPT_COMPANY => "Société : ",
        PROMPT_ADDRESS => "Adresse : ",
        PROMPT_SIRET => "SIRET : ",
        BENEFICIARY_HEADING => "\n-- Bénéficiaire --",
        PROMPT_FIRST_NAME => "Prénom : ",
        PROMPT_LAST_NAME => "Nom : ",
        PROMPT_POSTAL_CODE => "Code postal : ",
        PROMPT_CITY => "Ville : ",
        PROMPT_CONSTRUCTION_YEAR => "Année de construction : ",
        PROMPT_SEASIDE => "Bord de mer ? (o/n) : ",
        ALTITUDE_OPTIONS => "Tranches d'altitude (m) :",
        PROMPT_ALTITUDE_BAND => "Tranche d'altitude : ",
        ZONES_HEADING => "\n-- Zones --",
        ZONES_OPTIONS => "1) Ajouter  2) Modifier  3) Supprimer  0) Retour",
        ZONES_EMPTY => "Aucune zone.",
        ZONE_NOT_FOUND => "Zone introuvable.",
        PROMPT_ZONE_ID => "Numéro de zone : ",
        PROMPT_ZONE_NAME => "Nom de la zone : ",
        PROMPT_SURFACE => "Surface [m²] : ",
        PROMPT_HEIGHT => "Hauteur sous plafond [m] : ",
        ISOLATION_OPTIONS => "Niveaux d'isolation :",
        PROMPT_ISOLATION => "Isolation : ",
        PROMPT_AMBIENT_TEMP => "Température ambiante souhaitée [°C] : ",
        PROMPT_MANUAL_OVERRIDE => "Saisir la déperdition manuellement ? (o/n) : ",
        PROMPT_MANUAL_LOSS => "Déperdition manuelle [W] : ",
        TECHNOLOGY_HEADING => "\n-- Technologie --",
        TECHNOLOGY_TYPE_OPTIONS => "Types de PAC :",
        PROMPT_HP_TYPE => "Type : ",
        PROMPT_MODEL => "Modèle : ",
        PROMPT_SOURCE_TEMP => "Température de la source [°C] : ",
        PROMPT_UNITS => "Nombre d'unités : ",
        PROMPT_AIRFLOW => "Débit d'air [m³/h] (vide si sans objet) : ",
        SUMMARY_HEADING => "\n-- Synthèse --",
        SUMMARY_BASE_TEMPERATURE => "Température de base : {temp} °C (zone climatique {zone}, altitude {band})",
        SUMMARY_SEASIDE => "Bord de mer : température de base fixée à {temp} °C",
        SUMMARY_ZONE_LINE => "  #{id} {name} : {loss} W",
        SUMMARY_MANUAL_TAG => "(manuel)",
        SUMMARY_TOTAL => "Déperditions totales : {watts} W ({kw} kW)",
        SUMMARY_PER_UNIT => "Puissance par unité : {kw} kW pour {units} unité(s)",
        SUMMARY_TECHNOLOGY => "Technologie : {kind} {model}",
        SUMMARY_NO_TECHNOLOGY => "Technologie : non choisie",
        PROMPT_SAVE_PATH => "Fichier de destination : ",
        RESULT_SAVED => "Projet enregistré :",
        _ => "[traduction manquante]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Heat Pump Sizing ===",
        MAIN_MENU_INSTALLER => "1) Installer",
        MAIN_MENU_BENEFICIARY => "2) Beneficiary",
        MAIN_MENU_ZONES => "3) Zones / heat losses",
        MAIN_MENU_TECHNOLOGY => "4) Technology",
        MAIN_MENU_SUMMARY => "5) Summary",
        MAIN_MENU_SAVE => "6) Save project",
        MAIN_MENU_EXIT => "0) Exit",
        MAIN_MENU_CONTINUE => "Enter) Continue: {step}",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_KEEP_HINT => "(press Enter to keep the current value)",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        INSTALLER_HEADING => "\n-- Installer --",
        PROMPT_COMPANY => "Company: ",
        PROMPT_ADDRESS => "Address: ",
        PROMPT_SIRET => "SIRET: ",
        BENEFICIARY_HEADING => "\n-- Beneficiary --",
        PROMPT_FIRST_NAME => "First name: ",
        PROMPT_LAST_NAME => "Last name: ",
        PROMPT_POSTAL_CODE => "Postal code: ",
        PROMPT_CITY => "City: ",
        PROMPT_CONSTRUCTION_YEAR => "Construction year: ",
        PROMPT_SEASIDE => "Seaside? (y/n): ",
        ALTITUDE_OPTIONS => "Altitude bands (m):",
        PROMPT_ALTITUDE_BAND => "Altitude band: ",
        ZONES_HEADING => "\n-- Zones --",
        ZONES_OPTIONS => "1) Add  2) Edit  3) Remove  0) Back",
        ZONES_EMPTY => "No zones.",
        ZONE_NOT_FOUND => "Zone not found.",
        PROMPT_ZONE_ID => "Zone number: ",
        PROMPT_ZONE_NAME => "Zone name: ",
        PROMPT_SURFACE => "Floor area [m²]: ",
        PROMPT_HEIGHT => "Ceiling height [m]: ",
        ISOLATION_OPTIONS => "Insulation levels:",
        PROMPT_ISOLATION => "Insulation: ",
        PROMPT_AMBIENT_TEMP => "Target indoor temperature [°C]: ",
        PROMPT_MANUAL_OVERRIDE => "Enter heat loss manually? (y/n): ",
        PROMPT_MANUAL_LOSS => "Manual heat loss [W]: ",
        TECHNOLOGY_HEADING => "\n-- Technology --",
        TECHNOLOGY_TYPE_OPTIONS => "Heat pump types:",
        PROMPT_HP_TYPE => "Type: ",
        PROMPT_MODEL => "Model: ",
        PROMPT_SOURCE_TEMP => "Source temperature [°C]: ",
        PROMPT_UNITS => "Number of units: ",
        PROMPT_AIRFLOW => "Airflow [m³/h] (blank if not applicable): ",
        SUMMARY_HEADING => "\n-- Summary --",
        SUMMARY_BASE_TEMPERATURE => "Base temperature: {temp} °C (climate zone {zone}, altitude {band})",
        SUMMARY_SEASIDE => "Seaside: base temperature fixed at {temp} °C",
        SUMMARY_ZONE_LINE => "  #{id} {name}: {loss} W",
        SUMMARY_MANUAL_TAG => "(manual)",
        SUMMARY_TOTAL => "Total heat loss: {watts} W ({kw} kW)",
        SUMMARY_PER_UNIT => "Power per unit: {kw} kW for {units} unit(s)",
        SUMMARY_TECHNOLOGY => "Technology: {kind} {model}",
        SUMMARY_NO_TECHNOLOGY => "Technology: not selected",
        PROMPT_SAVE_PATH => "Destination file: ",
        RESULT_SAVED => "Project saved:",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 히트펌프 용량 산정 ===",
        MAIN_MENU_INSTALLER => "1) 설치 업체",
        MAIN_MENU_BENEFICIARY => "2) 수혜자",
        MAIN_MENU_ZONES => "3) 구역 / 열손실",
        MAIN_MENU_TECHNOLOGY => "4) 설비",
        MAIN_MENU_SUMMARY => "5) 요약",
        MAIN_MENU_SAVE => "6) 프로젝트 저장",
        MAIN_MENU_EXIT => "0) 종료",
        MAIN_MENU_CONTINUE => "엔터) 이어서 진행: {step}",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_KEEP_HINT => "(엔터를 누르면 현재 값을 유지)",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        INSTALLER_HEADING => "\n-- 설치 업체 --",
        PROMPT_COMPANY => "회사명: ",
        PROMPT_ADDRESS => "주소: ",
        BENEFICIARY_HEADING => "\n-- 수혜자 --",
        PROMPT_FIRST_NAME => "이름: ",
        PROMPT_LAST_NAME => "성: ",
        PROMPT_POSTAL_CODE => "우편번호: ",
        PROMPT_CITY => "도시: ",
        PROMPT_CONSTRUCTION_YEAR => "준공 연도: ",
        PROMPT_SEASIDE => "해안 지역? (y/n): ",
        ALTITUDE_OPTIONS => "고도 구간 (m):",
        PROMPT_ALTITUDE_BAND => "고도 구간: ",
        ZONES_HEADING => "\n-- 구역 --",
        ZONES_OPTIONS => "1) 추가  2) 수정  3) 삭제  0) 뒤로",
        ZONES_EMPTY => "구역이 없습니다.",
        ZONE_NOT_FOUND => "구역을 찾을 수 없습니다.",
        PROMPT_ZONE_ID => "구역 번호: ",
        PROMPT_ZONE_NAME => "구역 이름: ",
        PROMPT_SURFACE => "바닥 면적 [m²]: ",
        PROMPT_HEIGHT => "천장 높이 [m]: ",
        ISOLATION_OPTIONS => "단열 등급:",
        PROMPT_ISOLATION => "단열: ",
        PROMPT_AMBIENT_TEMP => "목표 실내 온도 [°C]: ",
        PROMPT_MANUAL_OVERRIDE => "열손실을 직접 입력? (y/n): ",
        PROMPT_MANUAL_LOSS => "수동 열손실 [W]: ",
        TECHNOLOGY_HEADING => "\n-- 설비 --",
        TECHNOLOGY_TYPE_OPTIONS => "히트펌프 방식:",
        PROMPT_HP_TYPE => "방식: ",
        PROMPT_MODEL => "모델: ",
        PROMPT_SOURCE_TEMP => "열원 온도 [°C]: ",
        PROMPT_UNITS => "대수: ",
        PROMPT_AIRFLOW => "풍량 [m³/h] (해당 없으면 빈칸): ",
        SUMMARY_HEADING => "\n-- 요약 --",
        SUMMARY_BASE_TEMPERATURE => "기본 외기 온도: {temp} °C (기후 구역 {zone}, 고도 {band})",
        SUMMARY_SEASIDE => "해안 지역: 기본 외기 온도 {temp} °C 고정",
        SUMMARY_ZONE_LINE => "  #{id} {name}: {loss} W",
        SUMMARY_MANUAL_TAG => "(수동)",
        SUMMARY_TOTAL => "총 열손실: {watts} W ({kw} kW)",
        SUMMARY_PER_UNIT => "대당 용량: {kw} kW × {units}대",
        SUMMARY_TECHNOLOGY => "설비: {kind} {model}",
        SUMMARY_NO_TECHNOLOGY => "설비: 미선택",
        PROMPT_SAVE_PATH => "저장할 파일: ",
        RESULT_SAVED => "프로젝트 저장 완료:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_french() {
        let tr = Translator::new("de");
        assert_eq!(tr.language(), Language::Fr);
        assert_eq!(tr.t(keys::ERROR_PREFIX), "Erreur");
    }

    #[test]
    fn korean_missing_key_uses_french_text() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t(keys::PROMPT_SIRET), "SIRET : ");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(
            keys::SUMMARY_TOTAL,
            &[("watts", "1350".into()), ("kw", "1.35".into())],
        );
        assert_eq!(s, "Total heat loss: 1350 W (1.35 kW)");
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let map = parse_toml_to_map("[general]\nerror_prefix = \"Oups\"\n").expect("pack");
        let tr = Translator {
            lang: Language::Fr,
            overrides: Some(map),
        };
        assert_eq!(tr.t(keys::ERROR_PREFIX), "Oups");
        assert_eq!(tr.t(keys::APP_EXIT), "Fin du programme.");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("en-GB", Some("ko")), "en");
        assert_eq!(resolve_language("auto", Some("ko")), "ko");
    }
}
