use std::path::PathBuf;

use clap::Parser;
use heat_pump_sizing::{app, config, i18n, state::AppState};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CliArgs {
    /// 계산할 프로젝트 TOML 파일. 없으면 대화형으로 입력한다.
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// 파일을 읽은 뒤에도 대화형 메뉴로 들어간다.
    #[arg(long, default_value_t = false)]
    interactive: bool,
    /// auto/fr/en/ko
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let args = CliArgs::parse();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{err}");
    }

    let mut cfg = config::load_or_fallback(&args.config);
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);

    if let Err(err) = try_run(&args, &mut cfg, &tr) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(
    args: &CliArgs,
    cfg: &mut config::Config,
    tr: &i18n::Translator,
) -> Result<(), app::AppError> {
    let mut state = match &args.input {
        Some(path) => app::load_project(path)?,
        None => AppState::default(),
    };
    if args.input.is_some() && !args.interactive {
        app::run_batch(&mut state, cfg, tr);
        return Ok(());
    }
    app::run(&mut state, cfg, tr)
}
