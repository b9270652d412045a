use clap::Parser;
use machine_cost_toolbox::{app, cli::Args, config, i18n};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청한 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if let Err(err) = try_run(&args) {
        let tr = i18n::Translator::new(&i18n::resolve_language(&args.lang, None));
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    app::run(&cfg, args, &tr)?;
    Ok(())
}
