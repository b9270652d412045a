use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::analyze;
use crate::cli::{Args, BreakEvenArgs, Command, SensitivityArgs};
use crate::config::{Config, ConfigError, OutputFormat};
use crate::i18n::{keys, Translator};
use crate::machine::{compute_rates, hourly_rate_breakdown};
use crate::program::CostingError;
use crate::scenario::{Scenario, ScenarioError};
use crate::sensitivity::{break_even_curve, linspace, sensitivity_curve, BreakEvenCurve};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 시나리오 파일 오류
    #[error("시나리오 오류: {0}")]
    Scenario(#[from] ScenarioError),
    /// 생산 프로그램 입력 오류
    #[error("원가 계산 오류: {0}")]
    Costing(#[from] CostingError),
    /// JSON 출력 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 손익분기 JSON 출력 형식.
#[derive(Serialize)]
struct BreakEvenOutput<'a> {
    current_units: f64,
    #[serde(flatten)]
    curve: &'a BreakEvenCurve,
}

fn wants_json(config: &Config, args: &Args) -> bool {
    args.json || config.output == OutputFormat::Json
}

/// `--scenario`가 있으면 파일을, 없으면 기본 예제를 쓴다.
pub fn load_scenario(args: &Args) -> Result<Scenario, ScenarioError> {
    match &args.scenario {
        Some(path) => {
            info!(path = %path.display(), "loading scenario");
            Scenario::load(path)
        }
        None => Ok(Scenario::default()),
    }
}

/// 하위 명령 하나를 실행한다.
pub fn run(config: &Config, args: &Args, tr: &Translator) -> Result<(), AppError> {
    let json = wants_json(config, args);
    match args.command() {
        Command::Init { path } => {
            Scenario::default().save(&path)?;
            println!(
                "{}",
                tr.fill(keys::SCENARIO_WRITTEN, &[("path", path.display().to_string())])
            );
        }
        Command::Report => {
            let scenario = load_scenario(args)?;
            let report = analyze(&scenario, &config.break_even.factors())?;
            if json {
                ui_cli::print_json(&report)?;
            } else {
                ui_cli::print_report(&report, tr);
            }
        }
        Command::Rates => {
            let scenario = load_scenario(args)?;
            let params = scenario.parameters();
            let rates = params.map(|_, p| compute_rates(p));
            let hourly = params.map(|kind, p| hourly_rate_breakdown(rates.get(kind), p));
            let fixed = rates.map(|_, r| r.fixed_costs);
            if json {
                ui_cli::print_json(&rates)?;
            } else {
                ui_cli::print_rates(&hourly, &fixed, tr);
            }
        }
        Command::BreakEven(be) => run_break_even(config, args, &be, tr, json)?,
        Command::Sensitivity(sa) => run_sensitivity(config, args, &sa, tr, json)?,
    }
    Ok(())
}

fn run_break_even(
    config: &Config,
    args: &Args,
    be: &BreakEvenArgs,
    tr: &Translator,
    json: bool,
) -> Result<(), AppError> {
    let scenario = load_scenario(args)?;
    let defaults = &config.break_even;
    let factors = linspace(
        be.min_factor.unwrap_or(defaults.min_factor),
        be.max_factor.unwrap_or(defaults.max_factor),
        be.samples.unwrap_or(defaults.samples),
    );
    let evaluations = crate::analysis::evaluate(&scenario)?;
    let curve = break_even_curve(
        &scenario.program,
        &factors,
        &evaluations.map(|_, e| e.basis()),
    )?;
    let current_units = evaluations.manual.program.total_units;
    if json {
        ui_cli::print_json(&BreakEvenOutput {
            current_units,
            curve: &curve,
        })?;
    } else {
        ui_cli::print_break_even(&curve, current_units, tr);
    }
    Ok(())
}

fn run_sensitivity(
    config: &Config,
    args: &Args,
    sa: &SensitivityArgs,
    tr: &Translator,
    json: bool,
) -> Result<(), AppError> {
    let scenario = load_scenario(args)?;
    let defaults = &config.sensitivity;
    let curve = sensitivity_curve(
        &scenario.parameters(),
        &scenario.program,
        sa.parameter,
        defaults.low_ratio,
        defaults.high_ratio,
        sa.samples.unwrap_or(defaults.samples),
    )?;
    if json {
        ui_cli::print_json(&curve)?;
    } else {
        ui_cli::print_sensitivity(&curve, tr);
    }
    Ok(())
}
