use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::sensitivity::SensitivityParameter;

/// 수동 기계와 자동화 설비의 원가/투자 비교.
#[derive(Debug, Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// 시나리오 TOML 파일. 없으면 기본 예제를 사용한다.
    #[clap(long, short = 's', global = true, env = "MACHINE_COST_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// 출력 언어 (auto/ko/en/de).
    #[clap(long, default_value = "auto", global = true)]
    pub lang: String,

    /// 표 대신 JSON으로 출력한다.
    #[clap(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 전체 비교 보고서 (기본).
    #[clap(name = "report")]
    Report,

    /// 기계시간당 비용률과 고정비 내역.
    #[clap(name = "rates")]
    Rates,

    /// 생산량 배율에 따른 손익분기 곡선.
    #[clap(name = "break-even")]
    BreakEven(BreakEvenArgs),

    /// 입력값 하나를 바꿔 가며 연간 절감액을 본다.
    #[clap(name = "sensitivity")]
    Sensitivity(SensitivityArgs),

    /// 기본 시나리오를 TOML 파일로 저장한다.
    #[clap(name = "init")]
    Init {
        /// 저장할 경로
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Parser)]
pub struct BreakEvenArgs {
    /// 최소 배율 (설정 파일 값 대신)
    #[clap(long)]
    pub min_factor: Option<f64>,

    /// 최대 배율
    #[clap(long)]
    pub max_factor: Option<f64>,

    /// 표본 수
    #[clap(long)]
    pub samples: Option<usize>,
}

#[derive(Debug, Clone, Parser)]
pub struct SensitivityArgs {
    #[clap(long, short = 'p', value_enum, default_value = "labor-rate")]
    pub parameter: SensitivityParameter,

    /// 표본 수
    #[clap(long)]
    pub samples: Option<usize>,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_default_command() {
        let args = Args::try_parse_from(["machine_cost_toolbox"]).unwrap();
        assert!(matches!(args.command(), Command::Report));
        assert_eq!(args.lang, "auto");
        assert!(!args.json);
    }

    #[test]
    fn sensitivity_parameter_parses_kebab_case() {
        let args = Args::try_parse_from([
            "machine_cost_toolbox",
            "sensitivity",
            "--parameter",
            "utilization-automated",
            "--json",
        ])
        .unwrap();
        match args.command() {
            Command::Sensitivity(s) => {
                assert_eq!(s.parameter, SensitivityParameter::UtilizationAutomated);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(args.json);
    }

    #[test]
    fn global_options_after_subcommand() {
        let args =
            Args::try_parse_from(["machine_cost_toolbox", "rates", "--lang", "de", "-s", "x.toml"])
                .unwrap();
        assert_eq!(args.lang, "de");
        assert_eq!(args.scenario, Some(PathBuf::from("x.toml")));
    }
}
