use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::investment::{InvestmentSettings, MAX_HORIZON_YEARS};
use crate::machine::{MachineKind, MachinePair, MachineParameters};
use crate::program::{validate_series, CostingError, MachineTimes, ProductionProgram, ProgramRow};

/// 두 기계에 공통으로 적용되는 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedParameters {
    /// 기계당 취득가 [€]
    pub acquisition_cost: f64,
    /// 내용연수 [년]
    pub useful_life_years: u32,
    /// 계산 이자율 (소수)
    pub interest_rate: f64,
    /// 인건비율 [€/h]
    pub labor_rate_per_hour: f64,
    /// 전력 단가 [€/kWh]
    pub electricity_price_per_kwh: f64,
    /// 면적 단가 [€/m²/월]
    pub space_cost_per_m2_month: f64,
}

/// 기계별로 다른 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineSetup {
    /// 공통 취득가 대신 쓸 값 [€]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_cost: Option<f64>,
    /// 잔존가치 [€]
    #[serde(default)]
    pub residual_value: f64,
    pub operating_hours_per_year: f64,
    pub utilization_fraction: f64,
    #[serde(default = "full_attendance")]
    pub operator_load_factor: f64,
    pub maintenance_rate: f64,
    pub floor_space_m2: f64,
    pub power_kw: f64,
    pub insurance_per_year: f64,
    pub tooling_per_year: f64,
}

fn full_attendance() -> f64 {
    1.0
}

/// 비교 계산 한 번에 필요한 전체 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub shared: SharedParameters,
    pub manual: MachineSetup,
    pub automated: MachineSetup,
    #[serde(default)]
    pub investment: InvestmentSettings,
    pub program: ProductionProgram,
}

/// 시나리오 파일 로드/저장 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("시나리오 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("시나리오 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Invalid(#[from] CostingError),
    #[error("분석 기간은 {max}년 이하여야 합니다: {years}년")]
    HorizonTooLong { years: u32, max: u32 },
}

impl Scenario {
    pub fn setup(&self, kind: MachineKind) -> &MachineSetup {
        match kind {
            MachineKind::Manual => &self.manual,
            MachineKind::Automated => &self.automated,
        }
    }

    /// 공통 값과 기계별 값을 합쳐 기계 입력을 만든다.
    pub fn machine_parameters(&self, kind: MachineKind) -> MachineParameters {
        let shared = &self.shared;
        let setup = self.setup(kind);
        MachineParameters {
            acquisition_cost: setup.acquisition_cost.unwrap_or(shared.acquisition_cost),
            residual_value: setup.residual_value,
            useful_life_years: shared.useful_life_years,
            interest_rate: shared.interest_rate,
            maintenance_rate: setup.maintenance_rate,
            floor_space_m2: setup.floor_space_m2,
            space_cost_per_m2_month: shared.space_cost_per_m2_month,
            insurance_per_year: setup.insurance_per_year,
            tooling_per_year: setup.tooling_per_year,
            operating_hours_per_year: setup.operating_hours_per_year,
            utilization_fraction: setup.utilization_fraction,
            power_kw: setup.power_kw,
            electricity_price_per_kwh: shared.electricity_price_per_kwh,
            operator_load_factor: setup.operator_load_factor,
            labor_rate_per_hour: shared.labor_rate_per_hour,
        }
    }

    pub fn parameters(&self) -> MachinePair<MachineParameters> {
        MachinePair::new(
            self.machine_parameters(MachineKind::Manual),
            self.machine_parameters(MachineKind::Automated),
        )
    }

    /// 분석 기간 상한과 생산 프로그램의 구조적 오류(시리즈 수/수량 0, 음수 시간)를 검사한다.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let years = self.investment.horizon_years;
        if years > MAX_HORIZON_YEARS {
            return Err(ScenarioError::HorizonTooLong {
                years,
                max: MAX_HORIZON_YEARS,
            });
        }
        for kind in MachineKind::ALL {
            for series in self.program.series_for(kind) {
                validate_series(&series)?;
            }
        }
        Ok(())
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(src)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_toml_string(&self) -> Result<String, ScenarioError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// TOML 시나리오 파일을 읽고 검증한다.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl Default for Scenario {
    /// 기본 예제: 수동 선반(A)과 자동화 셀(B), 세 개 시리즈.
    fn default() -> Self {
        let times = |processing: f64, setup: f64| MachineTimes {
            processing_minutes_per_unit: processing,
            setup_minutes_per_series: setup,
        };
        Self {
            shared: SharedParameters {
                acquisition_cost: 600_000.0,
                useful_life_years: 20,
                interest_rate: 0.05,
                labor_rate_per_hour: 65.0,
                electricity_price_per_kwh: 0.30,
                space_cost_per_m2_month: 15.0,
            },
            manual: MachineSetup {
                acquisition_cost: None,
                residual_value: 0.0,
                operating_hours_per_year: 2400.0,
                utilization_fraction: 0.75,
                operator_load_factor: 1.0,
                maintenance_rate: 0.025,
                floor_space_m2: 20.0,
                power_kw: 8.0,
                insurance_per_year: 500.0,
                tooling_per_year: 3000.0,
            },
            automated: MachineSetup {
                acquisition_cost: None,
                residual_value: 0.0,
                operating_hours_per_year: 5000.0,
                utilization_fraction: 0.85,
                operator_load_factor: 0.3,
                maintenance_rate: 0.045,
                floor_space_m2: 35.0,
                power_kw: 18.0,
                insurance_per_year: 1200.0,
                tooling_per_year: 8000.0,
            },
            investment: InvestmentSettings::default(),
            program: ProductionProgram::new(vec![
                ProgramRow::new("Welle Typ 1", 20, 50, times(10.0, 45.0), times(8.0, 30.0)),
                ProgramRow::new("Gehäuse groß", 10, 20, times(45.0, 120.0), times(30.0, 90.0)),
                ProgramRow::new("Flansch klein", 50, 100, times(5.0, 30.0), times(4.0, 20.0)),
            ]),
        }
    }
}
