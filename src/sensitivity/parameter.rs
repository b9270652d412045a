use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::linspace;
use crate::evaluation::evaluate_machine;
use crate::machine::{MachineKind, MachinePair, MachineParameters};
use crate::program::{CostingError, ProductionProgram};

/// 기본 변동 범위: 현재값의 50% ~ 150%, 20점.
pub const DEFAULT_LOW_RATIO: f64 = 0.5;
pub const DEFAULT_HIGH_RATIO: f64 = 1.5;
pub const DEFAULT_SENSITIVITY_SAMPLES: usize = 20;

/// 민감도 분석에서 변화시킬 수 있는 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SensitivityParameter {
    /// 인건비율 (두 기계 공통)
    LaborRate,
    /// 전력 단가 (두 기계 공통)
    ElectricityPrice,
    /// 기계 A 가동률
    UtilizationManual,
    /// 기계 B 가동률
    UtilizationAutomated,
    /// 기계 B 작업자 부하율
    OperatorLoadFactorAutomated,
}

impl SensitivityParameter {
    pub const ALL: [SensitivityParameter; 5] = [
        SensitivityParameter::LaborRate,
        SensitivityParameter::ElectricityPrice,
        SensitivityParameter::UtilizationManual,
        SensitivityParameter::UtilizationAutomated,
        SensitivityParameter::OperatorLoadFactorAutomated,
    ];

    /// 현재 입력값. 공통 파라미터는 기계 A 값을 기준으로 한다.
    pub fn current_value(self, params: &MachinePair<MachineParameters>) -> f64 {
        match self {
            SensitivityParameter::LaborRate => params.manual.labor_rate_per_hour,
            SensitivityParameter::ElectricityPrice => params.manual.electricity_price_per_kwh,
            SensitivityParameter::UtilizationManual => params.manual.utilization_fraction,
            SensitivityParameter::UtilizationAutomated => params.automated.utilization_fraction,
            SensitivityParameter::OperatorLoadFactorAutomated => {
                params.automated.operator_load_factor
            }
        }
    }

    /// 값의 허용 범위로 제한한다. 가동률은 0~1, 부하율은 (0, 1], 단가는 0 이상.
    pub fn clamp(self, value: f64) -> f64 {
        match self {
            SensitivityParameter::LaborRate | SensitivityParameter::ElectricityPrice => {
                value.max(0.0)
            }
            SensitivityParameter::UtilizationManual
            | SensitivityParameter::UtilizationAutomated => value.clamp(0.0, 1.0),
            SensitivityParameter::OperatorLoadFactorAutomated => value.clamp(f64::EPSILON, 1.0),
        }
    }

    /// 한 값만 바꾼 입력 사본을 만든다. 나머지는 그대로 둔다.
    pub fn apply(
        self,
        params: &MachinePair<MachineParameters>,
        value: f64,
    ) -> MachinePair<MachineParameters> {
        let value = self.clamp(value);
        let mut out = *params;
        match self {
            SensitivityParameter::LaborRate => {
                for kind in MachineKind::ALL {
                    out.get_mut(kind).labor_rate_per_hour = value;
                }
            }
            SensitivityParameter::ElectricityPrice => {
                for kind in MachineKind::ALL {
                    out.get_mut(kind).electricity_price_per_kwh = value;
                }
            }
            SensitivityParameter::UtilizationManual => out.manual.utilization_fraction = value,
            SensitivityParameter::UtilizationAutomated => {
                out.automated.utilization_fraction = value;
            }
            SensitivityParameter::OperatorLoadFactorAutomated => {
                out.automated.operator_load_factor = value;
            }
        }
        out
    }
}

/// 민감도 곡선의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// 적용한 입력값
    pub value: f64,
    /// 연간 절감액 (A - B) [€/년]
    pub annual_saving: f64,
}

/// 현재값 기준 비율 범위로 표본값을 만든다. 범위 제한 후 중복도 그대로 둔다.
pub fn parameter_values(
    parameter: SensitivityParameter,
    current: f64,
    low_ratio: f64,
    high_ratio: f64,
    samples: usize,
) -> Vec<f64> {
    linspace(current * low_ratio, current * high_ratio, samples)
        .into_iter()
        .map(|v| parameter.clamp(v))
        .collect()
}

/// 값 하나씩 바꿔 가며 비용률과 프로그램 원가를 다시 계산해 연간 절감액을 구한다.
pub fn sensitivity_sweep(
    params: &MachinePair<MachineParameters>,
    program: &ProductionProgram,
    parameter: SensitivityParameter,
    values: &[f64],
) -> Result<Vec<SensitivityPoint>, CostingError> {
    values
        .iter()
        .map(|&value| {
            let varied = parameter.apply(params, value);
            let a = evaluate_machine(MachineKind::Manual, &varied.manual, program)?;
            let b = evaluate_machine(MachineKind::Automated, &varied.automated, program)?;
            Ok(SensitivityPoint {
                value: parameter.clamp(value),
                annual_saving: a.program.total_cost - b.program.total_cost,
            })
        })
        .collect()
}

/// 파라미터 하나에 대한 민감도 곡선.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub parameter: SensitivityParameter,
    pub current_value: f64,
    pub points: Vec<SensitivityPoint>,
}

/// 현재값의 `low_ratio`~`high_ratio` 범위를 `samples`점으로 나눠 곡선을 만든다.
pub fn sensitivity_curve(
    params: &MachinePair<MachineParameters>,
    program: &ProductionProgram,
    parameter: SensitivityParameter,
    low_ratio: f64,
    high_ratio: f64,
    samples: usize,
) -> Result<SensitivityCurve, CostingError> {
    let current_value = parameter.current_value(params);
    let values = parameter_values(parameter, current_value, low_ratio, high_ratio, samples);
    let points = sensitivity_sweep(params, program, parameter, &values)?;
    Ok(SensitivityCurve {
        parameter,
        current_value,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::rates::tests::reference_machine;
    use crate::program::{MachineTimes, ProgramRow};

    fn setup() -> (MachinePair<MachineParameters>, ProductionProgram) {
        let a = reference_machine();
        let mut b = reference_machine();
        b.operator_load_factor = 0.3;
        b.power_kw = 18.0;
        let program = ProductionProgram::new(vec![ProgramRow::new(
            "Flansch klein",
            50,
            100,
            MachineTimes {
                processing_minutes_per_unit: 5.0,
                setup_minutes_per_series: 30.0,
            },
            MachineTimes {
                processing_minutes_per_unit: 4.0,
                setup_minutes_per_series: 20.0,
            },
        )]);
        (MachinePair::new(a, b), program)
    }

    #[test]
    fn higher_labor_rate_favours_automation() {
        let (params, program) = setup();
        let values = parameter_values(SensitivityParameter::LaborRate, 65.0, 0.5, 1.5, 5);
        let curve =
            sensitivity_sweep(&params, &program, SensitivityParameter::LaborRate, &values).unwrap();
        assert_eq!(curve.len(), 5);
        assert!(curve.windows(2).all(|w| w[1].annual_saving > w[0].annual_saving));
    }

    #[test]
    fn apply_changes_only_target() {
        let (params, _) = setup();
        let varied = SensitivityParameter::UtilizationAutomated.apply(&params, 0.5);
        assert_eq!(varied.automated.utilization_fraction, 0.5);
        assert_eq!(varied.manual, params.manual);

        let shared = SensitivityParameter::ElectricityPrice.apply(&params, 0.4);
        assert_eq!(shared.manual.electricity_price_per_kwh, 0.4);
        assert_eq!(shared.automated.electricity_price_per_kwh, 0.4);
    }

    #[test]
    fn curve_contains_current_value() {
        let (params, program) = setup();
        let curve = sensitivity_curve(
            &params,
            &program,
            SensitivityParameter::ElectricityPrice,
            0.5,
            1.5,
            3,
        )
        .unwrap();
        assert_eq!(curve.current_value, 0.30);
        assert_eq!(curve.points.len(), 3);
        assert!((curve.points[1].value - 0.30).abs() < 1e-12);
    }

    #[test]
    fn values_are_clamped() {
        let values = parameter_values(SensitivityParameter::UtilizationManual, 0.9, 0.5, 1.5, 3);
        assert_eq!(values[2], 1.0);
        let factor = SensitivityParameter::OperatorLoadFactorAutomated.clamp(0.0);
        assert!(factor > 0.0);
    }
}
