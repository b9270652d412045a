use serde::{Deserialize, Serialize};

use crate::machine::MachineRates;
use crate::program::ProgramCostResult;

/// 프로그램 원가를 물량과 무관한 몫과 물량에 비례하는 몫으로 나눈 값 [€/년].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSplit {
    /// 소요시간에 배부된 고정비
    pub fixed: f64,
    /// 에너지와 인건비
    pub variable: f64,
}

impl CostSplit {
    /// 총원가 중 고정비율 × 소요시간을 고정 몫으로, 나머지를 변동 몫으로 본다.
    pub fn of(program: &ProgramCostResult, rates: &MachineRates) -> Self {
        let fixed = program.total_hours * rates.fixed_rate_per_hour;
        Self {
            fixed,
            variable: program.total_cost - fixed,
        }
    }
}

/// 원가 상승률과 생산 증가율을 반영한 연도별 원가(0년차부터).
///
/// t년차 원가 = 고정비₀·(1+e)^t + 변동비₀·(1+e)^t·(1+g)^t
pub fn projected_cost_series(
    base_fixed_cost: f64,
    base_variable_cost: f64,
    years: u32,
    cost_escalation_rate: f64,
    production_growth_rate: f64,
) -> Vec<f64> {
    let mut escalation = 1.0;
    let mut growth = 1.0;
    let mut out = Vec::with_capacity(years as usize);
    for _ in 0..years {
        out.push(base_fixed_cost * escalation + base_variable_cost * escalation * growth);
        escalation *= 1.0 + cost_escalation_rate;
        growth *= 1.0 + production_growth_rate;
    }
    out
}

/// 두 기계의 연도별 원가 차이(A - B)로 절감액 시계열을 만든다.
pub fn projected_saving_series(
    manual: CostSplit,
    automated: CostSplit,
    years: u32,
    cost_escalation_rate: f64,
    production_growth_rate: f64,
) -> Vec<f64> {
    let cost_a = projected_cost_series(
        manual.fixed,
        manual.variable,
        years,
        cost_escalation_rate,
        production_growth_rate,
    );
    let cost_b = projected_cost_series(
        automated.fixed,
        automated.variable,
        years,
        cost_escalation_rate,
        production_growth_rate,
    );
    cost_a.iter().zip(&cost_b).map(|(a, b)| a - b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn flat_projection_repeats_base_cost() {
        let series = projected_cost_series(100.0, 50.0, 4, 0.0, 0.0);
        assert_eq!(series, vec![150.0; 4]);
    }

    #[test]
    fn escalation_and_growth_compound() {
        let series = projected_cost_series(100.0, 50.0, 3, 0.02, 0.05);
        assert_abs_diff_eq!(series[0], 150.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series[1], 102.0 + 50.0 * 1.02 * 1.05, epsilon = 1e-9);
        assert_abs_diff_eq!(
            series[2],
            100.0 * 1.02_f64.powi(2) + 50.0 * 1.02_f64.powi(2) * 1.05_f64.powi(2),
            epsilon = 1e-9
        );
    }

    #[test]
    fn saving_series_is_difference_of_projections() {
        let a = CostSplit {
            fixed: 60.0,
            variable: 140.0,
        };
        let b = CostSplit {
            fixed: 90.0,
            variable: 40.0,
        };
        let savings = projected_saving_series(a, b, 3, 0.0, 0.1);
        assert_abs_diff_eq!(savings[0], 70.0, epsilon = 1e-12);
        // 생산이 늘수록 변동비가 큰 A가 불리해진다
        assert!(savings[2] > savings[1] && savings[1] > savings[0]);
    }
}
