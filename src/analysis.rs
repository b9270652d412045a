//! 입력 시나리오 하나로 비교 결과 전체를 다시 계산한다.
//!
//! 상태를 보관하지 않으며 입력이 바뀔 때마다 전체 체인(비용률 → 프로그램 원가 →
//! 용량 점검 → 투자 비교 → 손익분기 곡선)을 새로 계산한다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluation::{evaluate_machine, MachineEvaluation};
use crate::investment::{compare_investment, InvestmentComparison, SimplePayback};
use crate::machine::{
    hourly_rate_breakdown, FixedCostBreakdown, HourlyRateBreakdown, MachineKind, MachinePair,
};
use crate::program::CostingError;
use crate::scenario::Scenario;
use crate::sensitivity::{break_even_curve, BreakEvenCurve};

/// 연간 비용 구조: 고정비 여섯 항목 + 프로그램 소요시간에 따른 인건비/에너지.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    pub fixed: FixedCostBreakdown,
    /// 가공시간 × 인건비율 × 부하율 + 셋업시간 × 인건비율
    pub personnel: f64,
    /// 에너지 변동비 × 총 소요시간
    pub energy: f64,
}

impl CostStructure {
    pub fn of(evaluation: &MachineEvaluation) -> Self {
        let labor = evaluation.params.labor_rate_per_hour;
        let program = &evaluation.program;
        Self {
            fixed: evaluation.rates.fixed_costs,
            personnel: program.processing_hours * labor * evaluation.params.operator_load_factor
                + program.setup_hours * labor,
            energy: program.total_hours * evaluation.rates.variable_rate_per_hour,
        }
    }

    pub fn total(&self) -> f64 {
        self.fixed.total() + self.personnel + self.energy
    }
}

/// 기계 한 대에 대한 보고서 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineReport {
    #[serde(flatten)]
    pub evaluation: MachineEvaluation,
    pub hourly: HourlyRateBreakdown,
    pub cost_structure: CostStructure,
}

/// 시리즈별 개당 원가 비교에서 유리한 쪽.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    Manual,
    Automated,
    Even,
}

/// 시리즈 한 행의 개당 원가 비교.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesComparison {
    pub name: String,
    pub units_per_year: f64,
    pub unit_cost_manual: f64,
    pub unit_cost_automated: f64,
    /// A - B, 양수면 B가 유리
    pub difference: f64,
    pub advantage: Advantage,
}

/// 최종 추천.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "machine", rename_all = "snake_case")]
pub enum Recommendation {
    /// 자동화 설비가 연간 원가가 낮다
    Automated {
        annual_saving: f64,
        saving_percent: f64,
        payback: SimplePayback,
        /// 회수기간이 B의 내용연수보다 짧은지
        economical: bool,
    },
    /// 수동 설비가 같거나 더 싸다
    Manual { extra_cost_per_year: f64 },
}

/// 전체 비교 보고서. 표현 계층은 이 구조만 보고 표/차트/내보내기를 만든다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub machines: MachinePair<MachineReport>,
    pub investment: InvestmentComparison,
    pub series: Vec<SeriesComparison>,
    pub recommendation: Recommendation,
    pub break_even: BreakEvenCurve,
    /// 현재 프로그램의 총 수량 [개/년]
    pub current_units: f64,
}

impl ComparisonReport {
    pub fn machine(&self, kind: MachineKind) -> &MachineReport {
        self.machines.get(kind)
    }
}

/// 시리즈별로 두 기계의 개당 원가를 비교한다.
pub fn compare_series(
    manual: &MachineEvaluation,
    automated: &MachineEvaluation,
) -> Vec<SeriesComparison> {
    manual
        .program
        .series
        .iter()
        .zip(&automated.program.series)
        .map(|(a, b)| {
            let difference = a.cost_per_unit - b.cost_per_unit;
            let advantage = if difference > 0.0 {
                Advantage::Automated
            } else if difference < 0.0 {
                Advantage::Manual
            } else {
                Advantage::Even
            };
            SeriesComparison {
                name: a.name.clone(),
                units_per_year: a.units_per_year,
                unit_cost_manual: a.cost_per_unit,
                unit_cost_automated: b.cost_per_unit,
                difference,
                advantage,
            }
        })
        .collect()
}

/// 절감액과 회수기간으로 추천을 정한다.
pub fn recommend(investment: &InvestmentComparison, useful_life_years: u32) -> Recommendation {
    if investment.annual_saving > 0.0 {
        let economical = investment
            .simple_payback
            .years()
            .is_some_and(|y| y < f64::from(useful_life_years));
        Recommendation::Automated {
            annual_saving: investment.annual_saving,
            saving_percent: investment.saving_percent,
            payback: investment.simple_payback,
            economical,
        }
    } else {
        Recommendation::Manual {
            extra_cost_per_year: -investment.annual_saving,
        }
    }
}

/// 두 기계를 평가한다. 구조적 입력 오류는 여기서 걸러진다.
pub fn evaluate(scenario: &Scenario) -> Result<MachinePair<MachineEvaluation>, CostingError> {
    scenario
        .parameters()
        .try_map(|kind, params| evaluate_machine(kind, params, &scenario.program))
}

/// 시나리오 하나에 대한 전체 비교 보고서를 만든다.
pub fn analyze(
    scenario: &Scenario,
    break_even_factors: &[f64],
) -> Result<ComparisonReport, CostingError> {
    let evaluations = evaluate(scenario)?;
    let investment = compare_investment(
        &evaluations.manual,
        &evaluations.automated,
        &scenario.investment,
    );
    let series = compare_series(&evaluations.manual, &evaluations.automated);
    let recommendation = recommend(
        &investment,
        evaluations.automated.params.useful_life_years,
    );
    let break_even = break_even_curve(
        &scenario.program,
        break_even_factors,
        &evaluations.map(|_, e| e.basis()),
    )?;
    debug!(
        annual_saving = investment.annual_saving,
        crossings = break_even.crossings.len(),
        "comparison recomputed"
    );

    let current_units = evaluations.manual.program.total_units;
    let machines = evaluations.map(|_, e| MachineReport {
        hourly: hourly_rate_breakdown(&e.rates, &e.params),
        cost_structure: CostStructure::of(e),
        evaluation: e.clone(),
    });
    Ok(ComparisonReport {
        machines,
        investment,
        series,
        recommendation,
        break_even,
        current_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensitivity::default_scale_factors;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_scenario_report_is_consistent() {
        let scenario = Scenario::default();
        let report = analyze(&scenario, &default_scale_factors()).unwrap();
        let a = report.machine(MachineKind::Manual);
        let b = report.machine(MachineKind::Automated);
        assert_abs_diff_eq!(
            report.investment.annual_saving,
            a.evaluation.program.total_cost - b.evaluation.program.total_cost,
            epsilon = 1e-9
        );
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.break_even.samples.len(), 15);
        assert_abs_diff_eq!(report.current_units, 6200.0);
    }

    #[test]
    fn cost_structure_matches_program_cost() {
        let scenario = Scenario::default();
        let evaluations = evaluate(&scenario).unwrap();
        for e in [&evaluations.manual, &evaluations.automated] {
            let structure = CostStructure::of(e);
            // 프로그램 원가 = 배부 고정비 + 인건비 + 에너지
            let allocated_fixed = e.program.total_hours * e.rates.fixed_rate_per_hour;
            assert_abs_diff_eq!(
                e.program.total_cost,
                allocated_fixed + structure.personnel + structure.energy,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn recommendation_follows_saving_sign() {
        let scenario = Scenario::default();
        let report = analyze(&scenario, &[1.0]).unwrap();
        match report.recommendation {
            Recommendation::Automated { annual_saving, .. } => assert!(annual_saving > 0.0),
            Recommendation::Manual { extra_cost_per_year } => assert!(extra_cost_per_year >= 0.0),
        }
    }

    #[test]
    fn manual_recommended_when_automation_costs_more() {
        let investment = InvestmentComparison {
            annual_saving: -5_000.0,
            saving_percent: -2.0,
            extra_investment: 0.0,
            simple_payback: SimplePayback::NotApplicable,
            discounted_payback: crate::investment::DiscountedPayback::Year(0),
            npv: Some(0.0),
            saving_series: Vec::new(),
            capacity_reliable: true,
        };
        assert_eq!(
            recommend(&investment, 20),
            Recommendation::Manual {
                extra_cost_per_year: 5_000.0
            }
        );
    }

    #[test]
    fn economical_only_when_payback_below_life() {
        let mut investment = InvestmentComparison {
            annual_saving: 10_000.0,
            saving_percent: 5.0,
            extra_investment: 250_000.0,
            simple_payback: SimplePayback::Years(25.0),
            discounted_payback: crate::investment::DiscountedPayback::NotReached,
            npv: None,
            saving_series: Vec::new(),
            capacity_reliable: true,
        };
        assert!(matches!(
            recommend(&investment, 20),
            Recommendation::Automated { economical: false, .. }
        ));
        investment.simple_payback = SimplePayback::Years(8.0);
        assert!(matches!(
            recommend(&investment, 20),
            Recommendation::Automated { economical: true, .. }
        ));
    }

    #[test]
    fn unit_cost_advantage() {
        let evaluations = evaluate(&Scenario::default()).unwrap();
        let rows = compare_series(&evaluations.manual, &evaluations.automated);
        for row in rows {
            let expected = if row.difference > 0.0 {
                Advantage::Automated
            } else if row.difference < 0.0 {
                Advantage::Manual
            } else {
                Advantage::Even
            };
            assert_eq!(row.advantage, expected);
        }
    }
}
