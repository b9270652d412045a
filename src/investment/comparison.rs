use serde::{Deserialize, Serialize};

use super::npv::npv;
use super::payback::{discounted_payback, simple_payback, DiscountedPayback, SimplePayback};
use super::projection::{projected_saving_series, CostSplit};
use crate::evaluation::MachineEvaluation;

/// 연도별 절감액 시계열의 최대 길이 [년].
pub const MAX_HORIZON_YEARS: u32 = 100;

/// 투자 비교 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentSettings {
    /// 분석 기간 [년], 최대 `MAX_HORIZON_YEARS`
    pub horizon_years: u32,
    /// 할인율 (소수)
    pub discount_rate: f64,
    /// 연간 원가 상승률 (소수)
    pub cost_escalation_rate: f64,
    /// 연간 생산 증가율 (소수)
    pub production_growth_rate: f64,
}

impl Default for InvestmentSettings {
    fn default() -> Self {
        Self {
            horizon_years: 20,
            discount_rate: 0.05,
            cost_escalation_rate: 0.0,
            production_growth_rate: 0.0,
        }
    }
}

impl InvestmentSettings {
    /// 상승률과 증가율이 모두 0이면 매년 같은 절감액을 쓴다.
    pub fn is_flat(&self) -> bool {
        self.cost_escalation_rate == 0.0 && self.production_growth_rate == 0.0
    }

    /// 상한을 넘지 않는 분석 기간.
    pub fn effective_horizon(&self) -> u32 {
        self.horizon_years.min(MAX_HORIZON_YEARS)
    }
}

/// 수동(A) 대비 자동화(B) 선택의 경제성 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentComparison {
    /// 연간 절감액 = 원가 A - 원가 B [€/년], 양수면 B가 유리
    pub annual_saving: f64,
    /// 원가 A 대비 절감률 [%], 원가 A가 0 이하이면 0
    pub saving_percent: f64,
    /// 추가 투자비 = 취득가 B - 취득가 A [€]
    pub extra_investment: f64,
    pub simple_payback: SimplePayback,
    pub discounted_payback: DiscountedPayback,
    /// 순현재가치 [€], 할인율이 -100% 이하이면 None
    pub npv: Option<f64>,
    /// NPV/할인 회수기간 계산에 쓴 연도별 절감액 (1년차부터)
    pub saving_series: Vec<f64>,
    /// 두 기계 모두 용량 안에서 프로그램을 소화하는지 여부.
    /// false이면 결과는 계산되지만 신뢰할 수 없다.
    pub capacity_reliable: bool,
}

/// 연간 절감액과 A 원가 대비 절감률[%].
pub fn saving_percent(annual_saving: f64, cost_manual: f64) -> f64 {
    if cost_manual > 0.0 {
        annual_saving / cost_manual * 100.0
    } else {
        0.0
    }
}

/// 두 기계 평가 결과로 절감액, 회수기간, NPV를 계산한다.
pub fn compare_investment(
    manual: &MachineEvaluation,
    automated: &MachineEvaluation,
    settings: &InvestmentSettings,
) -> InvestmentComparison {
    let annual_saving = manual.program.total_cost - automated.program.total_cost;
    let extra_investment = automated.params.acquisition_cost - manual.params.acquisition_cost;

    let horizon = settings.effective_horizon();
    let saving_series = if settings.is_flat() {
        vec![annual_saving; horizon as usize]
    } else {
        projected_saving_series(
            CostSplit::of(&manual.program, &manual.rates),
            CostSplit::of(&automated.program, &automated.rates),
            horizon,
            settings.cost_escalation_rate,
            settings.production_growth_rate,
        )
    };

    InvestmentComparison {
        annual_saving,
        saving_percent: saving_percent(annual_saving, manual.program.total_cost),
        extra_investment,
        simple_payback: simple_payback(extra_investment, annual_saving),
        discounted_payback: discounted_payback(
            extra_investment,
            &saving_series,
            settings.discount_rate,
        ),
        npv: npv(
            &saving_series,
            extra_investment,
            manual.params.residual_value,
            automated.params.residual_value,
            settings.discount_rate,
        ),
        saving_series,
        capacity_reliable: manual.capacity.feasible && automated.capacity.feasible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate_machine;
    use crate::machine::rates::tests::reference_machine;
    use crate::machine::MachineKind;
    use crate::program::{MachineTimes, ProductionProgram, ProgramRow};
    use approx::assert_abs_diff_eq;

    fn program() -> ProductionProgram {
        ProductionProgram::new(vec![ProgramRow::new(
            "Welle Typ 1",
            20,
            50,
            MachineTimes {
                processing_minutes_per_unit: 10.0,
                setup_minutes_per_series: 45.0,
            },
            MachineTimes {
                processing_minutes_per_unit: 8.0,
                setup_minutes_per_series: 30.0,
            },
        )])
    }

    fn pair(cost_b: f64) -> (MachineEvaluation, MachineEvaluation) {
        let a = reference_machine();
        let mut b = reference_machine();
        b.acquisition_cost = cost_b;
        b.operator_load_factor = 0.3;
        (
            evaluate_machine(MachineKind::Manual, &a, &program()).unwrap(),
            evaluate_machine(MachineKind::Automated, &b, &program()).unwrap(),
        )
    }

    #[test]
    fn flat_settings_repeat_annual_saving() {
        let (a, b) = pair(600_000.0);
        let settings = InvestmentSettings::default();
        let cmp = compare_investment(&a, &b, &settings);
        assert!(cmp.annual_saving > 0.0);
        assert_eq!(cmp.saving_series.len(), 20);
        assert!(cmp.saving_series.iter().all(|s| *s == cmp.annual_saving));
        assert_eq!(cmp.extra_investment, 0.0);
        assert_eq!(cmp.simple_payback, SimplePayback::Years(0.0));
        assert_eq!(cmp.discounted_payback, DiscountedPayback::Year(0));
        assert!(cmp.capacity_reliable);
    }

    #[test]
    fn npv_matches_constant_formula() {
        let (a, b) = pair(650_000.0);
        let settings = InvestmentSettings {
            horizon_years: 10,
            discount_rate: 0.05,
            ..InvestmentSettings::default()
        };
        let cmp = compare_investment(&a, &b, &settings);
        let expected = crate::investment::npv_constant(
            cmp.annual_saving,
            10,
            50_000.0,
            0.0,
            0.0,
            0.05,
        )
        .unwrap();
        assert_abs_diff_eq!(cmp.npv.unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn growth_projection_changes_series() {
        let (a, b) = pair(650_000.0);
        let settings = InvestmentSettings {
            horizon_years: 5,
            production_growth_rate: 0.1,
            ..InvestmentSettings::default()
        };
        let cmp = compare_investment(&a, &b, &settings);
        assert_abs_diff_eq!(cmp.saving_series[0], cmp.annual_saving, epsilon = 1e-6);
        assert_ne!(cmp.saving_series[4], cmp.saving_series[0]);
    }

    #[test]
    fn infeasible_capacity_is_flagged_not_suppressed() {
        let (a, mut b) = pair(650_000.0);
        b.capacity.feasible = false;
        let cmp = compare_investment(&a, &b, &InvestmentSettings::default());
        assert!(!cmp.capacity_reliable);
        assert!(cmp.npv.is_some());
    }

    #[test]
    fn horizon_is_capped() {
        let (a, b) = pair(650_000.0);
        let flat = InvestmentSettings {
            horizon_years: u32::MAX,
            ..InvestmentSettings::default()
        };
        let cmp = compare_investment(&a, &b, &flat);
        assert_eq!(cmp.saving_series.len(), MAX_HORIZON_YEARS as usize);

        let growing = InvestmentSettings {
            production_growth_rate: 0.02,
            ..flat
        };
        let cmp = compare_investment(&a, &b, &growing);
        assert_eq!(cmp.saving_series.len(), MAX_HORIZON_YEARS as usize);
    }

    #[test]
    fn saving_percent_guards_zero_cost() {
        assert_eq!(saving_percent(100.0, 0.0), 0.0);
        assert_abs_diff_eq!(saving_percent(25.0, 200.0), 12.5);
    }
}
