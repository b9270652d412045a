use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parameters::MachineParameters;

const MONTHS_PER_YEAR: f64 = 12.0;

/// 연간 고정비 구성 요소 [€/년].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedCostBreakdown {
    /// 정액법 감가상각비
    pub depreciation: f64,
    /// 평균 투하자본 기준 계산 이자
    pub interest: f64,
    /// 정비비
    pub maintenance: f64,
    /// 공간비
    pub space: f64,
    /// 보험료
    pub insurance: f64,
    /// 공구비
    pub tooling: f64,
}

impl FixedCostBreakdown {
    /// 여섯 항목의 합계.
    pub fn total(&self) -> f64 {
        self.depreciation
            + self.interest
            + self.maintenance
            + self.space
            + self.insurance
            + self.tooling
    }
}

/// 기계시간당 비용률 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineRates {
    /// 고정비 항목별 내역
    pub fixed_costs: FixedCostBreakdown,
    /// 연간 고정비 합계 [€/년]
    pub fixed_cost_per_year: f64,
    /// 유효 가동시간 [h/년]
    pub effective_hours_per_year: f64,
    /// 고정비율 [€/h]
    pub fixed_rate_per_hour: f64,
    /// 변동비율(전력) [€/h]
    pub variable_rate_per_hour: f64,
}

impl MachineRates {
    /// 가공 시간에 적용하는 시간당 단가. 인건비는 작업자 부하율만큼만 반영한다.
    pub fn processing_rate_per_hour(&self, labor_rate: f64, operator_load_factor: f64) -> f64 {
        self.fixed_rate_per_hour + self.variable_rate_per_hour + labor_rate * operator_load_factor
    }

    /// 셋업 시간에 적용하는 시간당 단가. 셋업은 항상 작업자가 전담한다.
    pub fn setup_rate_per_hour(&self, labor_rate: f64) -> f64 {
        self.fixed_rate_per_hour + self.variable_rate_per_hour + labor_rate
    }
}

/// 기계시간당 비용률(MSS) 구성표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRateBreakdown {
    /// 고정비 [€/h]
    pub fixed: f64,
    /// 에너지 [€/h]
    pub energy: f64,
    /// 인건비 (부하율 반영) [€/h]
    pub personnel: f64,
    /// 합계 [€/h]
    pub total: f64,
}

/// 기계 입력값으로 연간 고정비와 시간당 비용률을 계산한다.
///
/// 유효 가동시간이 0 이하이면 고정비율은 0으로 둔다(오류를 내지 않음).
pub fn compute_rates(params: &MachineParameters) -> MachineRates {
    let fixed_costs = fixed_cost_breakdown(params);
    let fixed_cost_per_year = fixed_costs.total();

    let effective_hours_per_year = params.operating_hours_per_year * params.utilization_fraction;
    let fixed_rate_per_hour = if effective_hours_per_year > 0.0 {
        fixed_cost_per_year / effective_hours_per_year
    } else {
        debug!(
            effective_hours_per_year,
            "effective hours not positive, fixed rate set to zero"
        );
        0.0
    };

    MachineRates {
        fixed_costs,
        fixed_cost_per_year,
        effective_hours_per_year,
        fixed_rate_per_hour,
        variable_rate_per_hour: params.power_kw * params.electricity_price_per_kwh,
    }
}

/// 고정비 여섯 항목을 계산한다.
pub fn fixed_cost_breakdown(params: &MachineParameters) -> FixedCostBreakdown {
    // 내용연수 0은 1년으로 본다
    let life = f64::from(params.useful_life_years.max(1));
    let depreciable = (params.acquisition_cost - params.residual_value).max(0.0);
    FixedCostBreakdown {
        depreciation: depreciable / life,
        interest: (params.acquisition_cost + params.residual_value) / 2.0 * params.interest_rate,
        maintenance: params.acquisition_cost * params.maintenance_rate,
        space: params.floor_space_m2 * params.space_cost_per_m2_month * MONTHS_PER_YEAR,
        insurance: params.insurance_per_year,
        tooling: params.tooling_per_year,
    }
}

/// MSS 구성표(고정비/에너지/인건비/합계)를 만든다.
pub fn hourly_rate_breakdown(
    rates: &MachineRates,
    params: &MachineParameters,
) -> HourlyRateBreakdown {
    let personnel = params.labor_rate_per_hour * params.operator_load_factor;
    HourlyRateBreakdown {
        fixed: rates.fixed_rate_per_hour,
        energy: rates.variable_rate_per_hour,
        personnel,
        total: rates.fixed_rate_per_hour + rates.variable_rate_per_hour + personnel,
    }
}
