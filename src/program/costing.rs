use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::series::ProductionSeries;
use crate::machine::{MachineParameters, MachineRates};

const MINUTES_PER_HOUR: f64 = 60.0;

/// 프로그램 원가 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostingError {
    /// 구조적으로 잘못된 시리즈 입력
    #[error("입력 오류 ({series}): {reason}")]
    InvalidInput { series: String, reason: &'static str },
}

impl CostingError {
    fn invalid(series: &ProductionSeries, reason: &'static str) -> Self {
        CostingError::InvalidInput {
            series: series.name.clone(),
            reason,
        }
    }
}

/// 원가 계산에 필요한 기계별 단가 묶음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostingBasis {
    pub rates: MachineRates,
    pub labor_rate: f64,
    pub operator_load_factor: f64,
}

impl CostingBasis {
    pub fn new(params: &MachineParameters, rates: MachineRates) -> Self {
        Self {
            rates,
            labor_rate: params.labor_rate_per_hour,
            operator_load_factor: params.operator_load_factor,
        }
    }
}

/// 시리즈 한 행의 연간 원가.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCostResult {
    pub name: String,
    /// 연간 수량
    pub units_per_year: f64,
    /// 가공시간 [h/년]
    pub processing_hours: f64,
    /// 셋업시간 [h/년]
    pub setup_hours: f64,
    /// 가공비 [€/년]
    pub processing_cost: f64,
    /// 셋업비 [€/년]
    pub setup_cost: f64,
    /// 합계 [€/년]
    pub total_cost: f64,
    /// 개당 원가 [€], 수량이 0이면 0
    pub cost_per_unit: f64,
}

impl SeriesCostResult {
    pub fn total_hours(&self) -> f64 {
        self.processing_hours + self.setup_hours
    }
}

/// 기계 한 대 기준 생산 프로그램 전체 원가.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgramCostResult {
    pub series: Vec<SeriesCostResult>,
    /// 총원가 [€/년]
    pub total_cost: f64,
    /// 총 소요시간 [h/년]
    pub total_hours: f64,
    /// 총 생산 수량 [개/년]
    pub total_units: f64,
    /// 그중 가공시간 [h/년]
    pub processing_hours: f64,
    /// 그중 셋업시간 [h/년]
    pub setup_hours: f64,
}

/// 시리즈 입력의 구조적 유효성을 확인한다.
pub fn validate_series(series: &ProductionSeries) -> Result<(), CostingError> {
    if series.series_per_year == 0 {
        return Err(CostingError::invalid(series, "연간 시리즈 수는 0보다 커야 합니다."));
    }
    if series.units_per_series == 0 {
        return Err(CostingError::invalid(series, "시리즈당 수량은 0보다 커야 합니다."));
    }
    let times_ok = [series.processing_minutes_per_unit, series.setup_minutes_per_series]
        .iter()
        .all(|t| t.is_finite() && *t >= 0.0);
    if !times_ok {
        return Err(CostingError::invalid(series, "가공/셋업 시간은 0 이상의 수여야 합니다."));
    }
    Ok(())
}

/// 시리즈 한 행의 원가를 계산한다.
///
/// 가공시간에는 작업자 부하율을 반영한 인건비를, 셋업시간에는 전액 인건비를 적용한다.
pub fn cost_series(
    series: &ProductionSeries,
    basis: &CostingBasis,
) -> Result<SeriesCostResult, CostingError> {
    validate_series(series)?;

    let units_per_year = series.units_per_year();
    let processing_hours = units_per_year * series.processing_minutes_per_unit / MINUTES_PER_HOUR;
    let setup_hours =
        f64::from(series.series_per_year) * series.setup_minutes_per_series / MINUTES_PER_HOUR;

    let processing_cost = processing_hours
        * basis
            .rates
            .processing_rate_per_hour(basis.labor_rate, basis.operator_load_factor);
    let setup_cost = setup_hours * basis.rates.setup_rate_per_hour(basis.labor_rate);
    let total_cost = processing_cost + setup_cost;
    let cost_per_unit = if units_per_year > 0.0 {
        total_cost / units_per_year
    } else {
        0.0
    };

    Ok(SeriesCostResult {
        name: series.name.clone(),
        units_per_year,
        processing_hours,
        setup_hours,
        processing_cost,
        setup_cost,
        total_cost,
        cost_per_unit,
    })
}

/// 생산 프로그램 전체의 원가를 계산한다. 잘못된 행이 있으면 첫 오류를 반환한다.
pub fn cost_program(
    series: &[ProductionSeries],
    basis: &CostingBasis,
) -> Result<ProgramCostResult, CostingError> {
    let mut result = ProgramCostResult::default();
    for s in series {
        let row = cost_series(s, basis)?;
        result.total_cost += row.total_cost;
        result.total_hours += row.total_hours();
        result.total_units += row.units_per_year;
        result.processing_hours += row.processing_hours;
        result.setup_hours += row.setup_hours;
        result.series.push(row);
    }
    Ok(result)
}
