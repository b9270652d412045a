use serde::{Deserialize, Serialize};
use tracing::warn;

use super::costing::ProgramCostResult;
use crate::machine::MachineRates;

/// 설비 용량 점검 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityCheck {
    /// 소요시간이 유효 가동시간 이내인지 여부
    pub feasible: bool,
    /// 가동 부하 (소수, 1.0 = 100%)
    pub utilization: f64,
    /// 필요 시간 [h/년]
    pub required_hours: f64,
    /// 유효 가동시간 [h/년]
    pub available_hours: f64,
}

/// 프로그램 소요시간을 유효 가동시간과 비교한다.
///
/// 유효 가동시간이 0 이하이면 부하는 0, 실현 가능 여부는 false로 둔다.
pub fn check_capacity(program: &ProgramCostResult, rates: &MachineRates) -> CapacityCheck {
    let available_hours = rates.effective_hours_per_year;
    let required_hours = program.total_hours;
    let (feasible, utilization) = if available_hours > 0.0 {
        (required_hours <= available_hours, required_hours / available_hours)
    } else {
        (false, 0.0)
    };
    if !feasible {
        warn!(required_hours, available_hours, "program exceeds machine capacity");
    }
    CapacityCheck {
        feasible,
        utilization,
        required_hours,
        available_hours,
    }
}
