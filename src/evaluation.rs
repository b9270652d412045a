use serde::{Deserialize, Serialize};

use crate::machine::{compute_rates, MachineKind, MachineParameters, MachineRates};
use crate::program::{
    check_capacity, cost_program, CapacityCheck, CostingBasis, CostingError, ProductionProgram,
    ProgramCostResult,
};

/// 기계 한 대에 대한 비용률, 프로그램 원가, 용량 점검 결과 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEvaluation {
    pub kind: MachineKind,
    pub params: MachineParameters,
    pub rates: MachineRates,
    pub program: ProgramCostResult,
    pub capacity: CapacityCheck,
}

impl MachineEvaluation {
    pub fn basis(&self) -> CostingBasis {
        CostingBasis::new(&self.params, self.rates)
    }
}

/// 입력값에서 비용률 → 프로그램 원가 → 용량 점검까지 한 번에 다시 계산한다.
pub fn evaluate_machine(
    kind: MachineKind,
    params: &MachineParameters,
    program: &ProductionProgram,
) -> Result<MachineEvaluation, CostingError> {
    let rates = compute_rates(params);
    let basis = CostingBasis::new(params, rates);
    let cost = cost_program(&program.series_for(kind), &basis)?;
    let capacity = check_capacity(&cost, &rates);
    Ok(MachineEvaluation {
        kind,
        params: *params,
        rates,
        program: cost,
        capacity,
    })
}
