use serde::{Deserialize, Serialize};

use super::linspace;
use crate::machine::{MachineKind, MachinePair};
use crate::program::{cost_program, CostingBasis, CostingError, ProductionProgram};

/// 기본 배율 범위: 0.2배 ~ 3.0배, 15점.
pub const DEFAULT_MIN_FACTOR: f64 = 0.2;
pub const DEFAULT_MAX_FACTOR: f64 = 3.0;
pub const DEFAULT_BREAK_EVEN_SAMPLES: usize = 15;

/// 곡선 위의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenPoint {
    /// 연간 시리즈 수에 곱한 배율
    pub factor: f64,
    /// 배율 적용 후 총 수량 [개/년]
    pub total_units: f64,
    /// 기계 A 총원가 [€/년]
    pub cost_manual: f64,
    /// 기계 B 총원가 [€/년]
    pub cost_automated: f64,
}

impl BreakEvenPoint {
    fn difference(&self) -> f64 {
        self.cost_manual - self.cost_automated
    }
}

/// 두 원가 곡선이 교차하는 지점 (인접 표본 사이 선형 보간).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub total_units: f64,
    pub cost: f64,
}

/// 손익분기 곡선 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenCurve {
    pub samples: Vec<BreakEvenPoint>,
    pub crossings: Vec<Crossing>,
}

pub fn default_scale_factors() -> Vec<f64> {
    linspace(DEFAULT_MIN_FACTOR, DEFAULT_MAX_FACTOR, DEFAULT_BREAK_EVEN_SAMPLES)
}

/// 각 배율로 프로그램을 늘리거나 줄여 두 기계의 총원가를 다시 계산한다.
pub fn sweep(
    program: &ProductionProgram,
    scale_factors: &[f64],
    bases: &MachinePair<CostingBasis>,
) -> Result<Vec<BreakEvenPoint>, CostingError> {
    scale_factors
        .iter()
        .map(|&factor| {
            let scaled = program.scaled(factor);
            let cost_a = cost_program(&scaled.series_for(MachineKind::Manual), &bases.manual)?;
            let cost_b =
                cost_program(&scaled.series_for(MachineKind::Automated), &bases.automated)?;
            Ok(BreakEvenPoint {
                factor,
                total_units: cost_a.total_units,
                cost_manual: cost_a.total_cost,
                cost_automated: cost_b.total_cost,
            })
        })
        .collect()
}

/// 원가 차이의 부호가 바뀌는 구간마다 교차점을 찾는다.
///
/// 생산 수량이 0인 표본(모든 행이 0 시리즈로 반올림됨)은 두 원가가 모두 0이므로 건너뛴다.
pub fn find_crossings(samples: &[BreakEvenPoint]) -> Vec<Crossing> {
    let producing: Vec<&BreakEvenPoint> =
        samples.iter().filter(|p| p.total_units > 0.0).collect();
    let mut crossings = Vec::new();
    for (i, p) in producing.iter().enumerate() {
        let d0 = p.difference();
        if d0 == 0.0 {
            push_unique(
                &mut crossings,
                Crossing {
                    total_units: p.total_units,
                    cost: p.cost_manual,
                },
            );
            continue;
        }
        let Some(q) = producing.get(i + 1) else {
            break;
        };
        let d1 = q.difference();
        if d0 * d1 < 0.0 {
            let t = d0 / (d0 - d1);
            push_unique(
                &mut crossings,
                Crossing {
                    total_units: p.total_units + t * (q.total_units - p.total_units),
                    cost: p.cost_manual + t * (q.cost_manual - p.cost_manual),
                },
            );
        }
    }
    crossings
}

fn push_unique(crossings: &mut Vec<Crossing>, crossing: Crossing) {
    if crossings.last() != Some(&crossing) {
        crossings.push(crossing);
    }
}

/// 표본 곡선과 교차점을 함께 계산한다.
pub fn break_even_curve(
    program: &ProductionProgram,
    scale_factors: &[f64],
    bases: &MachinePair<CostingBasis>,
) -> Result<BreakEvenCurve, CostingError> {
    let samples = sweep(program, scale_factors, bases)?;
    let crossings = find_crossings(&samples);
    Ok(BreakEvenCurve { samples, crossings })
}
