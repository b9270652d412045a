use serde::{Deserialize, Serialize};

/// 비교 대상 기계 구분. A는 수동, B는 자동화 설비다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineKind {
    /// 기계 A (수동)
    Manual,
    /// 기계 B (자동화)
    Automated,
}

impl MachineKind {
    pub const ALL: [MachineKind; 2] = [MachineKind::Manual, MachineKind::Automated];

    /// 표와 로그에 쓰는 짧은 표기(A/B).
    pub fn label(self) -> &'static str {
        match self {
            MachineKind::Manual => "A",
            MachineKind::Automated => "B",
        }
    }
}

/// 수동/자동 두 기계에 대해 같은 종류의 값을 묶어 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachinePair<T> {
    pub manual: T,
    pub automated: T,
}

impl<T> MachinePair<T> {
    pub fn new(manual: T, automated: T) -> Self {
        Self { manual, automated }
    }

    pub fn get(&self, kind: MachineKind) -> &T {
        match kind {
            MachineKind::Manual => &self.manual,
            MachineKind::Automated => &self.automated,
        }
    }

    pub fn get_mut(&mut self, kind: MachineKind) -> &mut T {
        match kind {
            MachineKind::Manual => &mut self.manual,
            MachineKind::Automated => &mut self.automated,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(MachineKind, &T) -> U) -> MachinePair<U> {
        MachinePair {
            manual: f(MachineKind::Manual, &self.manual),
            automated: f(MachineKind::Automated, &self.automated),
        }
    }

    /// 각 기계에 대해 실패 가능한 변환을 적용한다. 첫 오류에서 중단한다.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(MachineKind, &T) -> Result<U, E>,
    ) -> Result<MachinePair<U>, E> {
        Ok(MachinePair {
            manual: f(MachineKind::Manual, &self.manual)?,
            automated: f(MachineKind::Automated, &self.automated)?,
        })
    }
}

/// 기계 한 대의 비용 입력값.
///
/// 비율 값은 모두 소수(0.05 = 5%)로 받는다. 음수 검증은 하지 않으며
/// 계산 단계에서 0으로 제한하거나 가드한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineParameters {
    /// 취득가 [€]
    pub acquisition_cost: f64,
    /// 내용연수 종료 시 잔존가치 [€]
    pub residual_value: f64,
    /// 내용연수 [년]
    pub useful_life_years: u32,
    /// 계산 이자율 (소수)
    pub interest_rate: f64,
    /// 정비비율 (취득가 대비 소수)
    pub maintenance_rate: f64,
    /// 설치 면적 [m²]
    pub floor_space_m2: f64,
    /// 면적 단가 [€/m²/월]
    pub space_cost_per_m2_month: f64,
    /// 보험료 [€/년]
    pub insurance_per_year: f64,
    /// 공구비 [€/년]
    pub tooling_per_year: f64,
    /// 연간 가동시간 [h/년]
    pub operating_hours_per_year: f64,
    /// 가동률 (0~1)
    pub utilization_fraction: f64,
    /// 소비전력 [kW]
    pub power_kw: f64,
    /// 전력 단가 [€/kWh]
    pub electricity_price_per_kwh: f64,
    /// 작업자 부하율 (0<f≤1, 1.0 = 상시 배치)
    pub operator_load_factor: f64,
    /// 인건비율 [€/h], 두 기계 공통
    pub labor_rate_per_hour: f64,
}
