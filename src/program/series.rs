use serde::{Deserialize, Serialize};

use crate::machine::MachineKind;

/// 한 기계 기준으로 본 생산 시리즈 한 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSeries {
    /// 시리즈/부품 이름
    pub name: String,
    /// 연간 시리즈 수
    pub series_per_year: u32,
    /// 시리즈당 수량
    pub units_per_series: u32,
    /// 개당 가공시간 [min]
    pub processing_minutes_per_unit: f64,
    /// 시리즈당 셋업시간 [min]
    pub setup_minutes_per_series: f64,
}

impl ProductionSeries {
    /// 연간 생산 수량.
    pub fn units_per_year(&self) -> f64 {
        f64::from(self.series_per_year) * f64::from(self.units_per_series)
    }
}

/// 기계별 가공/셋업 시간 [min].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineTimes {
    pub processing_minutes_per_unit: f64,
    pub setup_minutes_per_series: f64,
}

/// 편집 가능한 생산 프로그램 한 행. 수량은 공통이고 시간은 기계마다 다르다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRow {
    pub name: String,
    pub series_per_year: u32,
    pub units_per_series: u32,
    pub manual: MachineTimes,
    pub automated: MachineTimes,
}

impl ProgramRow {
    pub fn new(
        name: impl Into<String>,
        series_per_year: u32,
        units_per_series: u32,
        manual: MachineTimes,
        automated: MachineTimes,
    ) -> Self {
        Self {
            name: name.into(),
            series_per_year,
            units_per_series,
            manual,
            automated,
        }
    }

    pub fn times(&self, kind: MachineKind) -> MachineTimes {
        match kind {
            MachineKind::Manual => self.manual,
            MachineKind::Automated => self.automated,
        }
    }

    /// 지정한 기계 기준의 시리즈 행을 만든다.
    pub fn series_for(&self, kind: MachineKind) -> ProductionSeries {
        let times = self.times(kind);
        ProductionSeries {
            name: self.name.clone(),
            series_per_year: self.series_per_year,
            units_per_series: self.units_per_series,
            processing_minutes_per_unit: times.processing_minutes_per_unit,
            setup_minutes_per_series: times.setup_minutes_per_series,
        }
    }
}

/// 순서가 보존되는 생산 프로그램. 순서는 표시용이며 합계에는 영향이 없다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionProgram {
    pub rows: Vec<ProgramRow>,
}

impl ProductionProgram {
    pub fn new(rows: Vec<ProgramRow>) -> Self {
        Self { rows }
    }

    /// 지정한 기계 기준의 시리즈 목록.
    pub fn series_for(&self, kind: MachineKind) -> Vec<ProductionSeries> {
        self.rows.iter().map(|row| row.series_for(kind)).collect()
    }

    /// 연간 시리즈 수에 배율을 곱해 반올림한 프로그램을 만든다.
    ///
    /// 반올림 결과가 0인 행은 아무것도 생산하지 않으므로 제외한다.
    pub fn scaled(&self, factor: f64) -> ProductionProgram {
        let rows = self
            .rows
            .iter()
            .filter_map(|row| {
                let series_per_year = scale_count(row.series_per_year, factor);
                (series_per_year > 0).then(|| ProgramRow {
                    series_per_year,
                    ..row.clone()
                })
            })
            .collect();
        ProductionProgram { rows }
    }
}

fn scale_count(count: u32, factor: f64) -> u32 {
    // 동률은 짝수 쪽으로 반올림한다 (2.5 → 2)
    let scaled = (f64::from(count) * factor).round_ties_even();
    if scaled.is_finite() && scaled > 0.0 {
        // f64 → u32 변환은 상한에서 포화된다
        scaled as u32
    } else {
        0
    }
}
