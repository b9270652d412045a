//! 생산량 배율별 손익분기 곡선과 단일 파라미터 민감도 분석.

pub mod break_even;
pub mod parameter;

pub use break_even::*;
pub use parameter::*;

/// `start`부터 `end`까지(양끝 포함) 균등 간격 `samples`개.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
