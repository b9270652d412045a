//! 기계 단위 입력과 기계시간당 비용률(MSS) 계산 모듈 모음.

pub mod parameters;
pub mod rates;

pub use parameters::*;
pub use rates::*;
