//! 생산 프로그램(시리즈 목록)의 원가 계산과 설비 용량 점검.

pub mod capacity;
pub mod costing;
pub mod series;

pub use capacity::*;
pub use costing::*;
pub use series::*;
