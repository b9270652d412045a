//! 자동화 설비 선택에 대한 투자 경제성(절감액, 회수기간, NPV) 계산.

pub mod comparison;
pub mod npv;
pub mod payback;
pub mod projection;

pub use comparison::*;
pub use npv::*;
pub use payback::*;
pub use projection::*;
