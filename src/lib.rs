//! 계산 로직을 라이브러리로 분리하여 CLI 외의 표현 계층(보고서, 차트)에서도 재사용한다.
//!
//! 수동 기계(A)와 자동화 설비(B)의 기계시간당 비용률, 생산 프로그램 원가,
//! 용량 점검, 투자 회수/NPV, 손익분기와 민감도를 계산한다.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod evaluation;
pub mod i18n;
pub mod investment;
pub mod machine;
pub mod program;
pub mod scenario;
pub mod sensitivity;
pub mod ui_cli;
