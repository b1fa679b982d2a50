//! 시장 데이터 조회.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - SeriesProvider trait: 배치 시계열 조회 인터페이스
//! - Yahoo Finance 차트/스파크 클라이언트
//! - fine/coarse 이중 해상도 배치 페처
//! - 에러 타입 및 변환

pub mod batch;
pub mod error;
pub mod provider;
pub mod yahoo;

pub use batch::{BatchFetcher, FetchPlan};
pub use error::*;
pub use provider::SeriesProvider;
pub use yahoo::YahooChartClient;
