//! # Quotedeck Core
//!
//! 와치리스트 시세 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시세 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 와치리스트 항목 및 카테고리 정의
//! - 시세 레코드와 표시 정밀도 정책
//! - 시계열 테이블 구조체
//! - 가격 추출 로직
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod extract;
pub mod logging;
pub mod quote;
pub mod series;
pub mod watchlist;

pub use config::*;
pub use extract::*;
pub use logging::*;
pub use quote::*;
pub use series::*;
pub use watchlist::*;
