//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/quotes` - 와치리스트 전체 시세
//! - `/api/intraday/{ticker}` - 종목 인트라데이 차트

pub mod health;
pub mod intraday;
pub mod quotes;

pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use intraday::{intraday_router, IntradayError, IntradayResponse};
pub use quotes::{quotes_router, QuotesResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 시세 엔드포인트
        .nest("/api", quotes_router().merge(intraday_router()))
}
