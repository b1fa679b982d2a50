//! 와치리스트 시세 endpoint.
//!
//! 와치리스트 전체의 시세 스냅샷을 한 번에 돌려줍니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/quotes` - 와치리스트 전체 시세

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use quotedeck_core::QuoteRecord;

use crate::state::AppState;

/// 와치리스트 시세 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuotesResponse {
    /// 스냅샷 생성 시각 (ISO 8601, UTC)
    pub asof: String,

    /// 와치리스트 순서 그대로의 시세 레코드
    pub items: Vec<QuoteRecord>,
}

/// 와치리스트 전체 시세 조회.
///
/// GET /api/quotes
///
/// 데이터가 없는 항목도 null 필드로 항상 포함됩니다. 프로바이더 장애
/// 시에도 200과 전체 항목을 돌려줍니다.
pub async fn get_quotes(State(state): State<Arc<AppState>>) -> Json<QuotesResponse> {
    let items = state.quotes.snapshot().await;
    debug!(count = items.len(), "시세 스냅샷 응답");

    Json(QuotesResponse {
        asof: Utc::now().to_rfc3339(),
        items,
    })
}

/// 시세 라우터 생성.
pub fn quotes_router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes", get(get_quotes))
}
