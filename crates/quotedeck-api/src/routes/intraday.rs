//! 인트라데이 차트 endpoint.
//!
//! 종목 하나의 당일 5분봉 차트 데이터를 돌려줍니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/intraday/{ticker}` - 종목 인트라데이 차트

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use quotedeck_core::{round_display, Resolution};

use crate::state::AppState;

/// 인트라데이 차트 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntradayResponse {
    pub ok: bool,

    /// "HH:MM" 형식의 시각 라벨
    pub labels: Vec<String>,

    /// 라벨과 같은 길이의 가격 시퀀스
    pub prices: Vec<f64>,
}

/// 인트라데이 실패 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntradayError {
    pub ok: bool,
    pub error: String,
}

impl IntradayError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// 종목 인트라데이 차트 조회.
///
/// GET /api/intraday/{ticker}
///
/// 당일 5분봉을 "HH:MM" 라벨과 가격 시퀀스로 돌려줍니다. 갭은
/// 건너뛰어 라벨과 가격의 길이가 항상 같습니다. 실패는 상태 코드와
/// `ok: false` 봉투로 표현하며 예외를 전파하지 않습니다.
pub async fn get_intraday(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<IntradayResponse>, (StatusCode, Json<IntradayError>)> {
    let table = state
        .provider
        .fetch_series(
            &[ticker.clone()],
            Duration::days(1),
            Resolution::FiveMinute,
        )
        .await
        .map_err(|e| {
            warn!(ticker = %ticker, error = %e, "인트라데이 조회 실패");
            (StatusCode::BAD_GATEWAY, Json(IntradayError::new(e.to_string())))
        })?;

    let points = table.close_series(&ticker).unwrap_or(&[]);
    let mut labels = Vec::with_capacity(points.len());
    let mut prices = Vec::with_capacity(points.len());
    for point in points {
        if let Some(close) = point.valid_close() {
            labels.push(point.ts.format("%H:%M").to_string());
            prices.push(round_display(close, 4));
        }
    }

    if prices.is_empty() {
        debug!(ticker = %ticker, "인트라데이 데이터 없음");
        return Err((
            StatusCode::NOT_FOUND,
            Json(IntradayError::new("No intraday data")),
        ));
    }

    Ok(Json(IntradayResponse {
        ok: true,
        labels,
        prices,
    }))
}

/// 인트라데이 라우터 생성.
pub fn intraday_router() -> Router<Arc<AppState>> {
    Router::new().route("/intraday/{ticker}", get(get_intraday))
}
