//! 시계열 프로바이더 인터페이스.
//!
//! 배치 시계열 조회의 통합 인터페이스를 제공합니다. 구현체는 전체 심볼
//! 목록을 한 번의 요청으로 조회해, 외부 호출 수를 와치리스트 크기와
//! 무관하게 유지해야 합니다.

use async_trait::async_trait;
use chrono::Duration;

use quotedeck_core::{Resolution, SeriesTable};

use crate::MarketError;

/// 배치 시계열 조회 trait.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// 심볼 배치의 종가 시계열 조회.
    ///
    /// # 인자
    /// * `symbols` - 프로바이더 형식 심볼 목록 (예: "ABBV", "BTC-USD", "^NDX")
    /// * `lookback` - 현재 시각 기준 조회 기간
    /// * `resolution` - 조회 해상도
    ///
    /// 심볼 일부가 누락되거나 행에 갭이 있는 것은 에러가 아닙니다.
    /// 에러는 요청 자체가 실패한 경우에만 반환합니다.
    async fn fetch_series(
        &self,
        symbols: &[String],
        lookback: Duration,
        resolution: Resolution,
    ) -> Result<SeriesTable, MarketError>;
}
