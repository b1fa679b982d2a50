//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use quotedeck_data::QuoteService;
use quotedeck_market::SeriesProvider;

#[cfg(any(test, feature = "test-utils"))]
use quotedeck_core::{Resolution, SeriesTable};
#[cfg(any(test, feature = "test-utils"))]
use quotedeck_market::MarketError;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다. 요청 간 가변
/// 상태는 없으며 모든 필드는 불변 공유입니다.
#[derive(Clone)]
pub struct AppState {
    /// 시세 서비스 - 와치리스트 로드 및 배치 집계
    pub quotes: Arc<QuoteService>,

    /// 시계열 프로바이더 - 인트라데이 차트 조회용
    pub provider: Arc<dyn SeriesProvider>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(quotes: Arc<QuoteService>, provider: Arc<dyn SeriesProvider>) -> Self {
        Self {
            quotes,
            provider,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 고정 테이블을 돌려주는 테스트 프로바이더.
///
/// Daily 해상도 요청에는 `coarse`, 그 외에는 `fine` 테이블을
/// 돌려줍니다. 네트워크를 사용하지 않습니다.
#[cfg(any(test, feature = "test-utils"))]
pub struct FixtureProvider {
    pub fine: SeriesTable,
    pub coarse: SeriesTable,
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait::async_trait]
impl SeriesProvider for FixtureProvider {
    async fn fetch_series(
        &self,
        _symbols: &[String],
        _lookback: chrono::Duration,
        resolution: Resolution,
    ) -> Result<SeriesTable, MarketError> {
        Ok(if resolution == Resolution::Daily {
            self.coarse.clone()
        } else {
            self.fine.clone()
        })
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 빈 테이블을 돌려주는 프로바이더와 내장 와치리스트로 상태를
/// 구성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    create_test_state_with_tables(SeriesTable::empty(), SeriesTable::empty())
}

/// 고정 테이블을 지정하는 테스트용 AppState 생성 헬퍼.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state_with_tables(fine: SeriesTable, coarse: SeriesTable) -> AppState {
    use quotedeck_data::StaticSource;
    use quotedeck_market::FetchPlan;

    let provider: Arc<dyn SeriesProvider> = Arc::new(FixtureProvider { fine, coarse });
    let quotes = QuoteService::new(
        provider.clone(),
        Arc::new(StaticSource::builtin()),
        FetchPlan::default(),
    );
    AppState::new(Arc::new(quotes), provider)
}
