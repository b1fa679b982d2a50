//! fine/coarse 이중 해상도 배치 페처.
//!
//! 와치리스트 전체를 두 번의 배치 호출(분봉 단기 + 일봉 장기)로
//! 조회합니다. 어느 쪽이 실패하든 해당 테이블만 빈 테이블로 대체하고
//! 에러는 전파하지 않습니다. 재시도/백오프/캐시는 두지 않습니다.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use quotedeck_core::{Resolution, SeriesTable};

use crate::provider::SeriesProvider;

/// 배치 조회 계획.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// fine 조회 룩백
    pub fine_lookback: Duration,
    /// fine 조회 해상도
    pub fine_resolution: Resolution,
    /// coarse 조회 룩백
    pub coarse_lookback: Duration,
    /// coarse 조회 해상도
    pub coarse_resolution: Resolution,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            fine_lookback: Duration::days(5),
            fine_resolution: Resolution::Minute,
            coarse_lookback: Duration::days(14),
            coarse_resolution: Resolution::Daily,
        }
    }
}

impl FetchPlan {
    /// 룩백 일수만 바꾼 계획을 생성합니다. 해상도는 기본값(fine 분봉,
    /// coarse 일봉)을 유지합니다.
    pub fn with_lookback_days(fine_days: i64, coarse_days: i64) -> Self {
        Self {
            fine_lookback: Duration::days(fine_days),
            coarse_lookback: Duration::days(coarse_days),
            ..Default::default()
        }
    }
}

/// 와치리스트 배치 페처.
pub struct BatchFetcher {
    provider: Arc<dyn SeriesProvider>,
    plan: FetchPlan,
}

impl BatchFetcher {
    /// 새 배치 페처 생성.
    pub fn new(provider: Arc<dyn SeriesProvider>, plan: FetchPlan) -> Self {
        Self { provider, plan }
    }

    /// 전체 심볼 배치를 fine/coarse 두 테이블로 조회.
    ///
    /// 외부 호출 수는 심볼 수와 무관하게 두 번입니다. 실패한 쪽은 빈
    /// 테이블로 내려가며, 호출자는 빈 테이블을 예외가 아니라 "데이터
    /// 없음"으로 다룹니다.
    pub async fn fetch_batch(&self, symbols: &[String]) -> (SeriesTable, SeriesTable) {
        if symbols.is_empty() {
            debug!("빈 심볼 배치, 조회 생략");
            return (SeriesTable::empty(), SeriesTable::empty());
        }

        let fine_fut =
            self.provider
                .fetch_series(symbols, self.plan.fine_lookback, self.plan.fine_resolution);
        let coarse_fut = self.provider.fetch_series(
            symbols,
            self.plan.coarse_lookback,
            self.plan.coarse_resolution,
        );
        let (fine, coarse) = tokio::join!(fine_fut, coarse_fut);

        let fine = fine.unwrap_or_else(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "fine 배치 조회 실패, 빈 테이블로 대체");
            SeriesTable::empty()
        });
        let coarse = coarse.unwrap_or_else(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "coarse 배치 조회 실패, 빈 테이블로 대체");
            SeriesTable::empty()
        });

        debug!(
            symbols = symbols.len(),
            fine_rows = fine.row_count(),
            coarse_rows = coarse.row_count(),
            "배치 조회 완료"
        );

        (fine, coarse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quotedeck_core::SeriesPoint;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::MarketError;

    struct StubProvider {
        calls: AtomicUsize,
        fail_fine: bool,
        fail_coarse: bool,
    }

    impl StubProvider {
        fn new(fail_fine: bool, fail_coarse: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_fine,
                fail_coarse,
            }
        }

        fn table_for(resolution: Resolution) -> SeriesTable {
            let close = if resolution == Resolution::Daily { 100.0 } else { 105.0 };
            let mut columns = HashMap::new();
            columns.insert(
                "ABBV".to_string(),
                vec![SeriesPoint::new(chrono::Utc::now(), close)],
            );
            SeriesTable::multi(columns)
        }
    }

    #[async_trait]
    impl SeriesProvider for StubProvider {
        async fn fetch_series(
            &self,
            _symbols: &[String],
            _lookback: Duration,
            resolution: Resolution,
        ) -> Result<SeriesTable, MarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = if resolution == Resolution::Daily {
                self.fail_coarse
            } else {
                self.fail_fine
            };
            if fail {
                return Err(MarketError::Timeout("stub timeout".to_string()));
            }
            Ok(Self::table_for(resolution))
        }
    }

    #[tokio::test]
    async fn test_fetch_batch_issues_two_calls_regardless_of_batch_size() {
        let provider = Arc::new(StubProvider::new(false, false));
        let fetcher = BatchFetcher::new(provider.clone(), FetchPlan::default());
        let symbols: Vec<String> = ["ABBV", "EGL.LS", "BTC-USD", "^NDX", "GC=F"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (fine, coarse) = fetcher.fetch_batch(&symbols).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert!(!fine.is_empty());
        assert!(!coarse.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_batch_degrades_failed_side_to_empty() {
        let provider = Arc::new(StubProvider::new(true, false));
        let fetcher = BatchFetcher::new(provider, FetchPlan::default());
        let symbols = vec!["ABBV".to_string()];

        let (fine, coarse) = fetcher.fetch_batch(&symbols).await;

        assert!(fine.is_empty());
        assert!(!coarse.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_batch_degrades_both_sides_independently() {
        let provider = Arc::new(StubProvider::new(true, true));
        let fetcher = BatchFetcher::new(provider, FetchPlan::default());
        let symbols = vec!["ABBV".to_string()];

        let (fine, coarse) = fetcher.fetch_batch(&symbols).await;

        assert!(fine.is_empty());
        assert!(coarse.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_batch_empty_symbols_makes_no_calls() {
        let provider = Arc::new(StubProvider::new(false, false));
        let fetcher = BatchFetcher::new(provider.clone(), FetchPlan::default());

        let (fine, coarse) = fetcher.fetch_batch(&[]).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(fine.is_empty());
        assert!(coarse.is_empty());
    }
}
