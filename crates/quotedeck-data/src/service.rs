//! 시세 서비스.
//!
//! 와치리스트 로드, 배치 조회, 레코드 집계 파이프라인을 조립합니다.
//! 요청마다 전체를 새로 계산하며 요청 간 공유 상태가 없습니다.

use std::sync::Arc;

use tracing::{debug, warn};

use quotedeck_core::{
    display_precision, extract, guess_currency, round_display, QuoteRecord, RawWatchlist,
    SeriesTable, WatchlistEntry, PCT_DECIMALS,
};
use quotedeck_market::{BatchFetcher, FetchPlan, SeriesProvider};

use crate::normalize::{normalize, AliasBook};
use crate::source::WatchlistSource;

/// 마지막 가격의 출처.
///
/// coarse 폴백 치환은 와이어 출력에 드러나지 않지만 내부적으로는
/// 구분해 둡니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// fine 테이블에서 추출
    Fine,
    /// fine에 값이 없어 coarse 테이블 종가로 대체
    CoarseFallback,
}

/// 와치리스트 시세 서비스.
pub struct QuoteService {
    fetcher: BatchFetcher,
    aliases: AliasBook,
    source: Arc<dyn WatchlistSource>,
}

impl QuoteService {
    /// 새 시세 서비스를 생성합니다.
    pub fn new(
        provider: Arc<dyn SeriesProvider>,
        source: Arc<dyn WatchlistSource>,
        plan: FetchPlan,
    ) -> Self {
        Self {
            fetcher: BatchFetcher::new(provider, plan),
            aliases: AliasBook::builtin(),
            source,
        }
    }

    /// 와치리스트를 로드하고 정규화합니다.
    ///
    /// 소스 부재와 파싱 실패는 모두 빈 목록으로 축소됩니다. 빈
    /// 와치리스트는 유효한 상태입니다.
    pub fn load_watchlist(&self) -> Vec<WatchlistEntry> {
        let raw = match self.load_raw() {
            Ok(raw) => raw,
            Err(e) if e.is_absence() => {
                debug!(source = %self.source.describe(), error = %e, "와치리스트 소스 없음, 빈 목록 사용");
                return Vec::new();
            }
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "와치리스트 로드 실패, 빈 목록 사용");
                return Vec::new();
            }
        };
        normalize(&raw, &self.aliases)
    }

    /// 소스 상태를 확인합니다. 헬스체크용으로 항목 수 또는 오류
    /// 메시지를 돌려줍니다.
    pub fn source_health(&self) -> std::result::Result<usize, String> {
        match self.load_raw() {
            Ok(raw) => Ok(normalize(&raw, &self.aliases).len()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn load_raw(&self) -> crate::error::Result<RawWatchlist> {
        let bytes = self.source.load()?;
        Ok(RawWatchlist::from_json_slice(&bytes)?)
    }

    /// 전체 와치리스트의 시세 스냅샷을 생성합니다.
    pub async fn snapshot(&self) -> Vec<QuoteRecord> {
        let entries = self.load_watchlist();
        self.quote_entries(&entries).await
    }

    /// 주어진 항목 목록의 시세 레코드를 생성합니다.
    pub async fn quote_entries(&self, entries: &[WatchlistEntry]) -> Vec<QuoteRecord> {
        let symbols: Vec<String> = entries.iter().map(|e| e.ticker.clone()).collect();
        let (fine, coarse) = self.fetcher.fetch_batch(&symbols).await;
        aggregate(entries, &fine, &coarse)
    }
}

/// fine 우선, coarse 폴백으로 마지막 가격을 결정합니다.
pub fn resolve_last(
    fine: &SeriesTable,
    coarse: &SeriesTable,
    ticker: &str,
) -> Option<(f64, PriceSource)> {
    if let Some(last) = extract::last_close(fine, ticker) {
        return Some((last, PriceSource::Fine));
    }
    extract::last_close(coarse, ticker).map(|last| (last, PriceSource::CoarseFallback))
}

/// 항목별 시세 레코드를 집계합니다.
///
/// 출력의 순서와 길이는 입력 항목과 정확히 일치합니다. 마지막 가격이
/// 없거나 직전 참조가 없거나 0이면 세 수치 필드가 모두 null인 레코드를
/// 냅니다. 어떤 항목의 데이터 부재도 배치 전체를 중단시키지 않습니다.
pub fn aggregate(
    entries: &[WatchlistEntry],
    fine: &SeriesTable,
    coarse: &SeriesTable,
) -> Vec<QuoteRecord> {
    entries
        .iter()
        .map(|entry| build_record(entry, fine, coarse))
        .collect()
}

fn build_record(entry: &WatchlistEntry, fine: &SeriesTable, coarse: &SeriesTable) -> QuoteRecord {
    let last = resolve_last(fine, coarse, &entry.ticker);
    let prev = extract::previous_close(coarse, &entry.ticker);

    let (price, change, change_pct) = match (last, prev) {
        (Some((last, _)), Some(prev)) if prev != 0.0 => {
            let decimals = display_precision(&entry.ticker, last);
            let change = last - prev;
            let change_pct = (change / prev) * 100.0;
            (
                Some(round_display(last, decimals)),
                Some(round_display(change, decimals)),
                Some(round_display(change_pct, PCT_DECIMALS)),
            )
        }
        // 마지막 가격 부재, 직전 참조 부재, 0 참조는 모두 동일하게
        // null 레코드로 귀결된다
        _ => (None, None, None),
    };

    QuoteRecord {
        category: entry.category,
        ticker: entry.ticker.clone(),
        name: entry.display_name.clone(),
        currency: guess_currency(&entry.ticker).to_string(),
        price,
        change,
        change_pct,
    }
}

// ==================== 테스트 ====================
