//! Yahoo Finance 시계열 제공자.
//!
//! Yahoo Finance의 두 엔드포인트를 사용합니다:
//! - **spark** (`/v7/finance/spark`): 다중 심볼 배치 조회. 한 번의 요청으로
//!   심볼 전체의 종가 시퀀스를 받아 다중 심볼 테이블을 만듭니다.
//! - **chart**: 단일 심볼 조회. yahoo_finance_api 커넥터를 사용합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 미국 주식: "ABBV", "AAPL"
//! - 유럽 주식: "EDPR.LS", "AIR.PA"
//! - 지수: "^NDX", "^PSI20"
//! - 암호화폐 페어: "BTC-USD"
//! - 원자재 선물: "GC=F"

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use quotedeck_core::{Resolution, SeriesPoint, SeriesTable};

use crate::provider::SeriesProvider;
use crate::MarketError;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0";

/// Yahoo Finance 시계열 제공자.
pub struct YahooChartClient {
    http: reqwest::Client,
    connector: yahoo::YahooConnector,
    base_url: String,
}

impl YahooChartClient {
    /// 새로운 Yahoo Finance 제공자 생성.
    pub fn new(timeout: StdDuration) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::NetworkError(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self {
            http,
            connector,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// spark 엔드포인트 기본 URL을 교체합니다. 테스트에서 목 서버를
    /// 가리킬 때 사용합니다.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 룩백 기간을 Yahoo Finance range 문자열로 변환.
    ///
    /// range 파라미터 형식: "1d", "5d", "1mo", "3mo", "1y"
    pub fn range_for(lookback: chrono::Duration) -> &'static str {
        let days = lookback.num_days();
        if days <= 1 {
            "1d"
        } else if days <= 5 {
            "5d"
        } else if days <= 30 {
            "1mo"
        } else if days <= 90 {
            "3mo"
        } else {
            "1y"
        }
    }

    /// spark 엔드포인트로 다중 심볼 배치 조회.
    async fn fetch_spark(
        &self,
        symbols: &[String],
        interval: &str,
        range: &str,
    ) -> Result<SeriesTable, MarketError> {
        let url = format!("{}/v7/finance/spark", self.base_url);
        let joined = symbols.join(",");

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("symbols", joined.as_str()),
                ("range", range),
                ("interval", interval),
                ("includePrePost", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::ProviderError {
                code: status.as_u16() as i32,
                message: format!("spark 응답 실패: {}", status),
            });
        }

        let payload: SparkEnvelope = response.json().await?;
        Ok(spark_to_table(payload))
    }

    /// chart 엔드포인트로 단일 심볼 조회.
    async fn fetch_chart(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<SeriesTable, MarketError> {
        let response = self
            .connector
            .get_quote_range(symbol, interval, range)
            .await
            .map_err(|e| MarketError::ProviderError {
                code: 0,
                message: format!("Yahoo Finance API 오류 ({}): {}", symbol, e),
            })?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::ParseError(format!("Quote 파싱 오류: {}", e)))?;

        if quotes.is_empty() {
            warn!("Yahoo Finance: {} 데이터 없음", symbol);
            return Ok(SeriesTable::empty());
        }

        let mut points: Vec<SeriesPoint> = quotes
            .iter()
            .filter_map(|q| {
                Utc.timestamp_opt(q.timestamp, 0)
                    .single()
                    .map(|ts| SeriesPoint::new(ts, q.close))
            })
            .collect();
        points.sort_by_key(|p| p.ts);

        debug!("Yahoo Finance: {} 관측치 {}개 수신", symbol, points.len());
        Ok(SeriesTable::single(points))
    }
}

#[async_trait]
impl SeriesProvider for YahooChartClient {
    async fn fetch_series(
        &self,
        symbols: &[String],
        lookback: chrono::Duration,
        resolution: Resolution,
    ) -> Result<SeriesTable, MarketError> {
        if symbols.is_empty() {
            return Ok(SeriesTable::empty());
        }

        let interval = resolution.to_yahoo_interval();
        let range = Self::range_for(lookback);

        debug!(
            "Yahoo Finance: {}개 심볼 조회 (interval: {}, range: {})",
            symbols.len(),
            interval,
            range
        );

        if symbols.len() == 1 {
            self.fetch_chart(&symbols[0], interval, range).await
        } else {
            self.fetch_spark(symbols, interval, range).await
        }
    }
}

// ==================== Spark 응답 타입 ====================

#[derive(Debug, Deserialize)]
struct SparkEnvelope {
    spark: SparkResult,
}

#[derive(Debug, Deserialize)]
struct SparkResult {
    result: Option<Vec<SparkSymbol>>,
}

#[derive(Debug, Deserialize)]
struct SparkSymbol {
    symbol: String,
    response: Option<Vec<SparkChart>>,
}

#[derive(Debug, Deserialize)]
struct SparkChart {
    timestamp: Option<Vec<i64>>,
    indicators: Option<SparkIndicators>,
}

#[derive(Debug, Deserialize)]
struct SparkIndicators {
    #[serde(default)]
    quote: Vec<SparkQuote>,
}

#[derive(Debug, Deserialize)]
struct SparkQuote {
    close: Option<Vec<Option<f64>>>,
}

/// spark 페이로드를 다중 심볼 테이블로 변환.
///
/// 심볼별 첫 번째 차트 블록의 timestamp/close를 짝지어 시퀀스를
/// 만듭니다. 블록이 누락된 심볼은 빈 시퀀스로, null 종가는 갭으로
/// 들어갑니다.
fn spark_to_table(payload: SparkEnvelope) -> SeriesTable {
    let mut columns: HashMap<String, Vec<SeriesPoint>> = HashMap::new();

    for entry in payload.spark.result.unwrap_or_default() {
        let chart = entry.response.unwrap_or_default().into_iter().next();
        let Some(chart) = chart else {
            columns.insert(entry.symbol, Vec::new());
            continue;
        };

        let timestamps = chart.timestamp.unwrap_or_default();
        let closes = chart
            .indicators
            .and_then(|ind| ind.quote.into_iter().next())
            .and_then(|q| q.close)
            .unwrap_or_default();

        let points: Vec<SeriesPoint> = timestamps
            .iter()
            .zip(closes.iter())
            .filter_map(|(secs, close)| {
                Utc.timestamp_opt(*secs, 0)
                    .single()
                    .map(|ts| SeriesPoint { ts, close: *close })
            })
            .collect();

        columns.insert(entry.symbol, points);
    }

    SeriesTable::multi(columns)
}
