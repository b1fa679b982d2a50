//! 시계열 테이블 구조체.
//!
//! 배치 조회 결과를 담는 읽기 전용 구조입니다. 단일 심볼 조회와 다중
//! 심볼 조회는 프로바이더가 돌려주는 컬럼 구조가 다르므로, 런타임 추론
//! 대신 명시적 변형으로 구분합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 조회 해상도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// 1분봉
    Minute,
    /// 5분봉
    FiveMinute,
    /// 일봉
    Daily,
}

impl Resolution {
    /// Yahoo Finance interval 문자열로 변환합니다.
    pub fn to_yahoo_interval(&self) -> &'static str {
        match self {
            Resolution::Minute => "1m",
            Resolution::FiveMinute => "5m",
            Resolution::Daily => "1d",
        }
    }

    /// 장중 해상도 여부를 반환합니다.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Resolution::Minute | Resolution::FiveMinute)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_yahoo_interval())
    }
}

/// 시계열 관측치 하나.
///
/// `close`가 None이면 해당 시점은 결측(갭)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 관측 시각 (UTC)
    pub ts: DateTime<Utc>,
    /// 종가
    pub close: Option<f64>,
}

impl SeriesPoint {
    /// 관측치를 생성합니다.
    pub fn new(ts: DateTime<Utc>, close: f64) -> Self {
        Self {
            ts,
            close: Some(close),
        }
    }

    /// 결측 관측치를 생성합니다.
    pub fn gap(ts: DateTime<Utc>) -> Self {
        Self { ts, close: None }
    }

    /// 유효한 종가를 반환합니다. 갭과 비정상 값(NaN/무한대)은 None입니다.
    pub fn valid_close(&self) -> Option<f64> {
        self.close.filter(|c| c.is_finite())
    }
}

/// 배치 조회 결과 테이블.
///
/// 프로바이더 실패나 데이터 부재는 `Empty`로 들어오며, 호출자는 이를
/// 예외가 아니라 "데이터 없음"으로 다룹니다. 테이블은 생성 후 변경되지
/// 않습니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SeriesTable {
    /// 데이터 없음
    #[default]
    Empty,
    /// 단일 심볼 조회 결과. 심볼 키 없이 Close 시퀀스 하나만 담습니다.
    Single(Vec<SeriesPoint>),
    /// 다중 심볼 조회 결과. 심볼별 Close 시퀀스를 담습니다.
    Multi(HashMap<String, Vec<SeriesPoint>>),
}

impl SeriesTable {
    /// 빈 테이블을 생성합니다.
    pub fn empty() -> Self {
        SeriesTable::Empty
    }

    /// 단일 심볼 테이블을 생성합니다.
    pub fn single(points: Vec<SeriesPoint>) -> Self {
        SeriesTable::Single(points)
    }

    /// 다중 심볼 테이블을 생성합니다.
    pub fn multi(columns: HashMap<String, Vec<SeriesPoint>>) -> Self {
        SeriesTable::Multi(columns)
    }

    /// 행이 하나도 없는지 여부를 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// 전체 행 수를 반환합니다.
    pub fn row_count(&self) -> usize {
        match self {
            SeriesTable::Empty => 0,
            SeriesTable::Single(points) => points.len(),
            SeriesTable::Multi(columns) => columns.values().map(Vec::len).sum(),
        }
    }

    /// 심볼의 Close 시퀀스를 조회합니다.
    ///
    /// 변형 구분은 테이블의 컬럼 구조로만 이루어집니다. 단일 심볼
    /// 테이블은 요청 심볼과 무관하게 유일한 시퀀스를 돌려주고, 다중
    /// 심볼 테이블은 심볼 키가 없으면 None을 돌려줍니다.
    pub fn close_series(&self, symbol: &str) -> Option<&[SeriesPoint]> {
        match self {
            SeriesTable::Empty => None,
            SeriesTable::Single(points) => Some(points),
            SeriesTable::Multi(columns) => columns.get(symbol).map(Vec::as_slice),
        }
    }
}
