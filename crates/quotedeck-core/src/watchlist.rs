//! 와치리스트 도메인 타입 정의.
//!
//! 이 모듈은 파싱 전 원시 와치리스트 문서와 정규화된 항목 표현을 정의합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 종목 카테고리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// 개별 주식
    Stock,
    /// 시장 지수 (`^NDX` 등 접두사가 붙은 심볼)
    Index,
    /// 암호화폐 페어 (`BTC-USD` 등)
    Crypto,
    /// 원자재 선물 (`GC=F` 등)
    Commodity,
}

impl Category {
    /// 출력 정렬에 사용하는 고정 카테고리 순위를 반환합니다.
    ///
    /// 주식 → 지수 → 암호화폐 → 원자재 순서입니다.
    pub fn rank(&self) -> u8 {
        match self {
            Category::Stock => 0,
            Category::Index => 1,
            Category::Crypto => 2,
            Category::Commodity => 3,
        }
    }

    /// 직렬화에 쓰이는 대문자 표기를 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stock => "STOCK",
            Category::Index => "INDEX",
            Category::Crypto => "CRYPTO",
            Category::Commodity => "COMMODITY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 정규화된 와치리스트 항목.
///
/// 정규화 결과 안에서 `(category, ticker)` 쌍은 유일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// 종목 카테고리
    pub category: Category,
    /// 프로바이더 기준 정식 심볼
    pub ticker: String,
    /// 화면 표시용 이름
    pub display_name: String,
}

impl WatchlistEntry {
    /// 새 항목을 생성합니다.
    pub fn new(
        category: Category,
        ticker: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            ticker: ticker.into(),
            display_name: display_name.into(),
        }
    }

    /// 중복 제거에 쓰이는 `(category, ticker)` 키를 반환합니다.
    pub fn key(&self) -> (Category, &str) {
        (self.category, self.ticker.as_str())
    }
}

/// 파싱 전 원시 와치리스트 문서.
///
/// 네 필드 모두 생략할 수 있으며, 생략된 필드는 빈 리스트로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWatchlist {
    /// 주식 심볼 목록
    #[serde(default)]
    pub stocks: Vec<String>,
    /// 지수 심볼 목록
    #[serde(default)]
    pub indices: Vec<String>,
    /// 원자재 심볼 목록
    #[serde(default)]
    pub commodities: Vec<String>,
    /// 암호화폐 심볼/별칭 목록
    #[serde(default)]
    pub crypto: Vec<String>,
}

impl RawWatchlist {
    /// JSON 바이트에서 파싱합니다.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// 네 리스트가 모두 비었는지 여부를 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
            && self.indices.is_empty()
            && self.commodities.is_empty()
            && self.crypto.is_empty()
    }
}
