//! 시세 레코드 및 표시 정밀도 정책.
//!
//! 이 모듈은 `/api/quotes` 응답 항목 타입과 가격/변동값의 표시용
//! 반올림 규칙을 정의합니다. 반올림은 화면 표시용이며 정산 용도가
//! 아닙니다.

use crate::watchlist::Category;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 변동률에 항상 적용되는 소수 자릿수.
pub const PCT_DECIMALS: u32 = 2;

/// 와치리스트 항목 하나의 시세 레코드.
///
/// 데이터가 없으면 `price`/`change`/`change_pct`가 모두 null로 내려가며,
/// 레코드 자체는 절대 생략되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// 종목 카테고리
    pub category: Category,
    /// 프로바이더 기준 정식 심볼
    pub ticker: String,
    /// 화면 표시용 이름
    pub name: String,
    /// 추정 통화 코드
    pub currency: String,
    /// 마지막 관측 가격
    pub price: Option<f64>,
    /// 직전 참조 가격 대비 변동
    pub change: Option<f64>,
    /// 변동률 (%)
    pub change_pct: Option<f64>,
}

/// 티커가 암호화폐 페어 표기인지 여부를 반환합니다.
///
/// `BTC-USD`처럼 세 글자 이상의 대문자 호가통화 접미사가 붙은 형태를
/// 페어로 간주합니다. `BRK-B` 같은 주식 클래스 접미사는 제외됩니다.
pub fn is_crypto_pair(ticker: &str) -> bool {
    match ticker.rsplit_once('-') {
        Some((base, quote)) => {
            !base.is_empty() && quote.len() >= 3 && quote.chars().all(|c| c.is_ascii_uppercase())
        }
        None => false,
    }
}

/// 티커가 지수 표기(`^` 접두사)인지 여부를 반환합니다.
pub fn is_index_symbol(ticker: &str) -> bool {
    ticker.starts_with('^')
}

/// 가격과 변동값에 적용할 표시 소수 자릿수를 반환합니다.
///
/// 암호화폐 페어, 지수, 절대값 1 미만 가격은 4자리, 그 외는 2자리입니다.
pub fn display_precision(ticker: &str, price: f64) -> u32 {
    if is_crypto_pair(ticker) || is_index_symbol(ticker) || price.abs() < 1.0 {
        4
    } else {
        2
    }
}

/// 표시용 반올림을 수행합니다.
///
/// f64의 최단 왕복 십진 표현을 `Decimal`로 파싱한 뒤 반올림합니다.
/// 이진 전개를 그대로 쓰면 0.12345가 0.1234로 내려가는 식의 오차가
/// 생기므로 십진 표현을 기준으로 삼습니다. 중간값은 0에서 멀어지는
/// 방향으로 반올림합니다.
pub fn round_display(value: f64, decimals: u32) -> f64 {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// 심볼 접미사로 표시 통화를 추정합니다.
///
/// 거래소 접미사가 없으면 USD로 간주합니다.
pub fn guess_currency(ticker: &str) -> &'static str {
    if ticker.ends_with(".LS")
        || ticker.ends_with(".PA")
        || ticker.ends_with(".AS")
        || ticker.ends_with(".BR")
        || ticker.ends_with(".MI")
        || ticker.ends_with(".DE")
        || ticker.ends_with(".F")
    {
        "EUR"
    } else if ticker.ends_with(".L") {
        "GBP"
    } else if ticker.ends_with(".T") {
        "JPY"
    } else if ticker.ends_with(".KS") || ticker.ends_with(".KQ") {
        "KRW"
    } else {
        "USD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_crypto_pair() {
        assert!(is_crypto_pair("BTC-USD"));
        assert!(is_crypto_pair("SOL-USD"));
        assert!(is_crypto_pair("ETH-EUR"));
        assert!(!is_crypto_pair("BRK-B"));
        assert!(!is_crypto_pair("ABBV"));
        assert!(!is_crypto_pair("-USD"));
        assert!(!is_crypto_pair("GC=F"));
    }

    #[test]
    fn test_is_index_symbol() {
        assert!(is_index_symbol("^NDX"));
        assert!(is_index_symbol("^PSI20"));
        assert!(!is_index_symbol("ABBV"));
    }

    #[test]
    fn test_display_precision_crypto_any_magnitude() {
        assert_eq!(display_precision("BTC-USD", 43250.0), 4);
        assert_eq!(display_precision("BTC-USD", 0.12345), 4);
    }

    #[test]
    fn test_display_precision_index_and_low_price() {
        assert_eq!(display_precision("^NDX", 18500.0), 4);
        assert_eq!(display_precision("EGL.LS", 0.55), 4);
    }

    #[test]
    fn test_display_precision_default_two() {
        assert_eq!(display_precision("ABBV", 182.4), 2);
        assert_eq!(display_precision("GC=F", 2700.0), 2);
    }

    #[test]
    fn test_round_display_midpoint_away_from_zero() {
        assert_eq!(round_display(0.12345, 4), 0.1235);
        assert_eq!(round_display(2.675, 2), 2.68);
        assert_eq!(round_display(-0.125, 2), -0.13);
        assert_eq!(round_display(5.0, 2), 5.0);
    }

    #[test]
    fn test_guess_currency_by_suffix() {
        assert_eq!(guess_currency("EDPR.LS"), "EUR");
        assert_eq!(guess_currency("AIR.PA"), "EUR");
        assert_eq!(guess_currency("VOD.L"), "GBP");
        assert_eq!(guess_currency("7203.T"), "JPY");
        assert_eq!(guess_currency("005930.KS"), "KRW");
        assert_eq!(guess_currency("ABBV"), "USD");
        assert_eq!(guess_currency("BTC-USD"), "USD");
    }

    #[test]
    fn test_quote_record_serializes_nulls() {
        let record = QuoteRecord {
            category: Category::Stock,
            ticker: "ABBV".to_string(),
            name: "ABBV".to_string(),
            currency: "USD".to_string(),
            price: None,
            change: None,
            change_pct: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "STOCK");
        assert!(json["price"].is_null());
        assert!(json["change"].is_null());
        assert!(json["change_pct"].is_null());
    }

    proptest! {
        #[test]
        fn prop_round_display_is_idempotent(value in -1.0e9f64..1.0e9f64, decimals in 0u32..6) {
            let rounded = round_display(value, decimals);
            prop_assert_eq!(round_display(rounded, decimals), rounded);
        }

        #[test]
        fn prop_display_precision_is_two_or_four(price in -1.0e9f64..1.0e9f64) {
            let dp = display_precision("ABBV", price);
            prop_assert!(dp == 2 || dp == 4);
        }
    }
}
