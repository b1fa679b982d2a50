//! 시장 데이터 에러 타입.

use thiserror::Error;

/// 시장 데이터 조회 관련 에러.
#[derive(Debug, Error)]
pub enum MarketError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 프로바이더 API 에러
    #[error("Provider error {code}: {message}")]
    ProviderError { code: i32, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 알 수 없는 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl MarketError {
    /// 재시도 가능한 에러인지 확인.
    ///
    /// 이 파이프라인은 재시도하지 않으므로 운영 로그 힌트로만 씁니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MarketError::NetworkError(_) | MarketError::Timeout(_))
    }
}

impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MarketError::Timeout(err.to_string())
        } else if err.is_connect() {
            MarketError::NetworkError(err.to_string())
        } else if err.is_decode() {
            MarketError::ParseError(err.to_string())
        } else {
            MarketError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        MarketError::ParseError(err.to_string())
    }
}
