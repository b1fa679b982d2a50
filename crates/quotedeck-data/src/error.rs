//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 와치리스트 데이터 관련 오류.
///
/// 어떤 변형도 요청을 실패시키지 않습니다. 호출부는 모두 빈 목록이나
/// null 필드로 축소합니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 와치리스트 소스 없음
    #[error("Watchlist source missing: {0}")]
    SourceMissing(String),

    /// 입출력 오류
    #[error("IO error: {0}")]
    Io(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl DataError {
    /// 소스 부재로 인한 오류인지 확인.
    ///
    /// 부재는 빈 와치리스트로 동작하는 정상 상태이므로 호출부가
    /// 로그 레벨을 낮추는 데 씁니다.
    pub fn is_absence(&self) -> bool {
        matches!(self, DataError::SourceMissing(_))
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
