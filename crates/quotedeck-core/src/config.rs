//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다. 설정 파일과
//! 환경 변수 어느 쪽도 없으면 기본값으로 동작합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 와치리스트 소스 설정
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    /// 배치 조회 설정
    #[serde(default)]
    pub fetch: FetchConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// 와치리스트 소스 설정.
///
/// `runtime_dir`가 지정되면 시드 파일을 런타임 디렉토리로 복사해 읽는
/// 임시 저장 모드로 동작합니다. `path`만 지정되면 해당 파일을 직접
/// 읽고, 둘 다 없으면 내장 기본 와치리스트를 사용합니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WatchlistConfig {
    /// 로컬 와치리스트 파일 경로
    #[serde(default)]
    pub path: Option<String>,
    /// 쓰기 가능한 런타임 디렉토리 (서버리스 배포용)
    #[serde(default)]
    pub runtime_dir: Option<String>,
    /// 런타임 디렉토리에 시드할 원본 파일 경로
    #[serde(default)]
    pub seed_path: Option<String>,
}

/// 배치 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// 분봉(fine) 조회 룩백 일수
    #[serde(default = "default_fine_lookback_days")]
    pub fine_lookback_days: i64,
    /// 일봉(coarse) 조회 룩백 일수
    #[serde(default = "default_coarse_lookback_days")]
    pub coarse_lookback_days: i64,
    /// 프로바이더 HTTP 타임아웃 (초)
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fine_lookback_days: default_fine_lookback_days(),
            coarse_lookback_days: default_coarse_lookback_days(),
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fine_lookback_days() -> i64 {
    5
}
fn default_coarse_lookback_days() -> i64 {
    14
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 실패하지 않습니다. 환경 변수는
    /// `QUOTEDECK__SERVER__PORT=8080` 형식으로 중첩 키를 지정합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // 파일에서 로드 (없으면 건너뜀)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("QUOTEDECK")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
