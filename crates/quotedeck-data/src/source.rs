//! 와치리스트 바이트 소스.
//!
//! 와치리스트 문서의 저장 위치는 배포 대상마다 다릅니다. 이 모듈은
//! "원시 와치리스트 바이트 로드" 능력 하나로 추상화하고 배포 대상별
//! 구현을 제공합니다:
//! - [`FileSource`]: 로컬 파일
//! - [`EphemeralSource`]: 읽기 전용 배포에서 시드 파일을 쓰기 가능한
//!   런타임 디렉토리로 복사한 뒤 읽는 모드
//! - [`StaticSource`]: 내장 기본 와치리스트

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use quotedeck_core::WatchlistConfig;

use crate::error::{DataError, Result};

/// 원시 와치리스트 바이트를 로드하는 능력.
pub trait WatchlistSource: Send + Sync {
    /// 로그용 소스 설명.
    fn describe(&self) -> String;

    /// 원시 바이트 로드.
    fn load(&self) -> Result<Vec<u8>>;
}

// ==================== 파일 소스 ====================

/// 로컬 파일에서 와치리스트를 읽는 소스.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatchlistSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn load(&self) -> Result<Vec<u8>> {
        read_watchlist_file(&self.path)
    }
}

// ==================== 임시 복사 소스 ====================

/// 읽기 전용 배포용 소스.
///
/// 런타임 디렉토리에 와치리스트가 없으면 시드 파일을 복사한 뒤
/// 읽습니다. 복사는 사본이 없을 때 한 번만 일어나며 이후에는 항상
/// 사본을 읽습니다.
pub struct EphemeralSource {
    seed: PathBuf,
    runtime_dir: PathBuf,
}

impl EphemeralSource {
    pub fn new(seed: impl Into<PathBuf>, runtime_dir: impl Into<PathBuf>) -> Self {
        Self {
            seed: seed.into(),
            runtime_dir: runtime_dir.into(),
        }
    }

    fn runtime_path(&self) -> PathBuf {
        self.runtime_dir.join("watchlist.json")
    }
}

impl WatchlistSource for EphemeralSource {
    fn describe(&self) -> String {
        format!("ephemeral:{}", self.runtime_path().display())
    }

    fn load(&self) -> Result<Vec<u8>> {
        let runtime_path = self.runtime_path();
        if !runtime_path.exists() {
            if !self.seed.exists() {
                return Err(DataError::SourceMissing(self.seed.display().to_string()));
            }
            fs::create_dir_all(&self.runtime_dir)?;
            fs::copy(&self.seed, &runtime_path)?;
            info!(
                seed = %self.seed.display(),
                runtime = %runtime_path.display(),
                "와치리스트 시드 복사 완료"
            );
        }
        read_watchlist_file(&runtime_path)
    }
}

// ==================== 내장 소스 ====================

/// 아무 설정도 없을 때 쓰는 기본 와치리스트.
const DEFAULT_WATCHLIST: &str = r#"{
    "stocks": ["ABBV", "DCGO", "IMDX", "EDPR.LS", "EGL.LS", "NOS.LS", "SMC"],
    "indices": ["^NDX", "^PSI20"],
    "commodities": ["GC=F", "ZC=F"],
    "crypto": ["BTC-USD", "ETH-USD", "SOL-USD"]
}"#;

/// 내장 기본 와치리스트 소스.
pub struct StaticSource {
    document: &'static str,
}

impl StaticSource {
    /// 내장 기본 문서를 쓰는 소스 생성.
    pub fn builtin() -> Self {
        Self {
            document: DEFAULT_WATCHLIST,
        }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WatchlistSource for StaticSource {
    fn describe(&self) -> String {
        "builtin".to_string()
    }

    fn load(&self) -> Result<Vec<u8>> {
        Ok(self.document.as_bytes().to_vec())
    }
}

fn read_watchlist_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DataError::SourceMissing(path.display().to_string())
        } else {
            DataError::Io(e.to_string())
        }
    })
}

/// 설정에 맞는 와치리스트 소스 선택.
///
/// 우선순위: 런타임 디렉토리(임시 복사 모드), 로컬 파일, 내장 기본값.
pub fn source_from_config(config: &WatchlistConfig) -> Arc<dyn WatchlistSource> {
    if let Some(runtime_dir) = &config.runtime_dir {
        let seed = config
            .seed_path
            .clone()
            .or_else(|| config.path.clone())
            .unwrap_or_else(|| "watchlist.json".to_string());
        let source = EphemeralSource::new(seed, runtime_dir);
        info!(source = %source.describe(), "와치리스트 소스 선택");
        return Arc::new(source);
    }
    if let Some(path) = &config.path {
        let source = FileSource::new(path);
        info!(source = %source.describe(), "와치리스트 소스 선택");
        return Arc::new(source);
    }
    info!(source = "builtin", "와치리스트 소스 선택");
    Arc::new(StaticSource::builtin())
}

// ==================== 테스트 ====================
