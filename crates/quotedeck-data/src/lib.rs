//! 와치리스트 데이터 및 시세 집계.
//!
//! 이 crate는 다음을 제공합니다:
//! - 와치리스트 정규화 (별칭 해석, 중복 제거, 정렬)
//! - 배포 대상별 와치리스트 소스 (파일 / 임시 복사 / 내장)
//! - 배치 조회 결과를 표시용 레코드로 집계하는 시세 서비스

pub mod error;
pub mod normalize;
pub mod service;
pub mod source;

pub use error::{DataError, Result};
pub use normalize::{normalize, AliasBook};
pub use service::{aggregate, resolve_last, PriceSource, QuoteService};
pub use source::{source_from_config, EphemeralSource, FileSource, StaticSource, WatchlistSource};
