//! 와치리스트 정규화.
//!
//! 원시 와치리스트 문서를 중복 없는 정식 심볼 목록으로 변환합니다.
//!
//! 변환 규칙:
//! - 주식/원자재: 공백 제거 후 대문자화
//! - 지수: 공백만 제거 (`^` 접두사 형식 유지)
//! - 암호화폐: 소문자로 별칭 테이블 조회. 미등록 입력은 대문자화하고
//!   순수 알파벳이면 `-USD` 접미사를 붙입니다.
//! - `(카테고리, 티커)` 중복은 첫 항목만 유지
//! - 카테고리 순위(주식, 지수, 암호화폐, 원자재 순) 뒤 티커 사전순 정렬

use std::collections::{HashMap, HashSet};

use quotedeck_core::{Category, RawWatchlist, WatchlistEntry};

// ==================== 암호화폐 별칭 테이블 ====================

const CRYPTO_ALIASES: &[(&str, &str)] = &[
    ("btc", "BTC-USD"),
    ("bitcoin", "BTC-USD"),
    ("eth", "ETH-USD"),
    ("ethereum", "ETH-USD"),
    ("sol", "SOL-USD"),
    ("solana", "SOL-USD"),
    ("ada", "ADA-USD"),
    ("cardano", "ADA-USD"),
    ("xrp", "XRP-USD"),
    ("ripple", "XRP-USD"),
];

const CRYPTO_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("BTC-USD", "Bitcoin"),
    ("ETH-USD", "Ethereum"),
    ("SOL-USD", "Solana"),
    ("ADA-USD", "Cardano"),
    ("XRP-USD", "XRP"),
];

/// 암호화폐 별칭/표시명 테이블.
///
/// 프로세스 시작 시 한 번 만들어 참조로 전달하는 불변 데이터입니다.
pub struct AliasBook {
    aliases: HashMap<&'static str, &'static str>,
    display_names: HashMap<&'static str, &'static str>,
}

impl Default for AliasBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasBook {
    /// 내장 별칭 테이블 생성.
    pub fn builtin() -> Self {
        Self {
            aliases: CRYPTO_ALIASES.iter().copied().collect(),
            display_names: CRYPTO_DISPLAY_NAMES.iter().copied().collect(),
        }
    }

    /// 자유 형식 입력을 정식 암호화폐 페어 심볼로 변환.
    pub fn canonical_ticker(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        if let Some(ticker) = self.aliases.get(lowered.as_str()) {
            return (*ticker).to_string();
        }

        let upper = input.to_uppercase();
        if !upper.is_empty() && upper.chars().all(|c| c.is_ascii_alphabetic()) {
            format!("{}-USD", upper)
        } else {
            upper
        }
    }

    /// 정식 심볼의 표시명 조회.
    ///
    /// 등록된 심볼은 친숙한 이름을, 그 외는 원래 입력의 첫 글자만
    /// 대문자화한 형태를 돌려줍니다.
    pub fn display_name(&self, ticker: &str, original: &str) -> String {
        match self.display_names.get(ticker) {
            Some(name) => (*name).to_string(),
            None => capitalize(original),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// 원시 와치리스트를 정규화된 항목 목록으로 변환.
///
/// 공백뿐인 항목은 조용히 건너뛰며 오류를 내지 않습니다. 빈 결과도
/// 유효한 상태입니다.
pub fn normalize(raw: &RawWatchlist, aliases: &AliasBook) -> Vec<WatchlistEntry> {
    let mut entries: Vec<WatchlistEntry> = Vec::new();
    let mut seen: HashSet<(Category, String)> = HashSet::new();

    for input in &raw.stocks {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        let ticker = trimmed.to_uppercase();
        push_unique(
            &mut entries,
            &mut seen,
            WatchlistEntry::new(Category::Stock, ticker.clone(), ticker),
        );
    }

    for input in &raw.indices {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        // 지수 심볼은 프로바이더 표기를 그대로 쓰므로 대소문자를 유지
        push_unique(
            &mut entries,
            &mut seen,
            WatchlistEntry::new(Category::Index, trimmed, trimmed),
        );
    }

    for input in &raw.commodities {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        let ticker = trimmed.to_uppercase();
        push_unique(
            &mut entries,
            &mut seen,
            WatchlistEntry::new(Category::Commodity, ticker.clone(), ticker),
        );
    }

    for input in &raw.crypto {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        let ticker = aliases.canonical_ticker(trimmed);
        let name = aliases.display_name(&ticker, trimmed);
        push_unique(
            &mut entries,
            &mut seen,
            WatchlistEntry::new(Category::Crypto, ticker, name),
        );
    }

    entries.sort_by(|a, b| {
        a.category
            .rank()
            .cmp(&b.category.rank())
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    entries
}

fn push_unique(
    entries: &mut Vec<WatchlistEntry>,
    seen: &mut HashSet<(Category, String)>,
    entry: WatchlistEntry,
) {
    if seen.insert((entry.category, entry.ticker.clone())) {
        entries.push(entry);
    }
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(stocks: &[&str], indices: &[&str], commodities: &[&str], crypto: &[&str]) -> RawWatchlist {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        RawWatchlist {
            stocks: owned(stocks),
            indices: owned(indices),
            commodities: owned(commodities),
            crypto: owned(crypto),
        }
    }

    #[test]
    fn test_normalize_trims_uppercases_and_drops_blank() {
        let raw = raw(&[" abbv ", "", "   "], &[], &["gc=f"], &[]);
        let entries = normalize(&raw, &AliasBook::builtin());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, Category::Stock);
        assert_eq!(entries[0].ticker, "ABBV");
        assert_eq!(entries[0].display_name, "ABBV");
        assert_eq!(entries[1].category, Category::Commodity);
        assert_eq!(entries[1].ticker, "GC=F");
    }

    #[test]
    fn test_normalize_preserves_index_symbols() {
        let raw = raw(&[], &[" ^NDX ", "^PSI20"], &[], &[]);
        let entries = normalize(&raw, &AliasBook::builtin());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ticker, "^NDX");
        assert_eq!(entries[1].ticker, "^PSI20");
    }

    #[test]
    fn test_normalize_resolves_crypto_aliases() {
        let raw = raw(&[], &[], &[], &["btc", "Bitcoin", "SOL", "ethereum"]);
        let entries = normalize(&raw, &AliasBook::builtin());

        // btc와 Bitcoin은 같은 BTC-USD로 합쳐진다
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].ticker, "BTC-USD");
        assert_eq!(entries[0].display_name, "Bitcoin");
        assert_eq!(entries[1].ticker, "ETH-USD");
        assert_eq!(entries[1].display_name, "Ethereum");
        assert_eq!(entries[2].ticker, "SOL-USD");
        assert_eq!(entries[2].display_name, "Solana");
    }

    #[test]
    fn test_normalize_unknown_crypto_gets_usd_suffix() {
        let raw = raw(&[], &[], &[], &["doge", "BTC-EUR"]);
        let entries = normalize(&raw, &AliasBook::builtin());

        assert_eq!(entries.len(), 2);
        // 이미 페어 형태인 입력은 접미사를 다시 붙이지 않는다
        assert_eq!(entries[0].ticker, "BTC-EUR");
        assert_eq!(entries[0].display_name, "Btc-eur");
        assert_eq!(entries[1].ticker, "DOGE-USD");
        assert_eq!(entries[1].display_name, "Doge");
    }

    #[test]
    fn test_normalize_dedup_keeps_first_entry() {
        let raw = raw(&["abbv", " ABBV", "dcgo"], &[], &[], &["btc", "bitcoin"]);
        let entries = normalize(&raw, &AliasBook::builtin());

        let stocks: Vec<_> = entries
            .iter()
            .filter(|e| e.category == Category::Stock)
            .map(|e| e.ticker.as_str())
            .collect();
        assert_eq!(stocks, vec!["ABBV", "DCGO"]);

        let crypto: Vec<_> = entries
            .iter()
            .filter(|e| e.category == Category::Crypto)
            .map(|e| e.ticker.as_str())
            .collect();
        assert_eq!(crypto, vec!["BTC-USD"]);
    }

    #[test]
    fn test_normalize_same_ticker_in_two_categories_kept() {
        let raw = raw(&["SMC"], &[], &["SMC"], &[]);
        let entries = normalize(&raw, &AliasBook::builtin());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, Category::Stock);
        assert_eq!(entries[1].category, Category::Commodity);
    }

    #[test]
    fn test_normalize_sorts_by_rank_then_ticker() {
        let raw = raw(
            &["smc", "abbv"],
            &["^PSI20", "^NDX"],
            &["ZC=F", "GC=F"],
            &["eth", "btc"],
        );
        let entries = normalize(&raw, &AliasBook::builtin());

        let tickers: Vec<_> = entries.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(
            tickers,
            vec!["ABBV", "SMC", "^NDX", "^PSI20", "BTC-USD", "ETH-USD", "GC=F", "ZC=F"]
        );
    }

    #[test]
    fn test_canonical_ticker_passthrough_for_pair_form() {
        let book = AliasBook::builtin();
        assert_eq!(book.canonical_ticker("BTC-USD"), "BTC-USD");
        assert_eq!(book.canonical_ticker("ripple"), "XRP-USD");
        assert_eq!(book.display_name("XRP-USD", "ripple"), "XRP");
    }

    proptest! {
        #[test]
        fn prop_normalize_has_no_duplicate_keys(
            stocks in proptest::collection::vec("[a-zA-Z ]{0,6}", 0..8),
            crypto in proptest::collection::vec("[a-zA-Z-]{0,8}", 0..8),
        ) {
            let raw = RawWatchlist {
                stocks,
                indices: vec![],
                commodities: vec![],
                crypto,
            };
            let entries = normalize(&raw, &AliasBook::builtin());

            let mut keys: Vec<_> = entries
                .iter()
                .map(|e| (e.category.rank(), e.ticker.clone()))
                .collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }

        #[test]
        fn prop_normalize_output_is_sorted(
            stocks in proptest::collection::vec("[a-zA-Z ]{0,6}", 0..8),
            crypto in proptest::collection::vec("[a-zA-Z-]{0,8}", 0..8),
        ) {
            let raw = RawWatchlist {
                stocks,
                indices: vec![],
                commodities: vec![],
                crypto,
            };
            let entries = normalize(&raw, &AliasBook::builtin());

            for pair in entries.windows(2) {
                let a = (pair[0].category.rank(), pair[0].ticker.as_str());
                let b = (pair[1].category.rank(), pair[1].ticker.as_str());
                prop_assert!(a <= b);
            }
        }
    }
}
