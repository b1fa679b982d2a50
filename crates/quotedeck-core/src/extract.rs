//! 테이블에서 가격을 추출하는 로직.
//!
//! 특정 심볼의 마지막 관측 가격과 직전 참조 가격을 꺼냅니다. 결측 값,
//! 비어 있는 테이블, 없는 심볼은 모두 None으로 귀결되며, 호출자 체인은
//! 이를 예외가 아니라 정상적인 "데이터 없음" 경로로 다룹니다.

use crate::series::SeriesTable;

/// 갭 제거 후 시간순 마지막 종가를 반환합니다.
///
/// 컬럼이 없거나 갭을 제외하고 남는 값이 없으면 None입니다.
pub fn last_close(table: &SeriesTable, symbol: &str) -> Option<f64> {
    let series = table.close_series(symbol)?;
    series.iter().rev().find_map(|point| point.valid_close())
}

/// 갭 제거 후 직전 참조 종가를 반환합니다.
///
/// 관측치가 두 개 이상이면 뒤에서 두 번째 값을, 정확히 하나면 그 값을
/// 그대로 돌려줍니다. 단일 관측치 폴백은 변동 0으로라도 레코드를 만들 수
/// 있게 하는 퇴행 처리입니다. 관측치가 없으면 None입니다.
pub fn previous_close(table: &SeriesTable, symbol: &str) -> Option<f64> {
    let series = table.close_series(symbol)?;
    let closes: Vec<f64> = series.iter().filter_map(|point| point.valid_close()).collect();
    match closes.len() {
        0 => None,
        1 => Some(closes[0]),
        n => Some(closes[n - 2]),
    }
}
