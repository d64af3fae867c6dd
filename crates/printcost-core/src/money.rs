//! 金額捨入與格式化

use rust_decimal::prelude::*;

/// 非中斷空白（貨幣符號與金額之間）
const NBSP: char = '\u{a0}';

/// 四捨五入到分（兩位小數，0.5 遠離零）
///
/// 只在輸出邊界使用，計算中間值不得先捨入。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 以巴西雷亞爾格式輸出金額，例如 `R$ 1.234,56`
///
/// NaN 或無限值輸出 `R$ 0,00`；超出 [`Decimal`] 範圍（約 7.9e28）的有限值
/// 改用 `f64` 的完整十進位展開。
pub fn format_currency(value: f64) -> String {
    let (negative, digits) = if !value.is_finite() {
        (false, "0.00".to_string())
    } else if let Some(amount) = Decimal::from_f64(value) {
        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        (
            amount.is_sign_negative() && !amount.is_zero(),
            format!("{:.2}", amount.abs()),
        )
    } else {
        (value < 0.0, format!("{:.2}", value.abs()))
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R${NBSP}{grouped},{frac_part}")
}
