use lazy_static::lazy_static;
use std::collections::HashMap as Map;

lazy_static! {
    /// Display names for the report field keys.
    ///
    /// This is currently maintained manually, in step with the keys the
    /// report endpoint emits.
    pub static ref LABELS: Map<&'static str, &'static str> = Map::from([
        ("start_date", "Дата начала"),
        ("end_date", "Дата окончания"),
        ("initial_cache", "Начальный капитал"),
        ("buy_price", "Цена покупки"),
        ("sell_price", "Цена продажи"),
        ("buy_count", "Количество покупок"),
        ("sell_count", "Количество продаж"),
        ("comission_percent", "Комиссия (%)"),
        ("tax_percent", "Налог (%)"),
        ("invest_period_days", "Период инвестирования (дни)"),
        ("invest_period_years", "Период инвестирования (годы)"),
        ("total_income_sum", "Общий доход (сумма)"),
        ("total_income_perc", "Общий доход (%)"),
        ("incom_year_sum", "Доход в год (сумма)"),
        ("incom_year_pers", "Доход в год (%)"),
        ("accumulated_commission", "Накопленная комиссия"),
        ("final_cache", "Финальная сумма в кэше"),
        ("final_amount_in_shares", "Финальная сумма в акциях"),
        ("final_overall_result", "Общий финальный результат"),
        ("total_tax", "Общий налог"),
    ]);
}

/// Key of the commission field, spelled the way the report endpoint spells it.
pub const COMMISSION_KEY: &str = "comission_percent";

/// Look up the display label of `key`, falling back to the key itself.
///
/// ```rust
/// use stratest_report::labels::label;
///
/// assert_eq!(label("start_date"), "Дата начала");
/// assert_eq!(label("xyz"), "xyz");
/// ```
pub fn label(key: &str) -> &str {
    LABELS.get(key).copied().unwrap_or(key)
}

/// All known `(key, label)` pairs, sorted by key.
pub fn labels() -> Vec<(&'static str, &'static str)> {
    let mut pairs: Vec<_> = LABELS.iter().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_by_key(|(k, _)| *k);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_is_translated() {
        assert_eq!(label("start_date"), "Дата начала");
        assert_eq!(label("final_cache"), "Финальная сумма в кэше");
        assert_eq!(label(COMMISSION_KEY), "Комиссия (%)");
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        assert_eq!(label("xyz"), "xyz");
        assert_eq!(label(""), "");
        assert_eq!(label("Start_Date"), "Start_Date");
    }

    #[test]
    fn dictionary_is_complete_and_sorted() {
        let pairs = labels();
        assert_eq!(pairs.len(), 20);
        assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(pairs.iter().any(|(k, _)| *k == "total_tax"));
    }
}
