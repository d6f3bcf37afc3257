// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::error::JournalError;
use crate::models::Category;
use crate::provider::{DailyBar, PriceProvider};

/// Trading days inspected after the buy date when classifying a buy.
pub const DEFAULT_LOOKAHEAD_DAYS: usize = 5;

/// Classify a buy from how the price moved afterwards.
///
/// Looks at up to `lookahead` observations strictly after `buy_date`. A last
/// close more than 1% above the buy price reads as a breakout buy, more than
/// 1% below as a dip buy. Inside that band the mean close against the raw buy
/// price breaks the tie. Without any observations there is nothing to say.
pub fn classify_buy(
    history: &[DailyBar],
    buy_price: Decimal,
    buy_date: NaiveDate,
    lookahead: usize,
) -> Option<Category> {
    let window: Vec<&DailyBar> = history
        .iter()
        .filter(|b| b.date > buy_date)
        .take(lookahead)
        .collect();
    let last = window.last()?;

    let upper = buy_price * Decimal::new(101, 2);
    let lower = buy_price * Decimal::new(99, 2);
    if last.close > upper {
        return Some(Category::RallyBought);
    }
    if last.close < lower {
        return Some(Category::DipBought);
    }

    let sum: Decimal = window.iter().map(|b| b.close).sum();
    let mean = sum / Decimal::from(window.len() as i64);
    if mean >= buy_price {
        Some(Category::RallyBought)
    } else {
        Some(Category::DipBought)
    }
}

/// Fetch the post-buy window from the provider and classify.
///
/// Retrieval failures degrade to `None`: classification is a best-effort
/// heuristic and the caller always has a manual fallback.
pub fn detect_buy_category(
    provider: &dyn PriceProvider,
    code: &str,
    buy_date: NaiveDate,
    buy_price: Decimal,
    lookahead: usize,
) -> Option<Category> {
    // double the window in calendar days to cover weekends and holidays
    let end = buy_date + Duration::days((lookahead * 2) as i64);
    let bars = provider.daily_bars(code, buy_date, end).ok()?;
    classify_buy(&bars, buy_price, buy_date, lookahead)
}

/// Classify a sell from the realized price change.
///
/// More than +1% reads as taking profit, more than -1% as cutting a loss;
/// inside the band the raw comparison breaks the tie. Total once both prices
/// are positive.
pub fn classify_sell(buy_price: Decimal, sell_price: Decimal) -> Result<Category, JournalError> {
    if buy_price <= Decimal::ZERO || sell_price <= Decimal::ZERO {
        return Err(JournalError::InvalidInput(format!(
            "prices must be positive, got buy {} sell {}",
            buy_price, sell_price
        )));
    }
    let rel = (sell_price - buy_price) / buy_price;
    let band = Decimal::new(1, 2); // 1%
    if rel > band {
        Ok(Category::ProfitTaken)
    } else if rel < -band {
        Ok(Category::LossCut)
    } else if sell_price > buy_price {
        Ok(Category::ProfitTaken)
    } else {
        Ok(Category::LossCut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn bar(date: &str, close: &str) -> DailyBar {
        DailyBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: dec(close),
            high: dec(close),
            low: dec(close),
            close: dec(close),
            volume: Decimal::ZERO,
        }
    }

    #[test]
    fn sell_outside_band_uses_relative_change() {
        assert_eq!(
            classify_sell(dec("100"), dec("102")).unwrap(),
            Category::ProfitTaken
        );
        assert_eq!(
            classify_sell(dec("100"), dec("98")).unwrap(),
            Category::LossCut
        );
    }

    #[test]
    fn sell_inside_band_tie_breaks_on_raw_comparison() {
        // exactly +1% is inside the band, so sell > buy decides
        assert_eq!(
            classify_sell(dec("100"), dec("101")).unwrap(),
            Category::ProfitTaken
        );
        assert_eq!(
            classify_sell(dec("100"), dec("99")).unwrap(),
            Category::LossCut
        );
        // equal prices fall to the loss-cut side
        assert_eq!(
            classify_sell(dec("100"), dec("100")).unwrap(),
            Category::LossCut
        );
    }

    #[test]
    fn sell_rejects_non_positive_prices() {
        assert!(classify_sell(dec("0"), dec("10")).is_err());
        assert!(classify_sell(dec("10"), dec("-1")).is_err());
    }

    #[test]
    fn buy_with_no_observations_is_unclassified() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(classify_buy(&[], dec("10"), d, 5), None);
        // bars on or before the buy date do not count
        let bars = vec![bar("2025-03-10", "12")];
        assert_eq!(classify_buy(&bars, dec("10"), d, 5), None);
    }

    #[test]
    fn buy_classified_by_last_close_outside_band() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let up = vec![bar("2025-03-11", "10.00"), bar("2025-03-12", "10.50")];
        assert_eq!(
            classify_buy(&up, dec("10"), d, 5),
            Some(Category::RallyBought)
        );
        let down = vec![bar("2025-03-11", "10.00"), bar("2025-03-12", "9.50")];
        assert_eq!(
            classify_buy(&down, dec("10"), d, 5),
            Some(Category::DipBought)
        );
    }

    #[test]
    fn buy_inside_band_falls_back_to_mean() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // last close 10.05 is within 1%; mean (10.20+10.05)/2 > 10 -> rally
        let bars = vec![bar("2025-03-11", "10.20"), bar("2025-03-12", "10.05")];
        assert_eq!(
            classify_buy(&bars, dec("10"), d, 5),
            Some(Category::RallyBought)
        );
        // mean below the buy price -> dip
        let bars = vec![bar("2025-03-11", "9.85"), bar("2025-03-12", "10.05")];
        assert_eq!(
            classify_buy(&bars, dec("10"), d, 5),
            Some(Category::DipBought)
        );
    }

    struct FailingProvider;

    impl PriceProvider for FailingProvider {
        fn daily_bars(
            &self,
            _code: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> anyhow::Result<Vec<DailyBar>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        fn instrument_name(&self, _code: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    struct FixedProvider(Vec<DailyBar>);

    impl PriceProvider for FixedProvider {
        fn daily_bars(
            &self,
            _code: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> anyhow::Result<Vec<DailyBar>> {
            Ok(self.0.clone())
        }

        fn instrument_name(&self, _code: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn detection_degrades_to_none_when_the_provider_fails() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            detect_buy_category(&FailingProvider, "600000", d, dec("10"), 5),
            None
        );
    }

    #[test]
    fn detection_classifies_from_fetched_bars() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let provider = FixedProvider(vec![bar("2025-03-11", "10.50")]);
        assert_eq!(
            detect_buy_category(&provider, "600000", d, dec("10"), 5),
            Some(Category::RallyBought)
        );
    }

    #[test]
    fn buy_window_is_limited_to_lookahead() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // sixth day would flip the result, but only five are inspected
        let bars = vec![
            bar("2025-03-11", "10.00"),
            bar("2025-03-12", "10.00"),
            bar("2025-03-13", "10.00"),
            bar("2025-03-14", "10.00"),
            bar("2025-03-17", "10.60"),
            bar("2025-03-18", "8.00"),
        ];
        assert_eq!(
            classify_buy(&bars, dec("10"), d, 5),
            Some(Category::RallyBought)
        );
    }
}
