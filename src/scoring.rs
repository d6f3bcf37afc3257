// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::JournalError;
use crate::models::Category;

/// Score a realized outcome against the behavior the category rewards.
///
/// Maps the profit rate through a piecewise-linear ramp to
/// `[0, category.max_score()]`. Linear segments truncate toward zero,
/// matching how the scores are displayed (whole points only).
pub fn score_objective(
    category: Category,
    buy_price: Decimal,
    sell_price: Decimal,
) -> Result<i64, JournalError> {
    if buy_price <= Decimal::ZERO {
        return Err(JournalError::InvalidInput(format!(
            "buy price must be positive, got {}",
            buy_price
        )));
    }

    let rate = (sell_price - buy_price) / buy_price * Decimal::from(100);
    let max = Decimal::from(category.max_score());

    let score = match category {
        // Full marks from +5% up; losses score nothing.
        Category::ProfitTaken => ramp_up(rate, Decimal::from(5), max),
        // Dip buys need more follow-through: full marks from +10%.
        Category::DipBought => ramp_up(rate, Decimal::from(10), max),
        // Breakout buys: full marks from +8%.
        Category::RallyBought => ramp_up(rate, Decimal::from(8), max),
        // A cut that turned out profitable validates the decision, and a cut
        // taken before -5% was timely; in between the score decays linearly.
        Category::LossCut => {
            if rate >= Decimal::ZERO || rate <= Decimal::from(-5) {
                max
            } else {
                (max * (Decimal::ONE + rate / Decimal::from(5))).trunc()
            }
        }
    };

    let score = score.to_i64().unwrap_or(0);
    Ok(score.clamp(0, 100))
}

fn ramp_up(rate: Decimal, full_at: Decimal, max: Decimal) -> Decimal {
    if rate >= full_at {
        max
    } else if rate >= Decimal::ZERO {
        (max * rate / full_at).trunc()
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn profit_taken_caps_at_five_percent() {
        let s = score_objective(Category::ProfitTaken, dec("100"), dec("105")).unwrap();
        assert_eq!(s, 30);
        let s = score_objective(Category::ProfitTaken, dec("100"), dec("120")).unwrap();
        assert_eq!(s, 30);
    }

    #[test]
    fn profit_taken_linear_segment_truncates() {
        // 2.5% of the 5% ramp -> half of 30
        let s = score_objective(Category::ProfitTaken, dec("100"), dec("102.5")).unwrap();
        assert_eq!(s, 15);
        // 0.33% -> 30*0.33/5 = 1.98 -> 1
        let s = score_objective(Category::ProfitTaken, dec("100"), dec("100.33")).unwrap();
        assert_eq!(s, 1);
    }

    #[test]
    fn profit_taken_loss_scores_zero() {
        let s = score_objective(Category::ProfitTaken, dec("100"), dec("99")).unwrap();
        assert_eq!(s, 0);
    }

    #[test]
    fn dip_bought_ramp_reaches_max_at_ten_percent() {
        assert_eq!(
            score_objective(Category::DipBought, dec("100"), dec("110")).unwrap(),
            30
        );
        assert_eq!(
            score_objective(Category::DipBought, dec("100"), dec("105")).unwrap(),
            15
        );
        assert_eq!(
            score_objective(Category::DipBought, dec("100"), dec("95")).unwrap(),
            0
        );
    }

    #[test]
    fn rally_bought_ramp_reaches_max_at_eight_percent() {
        assert_eq!(
            score_objective(Category::RallyBought, dec("100"), dec("108")).unwrap(),
            20
        );
        assert_eq!(
            score_objective(Category::RallyBought, dec("100"), dec("104")).unwrap(),
            10
        );
    }

    #[test]
    fn loss_cut_rewards_both_tails() {
        // Any profit validates the cut
        assert_eq!(
            score_objective(Category::LossCut, dec("100"), dec("101")).unwrap(),
            20
        );
        // Timely stop at -5% or worse
        assert_eq!(
            score_objective(Category::LossCut, dec("100"), dec("95")).unwrap(),
            20
        );
        assert_eq!(
            score_objective(Category::LossCut, dec("100"), dec("80")).unwrap(),
            20
        );
    }

    #[test]
    fn loss_cut_decays_linearly_between_minus_five_and_zero() {
        // -3%: 20 * (1 - 3/5) = 8
        assert_eq!(
            score_objective(Category::LossCut, dec("100"), dec("97")).unwrap(),
            8
        );
        // -1%: 20 * 0.8 = 16
        assert_eq!(
            score_objective(Category::LossCut, dec("100"), dec("99")).unwrap(),
            16
        );
    }

    #[test]
    fn non_positive_buy_price_rejected() {
        assert!(matches!(
            score_objective(Category::ProfitTaken, dec("0"), dec("10")),
            Err(JournalError::InvalidInput(_))
        ));
        assert!(matches!(
            score_objective(Category::LossCut, dec("-1"), dec("10")),
            Err(JournalError::InvalidInput(_))
        ));
    }
}
