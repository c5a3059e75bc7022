//! Tiered storage-fee calculation
//!
//! Pure functions shared by every screen that prices storage: day counting
//! over a date range (optionally apportioned to a settlement month), tier
//! lookup on a rate schedule, and the weight × days × price fee.
//!
//! Nothing here returns an error. Missing or malformed temporal input yields
//! zero counts, missing fee operands count as zero; required-field checks
//! belong to the services that call in.

pub mod period;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::rate::Tier;

pub use period::{parse_date, parse_year_month, YearMonth, DATE_FORMAT};

/// Day counts for a storage period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCounts {
    /// Days of the range falling inside the settlement month.
    pub monthly_days: i64,
    /// Inclusive length of the whole range.
    pub total_days: i64,
}

/// Unit price for `total_days` on a schedule sorted ascending by threshold.
///
/// Returns the price of the first tier with `threshold_days >= total_days`,
/// the last tier's price when every threshold is exceeded, and zero for an
/// empty schedule. The slice is not re-sorted.
pub fn resolve_unit_price(total_days: i64, tiers: &[Tier]) -> Decimal {
    tiers
        .iter()
        .find(|tier| total_days <= i64::from(tier.threshold_days))
        .or_else(|| tiers.last())
        .map(|tier| tier.unit_price)
        .unwrap_or(Decimal::ZERO)
}

/// Count the days of `[start, end]`, and the part of it inside `settlement_month`.
///
/// Without a settlement month the start date's month is used when both ends
/// share it; a range crossing a month boundary then has no apportionment.
pub fn compute_day_counts(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    settlement_month: Option<YearMonth>,
) -> DayCounts {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => return DayCounts::default(),
    };

    let total_days = inclusive_days(start, end);

    let month = settlement_month.or_else(|| {
        let start_month = YearMonth::of(start);
        start_month.contains(end).then_some(start_month)
    });

    let monthly_days = month
        .and_then(|month| {
            let overlap_start = start.max(month.first_day());
            let overlap_end = end.min(month.last_day());
            (overlap_start <= overlap_end).then(|| inclusive_days(overlap_start, overlap_end))
        })
        .unwrap_or(0);

    DayCounts {
        monthly_days,
        total_days,
    }
}

/// String form of [`compute_day_counts`] for raw form input.
///
/// Blank or unparsable dates give zero counts; an unparsable settlement
/// month is treated as absent.
pub fn compute_day_counts_str(start: &str, end: &str, settlement_month: Option<&str>) -> DayCounts {
    compute_day_counts(
        parse_date(start),
        parse_date(end),
        settlement_month.and_then(parse_year_month),
    )
}

/// `weight × days × unit_price`, with any missing operand counted as zero.
pub fn compute_fee(weight: Option<Decimal>, days: Option<i64>, unit_price: Option<Decimal>) -> Decimal {
    let weight = weight.unwrap_or(Decimal::ZERO);
    let days = Decimal::from(days.unwrap_or(0));
    let unit_price = unit_price.unwrap_or(Decimal::ZERO);
    weight * days * unit_price
}

/// `unit_price × quantity`, missing operands counted as zero.
///
/// The flat per-tonne / per-piece charges on inbound and outbound
/// settlements are priced this way.
pub fn line_fee(unit_price: Option<Decimal>, quantity: Option<Decimal>) -> Decimal {
    unit_price.unwrap_or(Decimal::ZERO) * quantity.unwrap_or(Decimal::ZERO)
}

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tiers() -> Vec<Tier> {
        vec![
            Tier::new(30, dec!(10)),
            Tier::new(60, dec!(8)),
            Tier::new(90, dec!(6)),
        ]
    }

    #[test]
    fn unit_price_first_matching_tier() {
        let t = tiers();
        assert_eq!(resolve_unit_price(0, &t), dec!(10));
        assert_eq!(resolve_unit_price(30, &t), dec!(10));
        assert_eq!(resolve_unit_price(31, &t), dec!(8));
        assert_eq!(resolve_unit_price(45, &t), dec!(8));
        assert_eq!(resolve_unit_price(90, &t), dec!(6));
    }

    #[test]
    fn unit_price_falls_back_to_last_tier() {
        assert_eq!(resolve_unit_price(200, &tiers()), dec!(6));
    }

    #[test]
    fn unit_price_empty_schedule_is_zero() {
        assert_eq!(resolve_unit_price(15, &[]), Decimal::ZERO);
        assert_eq!(resolve_unit_price(-3, &[]), Decimal::ZERO);
    }

    #[test]
    fn unit_price_negative_days_take_first_tier() {
        assert_eq!(resolve_unit_price(-1, &tiers()), dec!(10));
    }

    #[test]
    fn unit_price_does_not_resort() {
        let unsorted = vec![Tier::new(90, dec!(6)), Tier::new(30, dec!(10))];
        // First tier with threshold >= 10 is the 90-day one.
        assert_eq!(resolve_unit_price(10, &unsorted), dec!(6));
    }

    #[test]
    fn same_month_range_infers_settlement_month() {
        let counts = compute_day_counts_str("2025-06-01", "2025-06-15", None);
        assert_eq!(counts.total_days, 15);
        assert_eq!(counts.monthly_days, 15);
    }

    #[test]
    fn cross_month_range_apportions_to_settlement_month() {
        let counts = compute_day_counts_str("2025-06-20", "2025-07-05", Some("2025-06"));
        assert_eq!(counts.total_days, 16);
        assert_eq!(counts.monthly_days, 11);

        let july = compute_day_counts_str("2025-06-20", "2025-07-05", Some("2025-07"));
        assert_eq!(july.monthly_days, 5);
    }

    #[test]
    fn cross_month_range_without_month_has_no_apportionment() {
        let counts = compute_day_counts_str("2025-06-20", "2025-07-05", None);
        assert_eq!(counts.total_days, 16);
        assert_eq!(counts.monthly_days, 0);
    }

    #[test]
    fn settlement_month_outside_range() {
        let counts = compute_day_counts_str("2025-06-01", "2025-06-15", Some("2025-08"));
        assert_eq!(counts.total_days, 15);
        assert_eq!(counts.monthly_days, 0);
    }

    #[test]
    fn range_covering_whole_month() {
        let counts = compute_day_counts_str("2025-01-15", "2025-03-10", Some("2025-02"));
        assert_eq!(counts.monthly_days, 28);
        assert_eq!(counts.total_days, 55);
    }

    #[test]
    fn inverted_range_is_zero() {
        assert_eq!(
            compute_day_counts_str("2025-07-01", "2025-06-01", None),
            DayCounts::default()
        );
    }

    #[test]
    fn missing_or_bad_dates_are_zero() {
        assert_eq!(compute_day_counts_str("", "2025-06-01", None), DayCounts::default());
        assert_eq!(compute_day_counts_str("2025-06-01", "soon", None), DayCounts::default());
        assert_eq!(compute_day_counts(None, None, None), DayCounts::default());
    }

    #[test]
    fn single_day_range() {
        let counts = compute_day_counts_str("2025-06-10", "2025-06-10", None);
        assert_eq!(counts.total_days, 1);
        assert_eq!(counts.monthly_days, 1);
    }

    #[test]
    fn unparsable_month_treated_as_absent() {
        let counts = compute_day_counts_str("2025-06-01", "2025-06-15", Some("next month"));
        assert_eq!(counts.monthly_days, 15);
    }

    #[test]
    fn fee_multiplies_operands() {
        assert_eq!(compute_fee(Some(dec!(100)), Some(15), Some(dec!(10))), dec!(15000));
        assert_eq!(compute_fee(Some(dec!(2.5)), Some(4), Some(dec!(0.4))), dec!(4));
    }

    #[test]
    fn fee_missing_operand_is_zero() {
        assert_eq!(compute_fee(None, Some(15), Some(dec!(10))), Decimal::ZERO);
        assert_eq!(compute_fee(Some(dec!(100)), None, Some(dec!(10))), Decimal::ZERO);
        assert_eq!(compute_fee(Some(dec!(100)), Some(15), None), Decimal::ZERO);
    }

    #[test]
    fn calculator_is_idempotent() {
        let a = compute_day_counts_str("2025-06-20", "2025-07-05", Some("2025-06"));
        let b = compute_day_counts_str("2025-06-20", "2025-07-05", Some("2025-06"));
        assert_eq!(a, b);
        let fee = |d| compute_fee(Some(dec!(12.5)), Some(d), Some(dec!(8)));
        assert_eq!(fee(a.total_days), fee(b.total_days));
    }

    #[test]
    fn line_fee_defaults_to_zero() {
        assert_eq!(line_fee(Some(dec!(100)), Some(dec!(5))), dec!(500));
        assert_eq!(line_fee(None, Some(dec!(5))), Decimal::ZERO);
    }
}
