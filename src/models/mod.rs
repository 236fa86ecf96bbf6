use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub mod automation;
pub mod booking;
pub mod pricing_rule;
pub mod property;
pub mod rate_modifier;
pub mod rate_plan;

/// Money and percentages are stored as integer hundredths (cents, or 1/100
/// of a percent) so that database round-trips are exact.
pub(crate) fn to_hundredths(value: Decimal) -> i64 {
    (value * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(0)
}

pub(crate) fn from_hundredths(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

/// Weekday sets are stored as comma-separated short names, e.g. `Fri,Sat`.
pub(crate) fn weekdays_to_csv(days: &[Weekday]) -> String {
    days.iter()
        .map(|day| day.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn weekdays_from_csv(value: &str) -> Vec<Weekday> {
    value
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn hundredths_round_trip() {
        for value in [dec!(0), dec!(120.00), dec!(1.2), dec!(-35.25)] {
            assert_eq!(from_hundredths(to_hundredths(value)), value.round_dp(2));
        }
    }

    #[test]
    fn weekday_csv_round_trip() {
        let days = vec![Weekday::Fri, Weekday::Sat];
        assert_eq!(weekdays_to_csv(&days), "Fri,Sat");
        assert_eq!(weekdays_from_csv("Fri,Sat"), days);
        assert_eq!(weekdays_from_csv("fri, sat"), days);
    }

    #[test]
    fn weekday_csv_skips_garbage() {
        assert_eq!(weekdays_from_csv("Fri,xyz,Sat"), vec![Weekday::Fri, Weekday::Sat]);
        assert!(weekdays_from_csv("").is_empty());
    }
}
