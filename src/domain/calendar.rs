use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Occupancy facts for one property-date pair, derived from confirmed
/// bookings across every sales channel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OccupancySnapshot {
    /// The night being described.
    pub date: NaiveDate,
    /// Rooms held by confirmed bookings on that night.
    pub booked_rooms: i32,
    /// Rooms still open for sale on that night.
    pub available_rooms: i32,
    /// Booked share of the property's rooms, 0-100.
    pub occupancy_percent: Decimal,
}

/// Computed calendar output for one property-date pair.
///
/// Derived, never persisted: recomputed for every requested range and
/// discarded after render.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RateCalendarEntry {
    /// The night being priced.
    pub date: NaiveDate,
    /// The plan's base rate, echoed for display.
    pub base_rate: Decimal,
    /// Final nightly rate after rules, clamps and rounding.
    pub final_rate: Decimal,
    /// Names of the rules that fired, in application order.
    pub applied_rules: Vec<String>,
    /// Occupancy percentage used as evaluation context.
    pub occupancy_percent: Decimal,
    /// Rooms held by confirmed bookings on that night.
    pub booked_rooms: i32,
    /// Rooms still open for sale on that night.
    pub available_rooms: i32,
}
