use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::calendar::RateCalendarEntry;
use crate::domain::rate_plan::RatePlan;
use crate::pricing::{EvaluationContext, evaluate};
use crate::repository::{AutomationReader, AvailabilityReader, RatePlanReader};
use crate::services::{ServiceError, ServiceResult};

/// Longest date range a single calendar request may cover.
pub const MAX_CALENDAR_DAYS: i64 = 366;

/// Number of days shown when the request names no range.
const DEFAULT_CALENDAR_DAYS: i64 = 30;

/// Query parameters accepted by the rate calendar.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// First date of the range; defaults to today.
    pub start: Option<NaiveDate>,
    /// Last date of the range, inclusive; defaults to a month from start.
    pub end: Option<NaiveDate>,
    /// Requested stay length used as rule-matching context.
    pub stay_length: Option<i32>,
}

/// Data required to render the rate calendar template.
pub struct CalendarPageData {
    /// The plan being priced.
    pub plan: RatePlan,
    /// One entry per date in the requested range.
    pub entries: Vec<RateCalendarEntry>,
    /// First date of the rendered range.
    pub start: NaiveDate,
    /// Last date of the rendered range, inclusive.
    pub end: NaiveDate,
}

/// Computes the rate calendar for one plan over a date range.
///
/// `today` anchors the advance-booking context and the default range; the
/// route passes the current date, tests pass a fixed one.
pub fn build_rate_calendar<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    query: CalendarQuery,
    today: NaiveDate,
) -> ServiceResult<CalendarPageData>
where
    R: RatePlanReader + AutomationReader + AvailabilityReader + ?Sized,
{
    if !user.can(Capability::ViewCalendar) {
        return Err(ServiceError::Unauthorized);
    }

    let start = query.start.unwrap_or(today);
    let end = query
        .end
        .unwrap_or(start + chrono::Duration::days(DEFAULT_CALENDAR_DAYS - 1));

    if end < start {
        return Err(ServiceError::Form(
            "calendar range must end after it starts".to_string(),
        ));
    }

    let span = (end - start).num_days() + 1;
    if span > MAX_CALENDAR_DAYS {
        return Err(ServiceError::Form(format!(
            "calendar range is limited to {MAX_CALENDAR_DAYS} days"
        )));
    }

    let plan = repo
        .get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let automation = repo
        .get_automation_settings(rate_plan_id)
        .map_err(ServiceError::from)?;

    let stay_length_nights = query.stay_length.unwrap_or(1).max(1);

    let mut entries = Vec::with_capacity(span as usize);
    for offset in 0..span {
        let date = start + chrono::Duration::days(offset);
        let occupancy = repo
            .day_occupancy(user.property_id, date)
            .map_err(ServiceError::from)?;

        let context = EvaluationContext {
            occupancy_percent: occupancy.occupancy_percent,
            advance_days: (date - today).num_days(),
            stay_length_nights,
        };

        let evaluation = evaluate(&plan, automation.as_ref(), date, &context);

        entries.push(RateCalendarEntry {
            date,
            base_rate: plan.base_rate,
            final_rate: evaluation.final_rate,
            applied_rules: evaluation.applied_rules,
            occupancy_percent: occupancy.occupancy_percent,
            booked_rooms: occupancy.booked_rooms,
            available_rooms: occupancy.available_rooms,
        });
    }

    Ok(CalendarPageData {
        plan,
        entries,
        start,
        end,
    })
}
