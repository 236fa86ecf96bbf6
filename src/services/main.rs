use chrono::NaiveDate;

use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::booking::BookingListQuery;
use crate::domain::calendar::OccupancySnapshot;
use crate::domain::rate_plan::{RatePlanListQuery, RatePlanStatus};
use crate::repository::{AvailabilityReader, BookingReader, RatePlanReader};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the dashboard template.
pub struct IndexPageData {
    /// Number of active rate plans for the property.
    pub active_rate_plans: usize,
    /// Tonight's occupancy snapshot.
    pub occupancy: OccupancySnapshot,
    /// Number of bookings arriving today.
    pub arrivals_today: usize,
}

/// Loads the dashboard summary for the index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<IndexPageData>
where
    R: RatePlanReader + AvailabilityReader + BookingReader + ?Sized,
{
    if !user.can(Capability::ViewDashboard) {
        return Err(ServiceError::Unauthorized);
    }

    let (active_rate_plans, _) = repo
        .list_rate_plans(
            RatePlanListQuery::new(user.property_id).status(RatePlanStatus::Active),
        )
        .map_err(ServiceError::from)?;

    let occupancy = repo
        .day_occupancy(user.property_id, today)
        .map_err(ServiceError::from)?;

    let (arrivals_today, _) = repo
        .list_bookings(BookingListQuery::new(user.property_id).arriving_on(today))
        .map_err(ServiceError::from)?;

    Ok(IndexPageData {
        active_rate_plans,
        occupancy,
        arrivals_today,
    })
}
