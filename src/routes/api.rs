use actix_web::{HttpResponse, Responder, get, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::{AuthenticatedUser, Capability};
use crate::repository::{AvailabilityReader, DieselRepository};
use crate::routes::empty_string_as_none;
use crate::services::ServiceError;
use crate::services::calendar::{CalendarQuery, build_rate_calendar};

#[get("/v1/rate-plans/{rate_plan_id}/calendar")]
/// Return the computed rate calendar as JSON for the front-end grid.
///
/// Users whose role lacks the calendar capability receive `401 Unauthorized`.
pub async fn api_v1_calendar(
    path: web::Path<i32>,
    params: web::Query<CalendarQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let today = chrono::Local::now().date_naive();

    match build_rate_calendar(repo.get_ref(), &user, rate_plan_id, params.0, today) {
        Ok(data) => HttpResponse::Ok().json(data.entries),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to build calendar of rate plan {rate_plan_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Query parameters accepted by the availability endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    /// Night to describe; defaults to today.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<NaiveDate>,
}

#[get("/v1/availability")]
/// Return the shared-inventory occupancy snapshot for one night as JSON.
pub async fn api_v1_availability(
    params: web::Query<AvailabilityQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if !user.can(Capability::ViewCalendar) {
        return HttpResponse::Unauthorized().finish();
    }

    let date = params.0.date.unwrap_or_else(|| chrono::Local::now().date_naive());

    match repo.day_occupancy(user.property_id, date) {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(crate::repository::errors::RepositoryError::NotFound) => {
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            log::error!("Failed to load availability for {date}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
