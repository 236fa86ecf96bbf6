use serde::Deserialize;

use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::booking::{Booking, BookingListQuery, BookingStatus, UpdateBooking};
use crate::forms::bookings::{AddBookingForm, UploadBookingsForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{BookingReader, BookingWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the bookings index page.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Optional status filter.
    pub status: Option<String>,
    /// Optional channel filter.
    pub channel: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the bookings index template.
pub struct BookingsPageData {
    /// Paginated list of bookings to show in the table.
    pub bookings: Paginated<Booking>,
    /// Search query echoed back to the template when present.
    pub search: Option<String>,
    /// Status filter echoed back to the template when present.
    pub status: Option<BookingStatus>,
    /// Channel filter echoed back to the template when present.
    pub channel: Option<String>,
}

/// Loads the bookings list for the index page.
pub fn load_bookings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: BookingsQuery,
) -> ServiceResult<BookingsPageData>
where
    R: BookingReader + ?Sized,
{
    if !user.can(Capability::ManageBookings) {
        return Err(ServiceError::Unauthorized);
    }

    let status = query.status.as_deref().and_then(BookingStatus::parse);

    let page = query.page.unwrap_or(1);
    let mut list_query =
        BookingListQuery::new(user.property_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    if let Some(channel) = query.channel.as_ref() {
        list_query = list_query.channel(channel);
    }

    if let Some(value) = query.search.as_ref() {
        list_query = list_query.search(value);
    }

    let (total, bookings) = repo.list_bookings(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let bookings = Paginated::new(bookings, page, total_pages);

    Ok(BookingsPageData {
        bookings,
        search: query.search,
        status,
        channel: query.channel,
    })
}

/// Records a booking entered by an operator.
pub fn create_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddBookingForm,
) -> ServiceResult<Booking>
where
    R: BookingWriter + ?Sized,
{
    if !user.can(Capability::ManageBookings) {
        return Err(ServiceError::Unauthorized);
    }

    let new_booking = form
        .into_new_booking(user.property_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_booking(&new_booking).map_err(ServiceError::from)
}

/// Cancels a booking, releasing its rooms on every channel.
pub fn cancel_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
) -> ServiceResult<Booking>
where
    R: BookingWriter + ?Sized,
{
    if !user.can(Capability::ManageBookings) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = UpdateBooking::new().status(BookingStatus::Cancelled);

    repo.update_booking(booking_id, user.property_id, &updates)
        .map_err(ServiceError::from)
}

/// Imports bookings from an uploaded channel-export CSV file.
pub fn import_bookings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadBookingsForm,
) -> ServiceResult<usize>
where
    R: BookingWriter + ?Sized,
{
    if !user.can(Capability::ManageBookings) {
        return Err(ServiceError::Unauthorized);
    }

    let bookings = form
        .into_new_bookings(user.property_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_bookings(&bookings).map_err(ServiceError::from)
}
