use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Lifecycle states of a booking.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Received from a channel but not yet confirmed.
    Pending,
    /// Confirmed and counted against shared inventory.
    Confirmed,
    /// Cancelled; releases its rooms on every channel.
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Confirmed
    }
}

impl BookingStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<BookingStatus> for &'static str {
    fn from(value: BookingStatus) -> Self {
        value.as_str()
    }
}

/// Domain representation of a reservation received from a sales channel.
///
/// Rooms are shared inventory: bookings from every channel draw on the same
/// physical rooms of the property.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    /// Unique identifier of the booking.
    pub id: i32,
    /// Owning property identifier.
    pub property_id: i32,
    /// Sales channel the booking arrived on (for example `booking.com`).
    pub channel: String,
    /// External reference assigned by the channel.
    pub reference: Option<String>,
    /// Arrival date (occupies the night of this date).
    pub check_in: NaiveDate,
    /// Departure date (exclusive; the night before is the last occupied).
    pub check_out: NaiveDate,
    /// Number of rooms held by the booking.
    pub rooms: i32,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Timestamp for when the booking record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the booking record.
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Number of nights covered by the booking.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether the booking occupies rooms on the night of `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

/// Payload required to insert a new booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    /// Owning property identifier.
    pub property_id: i32,
    /// Sales channel the booking arrived on.
    pub channel: String,
    /// External reference assigned by the channel.
    pub reference: Option<String>,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Number of rooms held by the booking.
    pub rooms: i32,
    /// Initial lifecycle status.
    pub status: BookingStatus,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewBooking {
    /// Build a one-room booking payload with the default status.
    pub fn new(
        property_id: i32,
        channel: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            property_id,
            channel: channel.into().trim().to_string(),
            reference: None,
            check_in,
            check_out,
            rooms: 1,
            status: BookingStatus::default(),
            updated_at: now,
        }
    }

    /// Attach an external reference to the payload.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Override the number of rooms held by the booking.
    pub fn with_rooms(mut self, rooms: i32) -> Self {
        self.rooms = rooms;
        self
    }

    /// Override the default status for the new booking.
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }
}

/// Patch data applied when updating an existing booking.
#[derive(Debug, Clone)]
pub struct UpdateBooking {
    /// Optional status update.
    pub status: Option<BookingStatus>,
    /// Optional room count update.
    pub rooms: Option<i32>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateBooking {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateBooking {
    /// Create a patch with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            status: None,
            rooms: None,
            updated_at: now,
        }
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn rooms(mut self, rooms: i32) -> Self {
        self.rooms = Some(rooms);
        self
    }
}

/// Query definition used to list bookings for a property.
#[derive(Debug, Clone)]
pub struct BookingListQuery {
    /// Owning property identifier.
    pub property_id: i32,
    /// Optional status filter.
    pub status: Option<BookingStatus>,
    /// Optional channel filter.
    pub channel: Option<String>,
    /// Optional filter to bookings arriving exactly on a date.
    pub arriving_on: Option<NaiveDate>,
    /// Optional search term that matches the reference or channel.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl BookingListQuery {
    /// Construct a query that targets all bookings belonging to `property_id`.
    pub fn new(property_id: i32) -> Self {
        Self {
            property_id,
            status: None,
            channel: None,
            arriving_on: None,
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter the results by sales channel.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Filter the results to bookings arriving on `date`.
    pub fn arriving_on(mut self, date: NaiveDate) -> Self {
        self.arriving_on = Some(date);
        self
    }

    /// Filter the results by a search term applied to reference or channel.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
