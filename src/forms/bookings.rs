use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::NaiveDate;
use csv::Trim;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::booking::{BookingStatus, NewBooking};
use crate::forms::sanitize_inline_text;
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a channel name.
const CHANNEL_MAX_LEN: usize = 64;
const CHANNEL_MAX_LEN_VALIDATOR: u64 = CHANNEL_MAX_LEN as u64;

/// Result type returned by the booking form helpers.
pub type BookingFormResult<T> = Result<T, BookingFormError>;

/// Errors that can occur while processing booking forms.
#[derive(Debug, Error)]
pub enum BookingFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided channel is empty after sanitization.
    #[error("channel cannot be empty")]
    EmptyChannel,
    /// Check-out must come after check-in.
    #[error("check-out must be after check-in")]
    DatesOutOfOrder,
    /// The uploaded CSV is missing the required header fields.
    #[error("upload is missing `channel`, `check_in` or `check_out` columns")]
    MissingRequiredHeaders,
    /// A row was missing the channel name.
    #[error("row {row} is missing a channel")]
    UploadMissingChannel { row: usize },
    /// A row carried an unparsable date.
    #[error("row {row} has invalid date `{value}`")]
    UploadInvalidDate { row: usize, value: String },
    /// A row where check-out does not come after check-in.
    #[error("row {row} has check-out on or before check-in")]
    UploadDatesOutOfOrder { row: usize },
    /// Reading the uploaded file failed.
    #[error("error reading csv file")]
    FileRead(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Form payload emitted when submitting the "Add booking" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBookingForm {
    /// Sales channel the booking arrived on.
    #[validate(length(min = 1, max = CHANNEL_MAX_LEN_VALIDATOR))]
    pub channel: String,
    /// Optional external reference assigned by the channel.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub reference: Option<String>,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Number of rooms held by the booking.
    #[validate(range(min = 1))]
    pub rooms: i32,
}

impl AddBookingForm {
    /// Validates and sanitizes the payload into a domain `NewBooking`.
    pub fn into_new_booking(self, property_id: i32) -> BookingFormResult<NewBooking> {
        self.validate()?;

        let channel = sanitize_inline_text(&self.channel);
        if channel.is_empty() {
            return Err(BookingFormError::EmptyChannel);
        }

        if self.check_out <= self.check_in {
            return Err(BookingFormError::DatesOutOfOrder);
        }

        let mut new_booking = NewBooking::new(property_id, channel, self.check_in, self.check_out)
            .with_rooms(self.rooms);

        if let Some(reference) = self
            .reference
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
        {
            new_booking = new_booking.with_reference(reference);
        }

        Ok(new_booking)
    }
}

#[derive(MultipartForm)]
/// Multipart form for uploading a channel-export CSV of bookings.
pub struct UploadBookingsForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file containing booking rows.
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct BookingCsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    channel: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reference: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    check_in: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    check_out: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rooms: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

impl UploadBookingsForm {
    /// Parse the uploaded CSV file into a list of [`NewBooking`] records.
    pub fn into_new_bookings(&mut self, property_id: i32) -> BookingFormResult<Vec<NewBooking>> {
        self.csv.file.rewind()?;
        parse_bookings(self.csv.file.by_ref(), property_id)
    }
}

fn parse_bookings<R: Read>(reader: R, property_id: i32) -> BookingFormResult<Vec<NewBooking>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    {
        let headers = csv_reader.headers()?;
        let has = |name: &str| headers.iter().any(|header| header.eq_ignore_ascii_case(name));
        if !has("channel") || !has("check_in") || !has("check_out") {
            return Err(BookingFormError::MissingRequiredHeaders);
        }
    }

    let mut bookings = Vec::new();

    for (index, row) in csv_reader.deserialize::<BookingCsvRow>().enumerate() {
        let row_number = index + 2; // header is row 1
        let record = row?;

        let channel = record
            .channel
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
            .ok_or(BookingFormError::UploadMissingChannel { row: row_number })?;

        let check_in = parse_csv_date(record.check_in.as_deref(), row_number)?;
        let check_out = parse_csv_date(record.check_out.as_deref(), row_number)?;
        if check_out <= check_in {
            return Err(BookingFormError::UploadDatesOutOfOrder { row: row_number });
        }

        let mut booking = NewBooking::new(property_id, channel, check_in, check_out)
            .with_rooms(record.rooms.unwrap_or(1).max(1));

        if let Some(reference) = record.reference {
            booking = booking.with_reference(reference);
        }

        if let Some(status) = record.status.as_deref().and_then(BookingStatus::parse) {
            booking = booking.with_status(status);
        }

        bookings.push(booking);
    }

    Ok(bookings)
}

fn parse_csv_date(value: Option<&str>, row: usize) -> BookingFormResult<NaiveDate> {
    let raw = value.ok_or(BookingFormError::UploadInvalidDate {
        row,
        value: String::new(),
    })?;

    raw.parse().map_err(|_| BookingFormError::UploadInvalidDate {
        row,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    use actix_multipart::form::tempfile::TempFile;
    use tempfile::NamedTempFile;

    #[test]
    fn add_booking_form_converts() {
        let form = AddBookingForm {
            channel: " booking.com ".to_string(),
            reference: Some("BK-1001".to_string()),
            check_in: "2026-07-01".parse().unwrap(),
            check_out: "2026-07-04".parse().unwrap(),
            rooms: 2,
        };

        let booking = form.into_new_booking(3).expect("expected success");

        assert_eq!(booking.property_id, 3);
        assert_eq!(booking.channel, "booking.com");
        assert_eq!(booking.reference.as_deref(), Some("BK-1001"));
        assert_eq!(booking.rooms, 2);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn add_booking_form_rejects_inverted_dates() {
        let form = AddBookingForm {
            channel: "expedia".to_string(),
            reference: None,
            check_in: "2026-07-04".parse().unwrap(),
            check_out: "2026-07-01".parse().unwrap(),
            rooms: 1,
        };

        let result = form.into_new_booking(1);

        assert!(matches!(result, Err(BookingFormError::DatesOutOfOrder)));
    }

    #[test]
    fn upload_form_converts_rows() {
        let mut form = build_upload_form(
            "channel,reference,check_in,check_out,rooms,status\n\
             booking.com,BK-1,2026-07-01,2026-07-03,2,confirmed\n\
             expedia,,2026-07-02,2026-07-05,,pending\n",
        );

        let bookings = form.into_new_bookings(7).expect("expected upload to succeed");

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].channel, "booking.com");
        assert_eq!(bookings[0].rooms, 2);
        assert_eq!(bookings[1].rooms, 1);
        assert_eq!(bookings[1].status, BookingStatus::Pending);
        assert_eq!(bookings[1].property_id, 7);
    }

    #[test]
    fn upload_form_requires_headers() {
        let mut form = build_upload_form("name,arrival\nfoo,2026-07-01\n");

        let result = form.into_new_bookings(1);

        assert!(matches!(
            result,
            Err(BookingFormError::MissingRequiredHeaders)
        ));
    }

    #[test]
    fn upload_form_flags_bad_dates_by_row() {
        let mut form = build_upload_form(
            "channel,check_in,check_out\n\
             airbnb,2026-07-01,2026-07-03\n\
             airbnb,07/09/2026,2026-07-10\n",
        );

        let result = form.into_new_bookings(1);

        assert!(matches!(
            result,
            Err(BookingFormError::UploadInvalidDate { row: 3, .. })
        ));
    }

    fn build_upload_form(csv: &str) -> UploadBookingsForm {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(csv.as_bytes()).expect("write csv file");
        file.as_file_mut()
            .seek(SeekFrom::Start(0))
            .expect("seek to start");

        UploadBookingsForm {
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("bookings.csv".to_string()),
                size: csv.len(),
            },
        }
    }
}
