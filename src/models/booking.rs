use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::booking::{
    Booking as DomainBooking, NewBooking as DomainNewBooking, UpdateBooking as DomainUpdateBooking,
};
use crate::models::property::Property;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(belongs_to(Property, foreign_key = property_id))]
pub struct Booking {
    pub id: i32,
    pub property_id: i32,
    pub channel: String,
    pub reference: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking<'a> {
    pub property_id: i32,
    pub channel: &'a str,
    pub reference: Option<&'a str>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bookings)]
pub struct UpdateBooking {
    pub status: Option<&'static str>,
    pub rooms: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<Booking> for DomainBooking {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id,
            property_id: value.property_id,
            channel: value.channel,
            reference: value.reference,
            check_in: value.check_in,
            check_out: value.check_out,
            rooms: value.rooms,
            status: value.status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBooking> for NewBooking<'a> {
    fn from(value: &'a DomainNewBooking) -> Self {
        Self {
            property_id: value.property_id,
            channel: value.channel.as_str(),
            reference: value.reference.as_deref(),
            check_in: value.check_in,
            check_out: value.check_out,
            rooms: value.rooms,
            status: value.status.into(),
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainUpdateBooking> for UpdateBooking {
    fn from(value: &DomainUpdateBooking) -> Self {
        Self {
            status: value.status.map(Into::into),
            rooms: value.rooms,
            updated_at: value.updated_at,
        }
    }
}
