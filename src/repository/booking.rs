use chrono::NaiveDate;
use diesel::dsl::sum;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::{
    domain::booking::{
        Booking as DomainBooking, BookingListQuery, BookingStatus,
        NewBooking as DomainNewBooking, UpdateBooking as DomainUpdateBooking,
    },
    domain::calendar::OccupancySnapshot,
    models::booking::{
        Booking as DbBooking, NewBooking as DbNewBooking, UpdateBooking as DbUpdateBooking,
    },
    models::property::Property as DbProperty,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{AvailabilityReader, BookingReader, BookingWriter, DieselRepository},
};

impl BookingReader for DieselRepository {
    fn get_booking_by_id(
        &self,
        id: i32,
        property_id: i32,
    ) -> RepositoryResult<Option<DomainBooking>> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let booking = bookings::table
            .filter(bookings::id.eq(id))
            .filter(bookings::property_id.eq(property_id))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        Ok(booking.map(Into::into))
    }

    fn list_bookings(
        &self,
        query: BookingListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainBooking>)> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let mut count_query = bookings::table
            .filter(bookings::property_id.eq(query.property_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            count_query = count_query.filter(bookings::status.eq(status.as_str()));
        }

        if let Some(channel) = query.channel.as_ref() {
            count_query = count_query.filter(bookings::channel.eq(channel));
        }

        if let Some(date) = query.arriving_on {
            count_query = count_query.filter(bookings::check_in.eq(date));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                bookings::reference
                    .like(pattern.clone())
                    .or(bookings::channel.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = bookings::table
            .filter(bookings::property_id.eq(query.property_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            items = items.filter(bookings::status.eq(status.as_str()));
        }

        if let Some(channel) = query.channel.as_ref() {
            items = items.filter(bookings::channel.eq(channel));
        }

        if let Some(date) = query.arriving_on {
            items = items.filter(bookings::check_in.eq(date));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                bookings::reference
                    .like(pattern.clone())
                    .or(bookings::channel.like(pattern)),
            );
        }

        items = items.order((bookings::check_in.asc(), bookings::created_at.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_bookings = items.load::<DbBooking>(&mut conn)?;

        Ok((total, db_bookings.into_iter().map(Into::into).collect()))
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(&self, new_booking: &DomainNewBooking) -> RepositoryResult<DomainBooking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_new = DbNewBooking::from(new_booking);

        let created = diesel::insert_into(bookings::table)
            .values(&db_new)
            .get_result::<DbBooking>(&mut conn)?;

        Ok(created.into())
    }

    fn create_bookings(&self, new_bookings: &[DomainNewBooking]) -> RepositoryResult<usize> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let mut inserted = 0;
            for new_booking in new_bookings {
                let db_new = DbNewBooking::from(new_booking);
                inserted += diesel::insert_into(bookings::table)
                    .values(&db_new)
                    .execute(conn)?;
            }
            Ok::<usize, RepositoryError>(inserted)
        })
    }

    fn update_booking(
        &self,
        booking_id: i32,
        property_id: i32,
        updates: &DomainUpdateBooking,
    ) -> RepositoryResult<DomainBooking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateBooking::from(updates);

        let target = bookings::table
            .filter(bookings::id.eq(booking_id))
            .filter(bookings::property_id.eq(property_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbBooking>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_booking(&self, booking_id: i32, property_id: i32) -> RepositoryResult<()> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let target = bookings::table
            .filter(bookings::id.eq(booking_id))
            .filter(bookings::property_id.eq(property_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

impl AvailabilityReader for DieselRepository {
    fn day_occupancy(
        &self,
        property_id: i32,
        date: NaiveDate,
    ) -> RepositoryResult<OccupancySnapshot> {
        use crate::schema::{bookings, properties};

        let mut conn = self.conn()?;

        let property = properties::table
            .filter(properties::id.eq(property_id))
            .first::<DbProperty>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        // Shared inventory: every channel draws on the same rooms, so the
        // booked count aggregates confirmed bookings across all channels.
        let booked = bookings::table
            .filter(bookings::property_id.eq(property_id))
            .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
            .filter(bookings::check_in.le(date))
            .filter(bookings::check_out.gt(date))
            .select(sum(bookings::rooms))
            .first::<Option<i64>>(&mut conn)?
            .unwrap_or(0) as i32;

        let total_rooms = property.total_rooms.max(0);
        let available = (total_rooms - booked).max(0);
        let occupancy_percent = if total_rooms > 0 {
            (Decimal::from(booked.min(total_rooms)) * Decimal::ONE_HUNDRED
                / Decimal::from(total_rooms))
            .round_dp(2)
        } else {
            Decimal::ZERO
        };

        Ok(OccupancySnapshot {
            date,
            booked_rooms: booked,
            available_rooms: available,
            occupancy_percent,
        })
    }
}
