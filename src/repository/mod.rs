use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool};
use crate::domain::automation::{AutomationSettings, UpdateAutomationSettings};
use crate::domain::booking::{Booking, BookingListQuery, NewBooking, UpdateBooking};
use crate::domain::calendar::OccupancySnapshot;
use crate::domain::pricing_rule::{NewPricingRule, PricingRule, UpdatePricingRule};
use crate::domain::property::{NewProperty, Property, PropertyListQuery, UpdateProperty};
use crate::domain::rate_modifier::{NewRateModifier, RateModifier};
use crate::domain::rate_plan::{NewRatePlan, RatePlan, RatePlanListQuery, UpdateRatePlan};
use crate::repository::errors::RepositoryResult;

pub mod automation;
pub mod booking;
pub mod errors;
pub mod pricing_rule;
pub mod property;
pub mod rate_plan;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over property records.
pub trait PropertyReader {
    fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<Property>>;
    fn list_properties(&self, query: PropertyListQuery)
    -> RepositoryResult<(usize, Vec<Property>)>;
}

/// Write operations over property records.
pub trait PropertyWriter {
    fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property>;
    fn update_property(
        &self,
        property_id: i32,
        updates: &UpdateProperty,
    ) -> RepositoryResult<Property>;
    fn delete_property(&self, property_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over rate plans; plans come back with their rules
/// and modifiers in declaration order.
pub trait RatePlanReader {
    fn get_rate_plan_by_id(&self, id: i32, property_id: i32)
    -> RepositoryResult<Option<RatePlan>>;
    fn list_rate_plans(&self, query: RatePlanListQuery)
    -> RepositoryResult<(usize, Vec<RatePlan>)>;
}

/// Write operations over rate plans.
pub trait RatePlanWriter {
    fn create_rate_plan(&self, new_rate_plan: &NewRatePlan) -> RepositoryResult<RatePlan>;
    fn update_rate_plan(
        &self,
        rate_plan_id: i32,
        property_id: i32,
        updates: &UpdateRatePlan,
    ) -> RepositoryResult<RatePlan>;
    fn delete_rate_plan(&self, rate_plan_id: i32, property_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over pricing rules.
pub trait PricingRuleReader {
    fn get_rule_by_id(&self, id: i32, rate_plan_id: i32)
    -> RepositoryResult<Option<PricingRule>>;
    fn list_rules(&self, rate_plan_id: i32) -> RepositoryResult<Vec<PricingRule>>;
}

/// Write operations over pricing rules and their modifiers.
pub trait PricingRuleWriter {
    fn create_rule(&self, new_rule: &NewPricingRule) -> RepositoryResult<PricingRule>;
    fn update_rule(
        &self,
        rule_id: i32,
        rate_plan_id: i32,
        updates: &UpdatePricingRule,
    ) -> RepositoryResult<PricingRule>;
    fn delete_rule(&self, rule_id: i32, rate_plan_id: i32) -> RepositoryResult<()>;
    fn add_modifier(
        &self,
        rule_id: i32,
        new_modifier: &NewRateModifier,
    ) -> RepositoryResult<RateModifier>;
    fn delete_modifier(&self, modifier_id: i32, rule_id: i32) -> RepositoryResult<()>;
}

/// Read operations over per-plan automation settings.
pub trait AutomationReader {
    fn get_automation_settings(
        &self,
        rate_plan_id: i32,
    ) -> RepositoryResult<Option<AutomationSettings>>;
}

/// Write operations over per-plan automation settings.
pub trait AutomationWriter {
    fn upsert_automation_settings(
        &self,
        rate_plan_id: i32,
        updates: &UpdateAutomationSettings,
    ) -> RepositoryResult<AutomationSettings>;
}

/// Read-only operations over booking records.
pub trait BookingReader {
    fn get_booking_by_id(&self, id: i32, property_id: i32) -> RepositoryResult<Option<Booking>>;
    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)>;
}

/// Write operations over booking records.
pub trait BookingWriter {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
    fn create_bookings(&self, new_bookings: &[NewBooking]) -> RepositoryResult<usize>;
    fn update_booking(
        &self,
        booking_id: i32,
        property_id: i32,
        updates: &UpdateBooking,
    ) -> RepositoryResult<Booking>;
    fn delete_booking(&self, booking_id: i32, property_id: i32) -> RepositoryResult<()>;
}

/// Shared-inventory availability derived from confirmed bookings across all
/// sales channels.
pub trait AvailabilityReader {
    fn day_occupancy(&self, property_id: i32, date: NaiveDate)
    -> RepositoryResult<OccupancySnapshot>;
}
