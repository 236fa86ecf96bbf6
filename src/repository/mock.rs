use chrono::NaiveDate;
use mockall::mock;

use super::{
    AutomationReader, AvailabilityReader, BookingReader, BookingWriter, PricingRuleReader,
    PricingRuleWriter, RatePlanReader, RatePlanWriter,
};
use crate::domain::automation::AutomationSettings;
use crate::domain::booking::{Booking, BookingListQuery, NewBooking, UpdateBooking};
use crate::domain::calendar::OccupancySnapshot;
use crate::domain::pricing_rule::{NewPricingRule, PricingRule, UpdatePricingRule};
use crate::domain::rate_modifier::{NewRateModifier, RateModifier};
use crate::domain::rate_plan::{NewRatePlan, RatePlan, RatePlanListQuery, UpdateRatePlan};
use crate::repository::errors::RepositoryResult;

mock! {
    pub RatePlanRepository {}

    impl RatePlanReader for RatePlanRepository {
        fn get_rate_plan_by_id(&self, id: i32, property_id: i32) -> RepositoryResult<Option<RatePlan>>;
        fn list_rate_plans(&self, query: RatePlanListQuery) -> RepositoryResult<(usize, Vec<RatePlan>)>;
    }

    impl RatePlanWriter for RatePlanRepository {
        fn create_rate_plan(&self, new_rate_plan: &NewRatePlan) -> RepositoryResult<RatePlan>;
        fn update_rate_plan(&self, rate_plan_id: i32, property_id: i32, updates: &UpdateRatePlan) -> RepositoryResult<RatePlan>;
        fn delete_rate_plan(&self, rate_plan_id: i32, property_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub RuleRepository {}

    impl RatePlanReader for RuleRepository {
        fn get_rate_plan_by_id(&self, id: i32, property_id: i32) -> RepositoryResult<Option<RatePlan>>;
        fn list_rate_plans(&self, query: RatePlanListQuery) -> RepositoryResult<(usize, Vec<RatePlan>)>;
    }

    impl PricingRuleReader for RuleRepository {
        fn get_rule_by_id(&self, id: i32, rate_plan_id: i32) -> RepositoryResult<Option<PricingRule>>;
        fn list_rules(&self, rate_plan_id: i32) -> RepositoryResult<Vec<PricingRule>>;
    }

    impl PricingRuleWriter for RuleRepository {
        fn create_rule(&self, new_rule: &NewPricingRule) -> RepositoryResult<PricingRule>;
        fn update_rule(&self, rule_id: i32, rate_plan_id: i32, updates: &UpdatePricingRule) -> RepositoryResult<PricingRule>;
        fn delete_rule(&self, rule_id: i32, rate_plan_id: i32) -> RepositoryResult<()>;
        fn add_modifier(&self, rule_id: i32, new_modifier: &NewRateModifier) -> RepositoryResult<RateModifier>;
        fn delete_modifier(&self, modifier_id: i32, rule_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CalendarRepository {}

    impl RatePlanReader for CalendarRepository {
        fn get_rate_plan_by_id(&self, id: i32, property_id: i32) -> RepositoryResult<Option<RatePlan>>;
        fn list_rate_plans(&self, query: RatePlanListQuery) -> RepositoryResult<(usize, Vec<RatePlan>)>;
    }

    impl AutomationReader for CalendarRepository {
        fn get_automation_settings(&self, rate_plan_id: i32) -> RepositoryResult<Option<AutomationSettings>>;
    }

    impl AvailabilityReader for CalendarRepository {
        fn day_occupancy(&self, property_id: i32, date: NaiveDate) -> RepositoryResult<OccupancySnapshot>;
    }
}

mock! {
    pub BookingRepository {}

    impl BookingReader for BookingRepository {
        fn get_booking_by_id(&self, id: i32, property_id: i32) -> RepositoryResult<Option<Booking>>;
        fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)>;
    }

    impl BookingWriter for BookingRepository {
        fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
        fn create_bookings(&self, new_bookings: &[NewBooking]) -> RepositoryResult<usize>;
        fn update_booking(&self, booking_id: i32, property_id: i32, updates: &UpdateBooking) -> RepositoryResult<Booking>;
        fn delete_booking(&self, booking_id: i32, property_id: i32) -> RepositoryResult<()>;
    }
}
