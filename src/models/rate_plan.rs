use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing_rule::PricingRule as DomainPricingRule;
use crate::domain::rate_plan::{
    NewRatePlan as DomainNewRatePlan, RatePlan as DomainRatePlan,
    UpdateRatePlan as DomainUpdateRatePlan,
};
use crate::models::{from_hundredths, to_hundredths, weekdays_from_csv, weekdays_to_csv};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::rate_plans)]
pub struct RatePlan {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub base_rate_cents: i64,
    pub currency: String,
    pub strategy: String,
    pub status: String,
    pub minimum_rate_cents: Option<i64>,
    pub maximum_rate_cents: Option<i64>,
    pub weekend_pricing_enabled: bool,
    pub weekend_multiplier_hundredths: Option<i64>,
    pub weekend_days: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rate_plans)]
pub struct NewRatePlan<'a> {
    pub property_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub base_rate_cents: i64,
    pub currency: &'a str,
    pub strategy: &'a str,
    pub status: &'a str,
    pub minimum_rate_cents: Option<i64>,
    pub maximum_rate_cents: Option<i64>,
    pub weekend_pricing_enabled: bool,
    pub weekend_multiplier_hundredths: Option<i64>,
    pub weekend_days: String,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::rate_plans)]
pub struct UpdateRatePlan<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub base_rate_cents: Option<i64>,
    pub strategy: Option<&'a str>,
    pub status: Option<&'a str>,
    pub minimum_rate_cents: Option<Option<i64>>,
    pub maximum_rate_cents: Option<Option<i64>>,
    pub weekend_pricing_enabled: Option<bool>,
    pub weekend_multiplier_hundredths: Option<Option<i64>>,
    pub weekend_days: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl RatePlan {
    pub fn into_domain(self, rules: Vec<DomainPricingRule>) -> DomainRatePlan {
        DomainRatePlan {
            id: self.id,
            property_id: self.property_id,
            name: self.name,
            description: self.description,
            base_rate: from_hundredths(self.base_rate_cents),
            currency: self.currency,
            strategy: self.strategy.as_str().into(),
            status: self.status.as_str().into(),
            minimum_rate: self.minimum_rate_cents.map(from_hundredths),
            maximum_rate: self.maximum_rate_cents.map(from_hundredths),
            weekend_pricing_enabled: self.weekend_pricing_enabled,
            weekend_multiplier: self.weekend_multiplier_hundredths.map(from_hundredths),
            weekend_days: weekdays_from_csv(&self.weekend_days),
            rules,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(RatePlan, Vec<DomainPricingRule>)> for DomainRatePlan {
    fn from(value: (RatePlan, Vec<DomainPricingRule>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewRatePlan> for NewRatePlan<'a> {
    fn from(value: &'a DomainNewRatePlan) -> Self {
        Self {
            property_id: value.property_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            base_rate_cents: to_hundredths(value.base_rate),
            currency: value.currency.as_str(),
            strategy: value.strategy.into(),
            status: value.status.into(),
            minimum_rate_cents: value.minimum_rate.map(to_hundredths),
            maximum_rate_cents: value.maximum_rate.map(to_hundredths),
            weekend_pricing_enabled: value.weekend_pricing_enabled,
            weekend_multiplier_hundredths: value.weekend_multiplier.map(to_hundredths),
            weekend_days: weekdays_to_csv(&value.weekend_days),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateRatePlan> for UpdateRatePlan<'a> {
    fn from(value: &'a DomainUpdateRatePlan) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value
                .description
                .as_ref()
                .map(|description| description.as_deref()),
            base_rate_cents: value.base_rate.map(to_hundredths),
            strategy: value.strategy.map(Into::into),
            status: value.status.map(Into::into),
            minimum_rate_cents: value
                .minimum_rate
                .map(|minimum| minimum.map(to_hundredths)),
            maximum_rate_cents: value
                .maximum_rate
                .map(|maximum| maximum.map(to_hundredths)),
            weekend_pricing_enabled: value.weekend_pricing_enabled,
            weekend_multiplier_hundredths: value
                .weekend_multiplier
                .map(|multiplier| multiplier.map(to_hundredths)),
            weekend_days: value.weekend_days.as_deref().map(weekdays_to_csv),
            updated_at: value.updated_at,
        }
    }
}
