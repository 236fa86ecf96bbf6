use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::pricing_rule::{
    NewPricingRule as DomainNewPricingRule, PricingRule as DomainPricingRule, RuleCondition,
    UpdatePricingRule as DomainUpdatePricingRule,
};
use crate::domain::rate_modifier::RateModifier as DomainRateModifier;
use crate::models::rate_plan::RatePlan;
use crate::models::{weekdays_from_csv, weekdays_to_csv};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::pricing_rules)]
#[diesel(belongs_to(RatePlan, foreign_key = rate_plan_id))]
pub struct PricingRule {
    pub id: i32,
    pub rate_plan_id: i32,
    pub name: String,
    pub rule_type: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub weekdays: String,
    pub min_occupancy: Option<i32>,
    pub max_occupancy: Option<i32>,
    pub min_advance_days: Option<i32>,
    pub max_advance_days: Option<i32>,
    pub stay_length_nights: Option<i32>,
    pub enabled: bool,
    pub priority: i32,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pricing_rules)]
pub struct NewPricingRule<'a> {
    pub rate_plan_id: i32,
    pub name: &'a str,
    pub rule_type: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub weekdays: String,
    pub min_occupancy: Option<i32>,
    pub max_occupancy: Option<i32>,
    pub min_advance_days: Option<i32>,
    pub max_advance_days: Option<i32>,
    pub stay_length_nights: Option<i32>,
    pub enabled: bool,
    pub priority: i32,
    pub position: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::pricing_rules)]
pub struct UpdatePricingRule<'a> {
    pub name: Option<&'a str>,
    pub rule_type: Option<&'a str>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub weekdays: Option<String>,
    pub min_occupancy: Option<Option<i32>>,
    pub max_occupancy: Option<Option<i32>>,
    pub min_advance_days: Option<Option<i32>>,
    pub max_advance_days: Option<Option<i32>>,
    pub stay_length_nights: Option<Option<i32>>,
    pub enabled: Option<bool>,
    pub priority: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl PricingRule {
    pub fn into_domain(self, modifiers: Vec<DomainRateModifier>) -> DomainPricingRule {
        DomainPricingRule {
            id: self.id,
            rate_plan_id: self.rate_plan_id,
            name: self.name,
            rule_type: self.rule_type.as_str().into(),
            condition: RuleCondition {
                start_date: self.start_date,
                end_date: self.end_date,
                weekdays: weekdays_from_csv(&self.weekdays),
                min_occupancy: self.min_occupancy,
                max_occupancy: self.max_occupancy,
                min_advance_days: self.min_advance_days,
                max_advance_days: self.max_advance_days,
                stay_length_nights: self.stay_length_nights,
            },
            enabled: self.enabled,
            priority: self.priority,
            position: self.position,
            modifiers,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(PricingRule, Vec<DomainRateModifier>)> for DomainPricingRule {
    fn from(value: (PricingRule, Vec<DomainRateModifier>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> NewPricingRule<'a> {
    /// Build the insertable row; `position` is assigned by the repository
    /// inside the create transaction.
    pub fn from_domain(value: &'a DomainNewPricingRule, position: i32) -> Self {
        Self {
            rate_plan_id: value.rate_plan_id,
            name: value.name.as_str(),
            rule_type: value.rule_type.into(),
            start_date: value.condition.start_date,
            end_date: value.condition.end_date,
            weekdays: weekdays_to_csv(&value.condition.weekdays),
            min_occupancy: value.condition.min_occupancy,
            max_occupancy: value.condition.max_occupancy,
            min_advance_days: value.condition.min_advance_days,
            max_advance_days: value.condition.max_advance_days,
            stay_length_nights: value.condition.stay_length_nights,
            enabled: value.enabled,
            priority: value.priority,
            position,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdatePricingRule> for UpdatePricingRule<'a> {
    fn from(value: &'a DomainUpdatePricingRule) -> Self {
        let condition = value.condition.as_ref();
        Self {
            name: value.name.as_deref(),
            rule_type: value.rule_type.map(Into::into),
            start_date: condition.map(|c| c.start_date),
            end_date: condition.map(|c| c.end_date),
            weekdays: condition.map(|c| weekdays_to_csv(&c.weekdays)),
            min_occupancy: condition.map(|c| c.min_occupancy),
            max_occupancy: condition.map(|c| c.max_occupancy),
            min_advance_days: condition.map(|c| c.min_advance_days),
            max_advance_days: condition.map(|c| c.max_advance_days),
            stay_length_nights: condition.map(|c| c.stay_length_nights),
            enabled: value.enabled,
            priority: value.priority,
            updated_at: value.updated_at,
        }
    }
}
