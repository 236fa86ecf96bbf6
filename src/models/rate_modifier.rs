use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::rate_modifier::{
    NewRateModifier as DomainNewRateModifier, RateModifier as DomainRateModifier,
};
use crate::models::pricing_rule::PricingRule;
use crate::models::{from_hundredths, to_hundredths};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::rate_modifiers)]
#[diesel(belongs_to(PricingRule, foreign_key = rule_id))]
pub struct RateModifier {
    pub id: i32,
    pub rule_id: i32,
    pub kind: String,
    pub value_hundredths: i64,
    pub apply_to_base_rate: bool,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::rate_modifiers)]
pub struct NewRateModifier<'a> {
    pub rule_id: i32,
    pub kind: &'a str,
    pub value_hundredths: i64,
    pub apply_to_base_rate: bool,
    pub description: Option<&'a str>,
    pub position: i32,
}

impl From<RateModifier> for DomainRateModifier {
    fn from(value: RateModifier) -> Self {
        Self {
            id: value.id,
            rule_id: value.rule_id,
            kind: value.kind.as_str().into(),
            value: from_hundredths(value.value_hundredths),
            apply_to_base_rate: value.apply_to_base_rate,
            description: value.description,
            position: value.position,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewRateModifier<'a> {
    /// Build the insertable row for a modifier owned by `rule_id`.
    pub fn from_domain(rule_id: i32, value: &'a DomainNewRateModifier, position: i32) -> Self {
        Self {
            rule_id,
            kind: value.kind.into(),
            value_hundredths: to_hundredths(value.value),
            apply_to_base_rate: value.apply_to_base_rate,
            description: value.description.as_deref(),
            position,
        }
    }
}
