use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::automation::{
    AutomationSettings as DomainAutomationSettings, OccupancyStep,
    UpdateAutomationSettings as DomainUpdateAutomationSettings,
};
use crate::models::{from_hundredths, to_hundredths};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::automation_settings)]
pub struct AutomationSettings {
    pub id: i32,
    pub rate_plan_id: i32,
    pub enabled: bool,
    pub max_adjustment_percent_hundredths: Option<i64>,
    pub occupancy_steps: String,
    pub min_demand_multiplier_hundredths: Option<i64>,
    pub max_demand_multiplier_hundredths: Option<i64>,
    pub last_minute_days: Option<i32>,
    pub last_minute_discount_hundredths: Option<i64>,
    pub early_bird_days: Option<i32>,
    pub early_bird_discount_hundredths: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::automation_settings)]
pub struct UpsertAutomationSettings {
    pub rate_plan_id: i32,
    pub enabled: bool,
    pub max_adjustment_percent_hundredths: Option<i64>,
    pub occupancy_steps: String,
    pub min_demand_multiplier_hundredths: Option<i64>,
    pub max_demand_multiplier_hundredths: Option<i64>,
    pub last_minute_days: Option<i32>,
    pub last_minute_discount_hundredths: Option<i64>,
    pub early_bird_days: Option<i32>,
    pub early_bird_discount_hundredths: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl From<AutomationSettings> for DomainAutomationSettings {
    fn from(value: AutomationSettings) -> Self {
        // A malformed ladder degrades to "no steps" rather than an error.
        let occupancy_steps: Vec<OccupancyStep> =
            serde_json::from_str(&value.occupancy_steps).unwrap_or_default();

        Self {
            id: value.id,
            rate_plan_id: value.rate_plan_id,
            enabled: value.enabled,
            max_adjustment_percent: value
                .max_adjustment_percent_hundredths
                .map(from_hundredths),
            occupancy_steps,
            min_demand_multiplier: value.min_demand_multiplier_hundredths.map(from_hundredths),
            max_demand_multiplier: value.max_demand_multiplier_hundredths.map(from_hundredths),
            last_minute_days: value.last_minute_days,
            last_minute_discount_percent: value
                .last_minute_discount_hundredths
                .map(from_hundredths),
            early_bird_days: value.early_bird_days,
            early_bird_discount_percent: value.early_bird_discount_hundredths.map(from_hundredths),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl UpsertAutomationSettings {
    pub fn from_domain(rate_plan_id: i32, value: &DomainUpdateAutomationSettings) -> Self {
        let occupancy_steps = serde_json::to_string(&value.occupancy_steps)
            .unwrap_or_else(|_| String::from("[]"));

        Self {
            rate_plan_id,
            enabled: value.enabled,
            max_adjustment_percent_hundredths: value.max_adjustment_percent.map(to_hundredths),
            occupancy_steps,
            min_demand_multiplier_hundredths: value.min_demand_multiplier.map(to_hundredths),
            max_demand_multiplier_hundredths: value.max_demand_multiplier.map(to_hundredths),
            last_minute_days: value.last_minute_days,
            last_minute_discount_hundredths: value
                .last_minute_discount_percent
                .map(to_hundredths),
            early_bird_days: value.early_bird_days,
            early_bird_discount_hundredths: value.early_bird_discount_percent.map(to_hundredths),
            updated_at: value.updated_at,
        }
    }
}
