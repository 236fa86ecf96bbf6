use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of the occupancy-based adjustment ladder.
///
/// Consumed by the backend pricing service; this application only edits and
/// displays the ladder.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OccupancyStep {
    /// Occupancy percentage at which the step starts to apply.
    pub min_occupancy: i32,
    /// Signed percentage adjustment contributed by the step.
    pub adjustment_percent: Decimal,
}

/// Per-plan automation policy.
///
/// Only `enabled` and `max_adjustment_percent` feed local rate evaluation
/// (the daily-delta clamp); the remaining fields configure the backend
/// pricing service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AutomationSettings {
    /// Unique identifier of the settings record.
    pub id: i32,
    /// Owning rate plan identifier (one settings record per plan).
    pub rate_plan_id: i32,
    /// Master switch for automatic pricing on the plan.
    pub enabled: bool,
    /// Largest allowed net change from the base rate per day, in percent.
    pub max_adjustment_percent: Option<Decimal>,
    /// Occupancy-based adjustment ladder, ordered by `min_occupancy`.
    pub occupancy_steps: Vec<OccupancyStep>,
    /// Lower bound for the demand multiplier.
    pub min_demand_multiplier: Option<Decimal>,
    /// Upper bound for the demand multiplier.
    pub max_demand_multiplier: Option<Decimal>,
    /// Window, in days before arrival, for the last-minute discount.
    pub last_minute_days: Option<i32>,
    /// Last-minute discount in percent.
    pub last_minute_discount_percent: Option<Decimal>,
    /// Lead time, in days before arrival, for the early-bird discount.
    pub early_bird_days: Option<i32>,
    /// Early-bird discount in percent.
    pub early_bird_discount_percent: Option<Decimal>,
    /// Timestamp for when the settings record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the settings record.
    pub updated_at: NaiveDateTime,
}

/// Full-replacement payload used when saving the automation page.
#[derive(Debug, Clone)]
pub struct UpdateAutomationSettings {
    /// Master switch for automatic pricing on the plan.
    pub enabled: bool,
    /// Largest allowed net change from the base rate per day, in percent.
    pub max_adjustment_percent: Option<Decimal>,
    /// Occupancy-based adjustment ladder, ordered by `min_occupancy`.
    pub occupancy_steps: Vec<OccupancyStep>,
    /// Lower bound for the demand multiplier.
    pub min_demand_multiplier: Option<Decimal>,
    /// Upper bound for the demand multiplier.
    pub max_demand_multiplier: Option<Decimal>,
    /// Window, in days before arrival, for the last-minute discount.
    pub last_minute_days: Option<i32>,
    /// Last-minute discount in percent.
    pub last_minute_discount_percent: Option<Decimal>,
    /// Lead time, in days before arrival, for the early-bird discount.
    pub early_bird_days: Option<i32>,
    /// Early-bird discount in percent.
    pub early_bird_discount_percent: Option<Decimal>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateAutomationSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateAutomationSettings {
    /// Create a payload with automation switched off and nothing configured.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            enabled: false,
            max_adjustment_percent: None,
            occupancy_steps: Vec::new(),
            min_demand_multiplier: None,
            max_demand_multiplier: None,
            last_minute_days: None,
            last_minute_discount_percent: None,
            early_bird_days: None,
            early_bird_discount_percent: None,
            updated_at: now,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn max_adjustment_percent(mut self, value: Option<Decimal>) -> Self {
        self.max_adjustment_percent = value;
        self
    }

    pub fn occupancy_steps(mut self, steps: Vec<OccupancyStep>) -> Self {
        self.occupancy_steps = steps;
        self
    }

    pub fn demand_multiplier_bounds(
        mut self,
        minimum: Option<Decimal>,
        maximum: Option<Decimal>,
    ) -> Self {
        self.min_demand_multiplier = minimum;
        self.max_demand_multiplier = maximum;
        self
    }

    pub fn last_minute_discount(mut self, days: Option<i32>, percent: Option<Decimal>) -> Self {
        self.last_minute_days = days;
        self.last_minute_discount_percent = percent;
        self
    }

    pub fn early_bird_discount(mut self, days: Option<i32>, percent: Option<Decimal>) -> Self {
        self.early_bird_days = days;
        self.early_bird_discount_percent = percent;
        self
    }
}
