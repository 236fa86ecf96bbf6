use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::rate_modifier::{NewRateModifier, RateModifier};

/// Lowest priority a manually authored rule may carry.
pub const PRIORITY_MIN: i32 = 1;
/// Highest priority a manually authored rule may carry.
pub const PRIORITY_MAX: i32 = 10;

/// Kinds of conditions a pricing rule can express.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuleType {
    /// Date falls within an inclusive calendar window.
    DateRange,
    /// Date falls on one of a set of weekdays.
    DayOfWeek,
    /// Occupancy percentage falls within a band.
    OccupancyLevel,
    /// Days between booking and stay fall within a band.
    AdvanceBooking,
    /// Requested stay is at least a number of nights.
    MinimumStay,
    /// Requested stay is at most a number of nights.
    MaximumStay,
}

impl RuleType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date-range" => Some(Self::DateRange),
            "day-of-week" => Some(Self::DayOfWeek),
            "occupancy-level" => Some(Self::OccupancyLevel),
            "advance-booking" => Some(Self::AdvanceBooking),
            "minimum-stay" => Some(Self::MinimumStay),
            "maximum-stay" => Some(Self::MaximumStay),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateRange => "date-range",
            Self::DayOfWeek => "day-of-week",
            Self::OccupancyLevel => "occupancy-level",
            Self::AdvanceBooking => "advance-booking",
            Self::MinimumStay => "minimum-stay",
            Self::MaximumStay => "maximum-stay",
        }
    }
}

impl From<&str> for RuleType {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::DateRange)
    }
}

impl From<RuleType> for &'static str {
    fn from(value: RuleType) -> Self {
        value.as_str()
    }
}

/// Type-specific condition payload.
///
/// Fields outside the rule's declared type are carried along untouched and
/// ignored by evaluation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RuleCondition {
    /// Inclusive start of a date-range window.
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of a date-range window.
    pub end_date: Option<NaiveDate>,
    /// Weekday set for day-of-week rules.
    pub weekdays: Vec<Weekday>,
    /// Lower occupancy bound in whole percent.
    pub min_occupancy: Option<i32>,
    /// Upper occupancy bound in whole percent.
    pub max_occupancy: Option<i32>,
    /// Lower advance-booking bound in days.
    pub min_advance_days: Option<i32>,
    /// Upper advance-booking bound in days.
    pub max_advance_days: Option<i32>,
    /// Stay-length threshold in nights for minimum/maximum-stay rules.
    pub stay_length_nights: Option<i32>,
}

/// Domain representation of a conditional modifier set owned by one rate plan.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PricingRule {
    /// Unique identifier of the rule.
    pub id: i32,
    /// Owning rate plan identifier.
    pub rate_plan_id: i32,
    /// Human-readable name recorded in calendar output when the rule fires.
    pub name: String,
    /// Declared condition type.
    pub rule_type: RuleType,
    /// Condition payload for the declared type.
    pub condition: RuleCondition,
    /// Disabled rules never match and never affect rates.
    pub enabled: bool,
    /// Priority 1-10, higher evaluated first.
    pub priority: i32,
    /// Declaration order inside the plan, used to break priority ties.
    pub position: i32,
    /// Modifiers applied in listed order when the rule fires.
    pub modifiers: Vec<RateModifier>,
    /// Timestamp for when the rule record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the rule record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new pricing rule.
#[derive(Debug, Clone)]
pub struct NewPricingRule {
    /// Owning rate plan identifier.
    pub rate_plan_id: i32,
    /// Human-readable name of the rule.
    pub name: String,
    /// Declared condition type.
    pub rule_type: RuleType,
    /// Condition payload for the declared type.
    pub condition: RuleCondition,
    /// Whether the rule participates in evaluation.
    pub enabled: bool,
    /// Priority 1-10, clamped on construction.
    pub priority: i32,
    /// Modifiers created together with the rule.
    pub modifiers: Vec<NewRateModifier>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewPricingRule {
    /// Build a new rule payload; priority is clamped to the 1-10 range.
    pub fn new(
        rate_plan_id: i32,
        name: impl Into<String>,
        rule_type: RuleType,
        condition: RuleCondition,
        priority: i32,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            rate_plan_id,
            name: name.into().trim().to_string(),
            rule_type,
            condition,
            enabled: true,
            priority: priority.clamp(PRIORITY_MIN, PRIORITY_MAX),
            modifiers: Vec::new(),
            updated_at: now,
        }
    }

    /// Start the rule disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Append a modifier to the rule payload.
    pub fn with_modifier(mut self, modifier: NewRateModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// Patch data applied when updating an existing pricing rule.
#[derive(Debug, Clone)]
pub struct UpdatePricingRule {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional rule type update.
    pub rule_type: Option<RuleType>,
    /// Optional condition payload replacement.
    pub condition: Option<RuleCondition>,
    /// Optional enabled toggle.
    pub enabled: Option<bool>,
    /// Optional priority update, clamped to the 1-10 range.
    pub priority: Option<i32>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdatePricingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdatePricingRule {
    /// Create a patch with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            rule_type: None,
            condition: None,
            enabled: None,
            priority: None,
            updated_at: now,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = Some(rule_type);
        self
    }

    pub fn condition(mut self, condition: RuleCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority.clamp(PRIORITY_MIN, PRIORITY_MAX));
        self
    }
}
