use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::pricing_rule::PricingRule;
use crate::pagination::Pagination;

/// Weekend days assumed when a plan does not configure its own set.
pub const DEFAULT_WEEKEND_DAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

/// How the plan's nightly rate is meant to be driven.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PricingStrategy {
    /// Base rate only, adjusted by manually authored rules.
    Fixed,
    /// Rates move with authored rules and automation policy.
    Dynamic,
    /// Rates keyed to the property's occupancy level.
    OccupancyBased,
    /// Rates keyed to demand signals from the backend pricing service.
    DemandBased,
    /// Rates keyed to competitor prices from the backend pricing service.
    CompetitorBased,
}

impl Default for PricingStrategy {
    fn default() -> Self {
        Self::Fixed
    }
}

impl PricingStrategy {
    /// Strict parse used at the form boundary.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(Self::Fixed),
            "dynamic" => Some(Self::Dynamic),
            "occupancy-based" => Some(Self::OccupancyBased),
            "demand-based" => Some(Self::DemandBased),
            "competitor-based" => Some(Self::CompetitorBased),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Dynamic => "dynamic",
            Self::OccupancyBased => "occupancy-based",
            Self::DemandBased => "demand-based",
            Self::CompetitorBased => "competitor-based",
        }
    }
}

// Lenient conversion for values read back from the database.
impl From<&str> for PricingStrategy {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<PricingStrategy> for &'static str {
    fn from(value: PricingStrategy) -> Self {
        value.as_str()
    }
}

/// Lifecycle states of a rate plan.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatePlanStatus {
    /// Being authored, not used for pricing yet.
    Draft,
    /// Live and selectable for pricing.
    Active,
    /// Temporarily switched off.
    Inactive,
    /// Retired and hidden from pickers.
    Archived,
}

impl Default for RatePlanStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl RatePlanStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Archived => "archived",
        }
    }
}

impl From<&str> for RatePlanStatus {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<RatePlanStatus> for &'static str {
    fn from(value: RatePlanStatus) -> Self {
        value.as_str()
    }
}

/// Domain representation of a named pricing configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RatePlan {
    /// Unique identifier of the plan.
    pub id: i32,
    /// Owning property identifier.
    pub property_id: i32,
    /// Human-readable name of the plan.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Base nightly rate before any rules apply.
    pub base_rate: Decimal,
    /// ISO 4217 currency code for all rates in the plan.
    pub currency: String,
    /// Pricing strategy selected for the plan.
    pub strategy: PricingStrategy,
    /// Current lifecycle status.
    pub status: RatePlanStatus,
    /// Optional floor applied after all rules.
    pub minimum_rate: Option<Decimal>,
    /// Optional ceiling applied after all rules.
    pub maximum_rate: Option<Decimal>,
    /// Whether the weekend multiplier participates in evaluation.
    pub weekend_pricing_enabled: bool,
    /// Multiplier applied on weekend days; present whenever weekend pricing is on.
    pub weekend_multiplier: Option<Decimal>,
    /// Days the plan treats as its weekend.
    pub weekend_days: Vec<Weekday>,
    /// Conditional rules in declaration order.
    pub rules: Vec<PricingRule>,
    /// Timestamp for when the plan record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the plan record.
    pub updated_at: NaiveDateTime,
}

impl RatePlan {
    /// Whether `date` falls on one of the plan's weekend days.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }
}

/// Payload required to insert a new rate plan.
#[derive(Debug, Clone)]
pub struct NewRatePlan {
    /// Owning property identifier.
    pub property_id: i32,
    /// Human-readable name of the plan.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Base nightly rate before any rules apply.
    pub base_rate: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Pricing strategy selected for the plan.
    pub strategy: PricingStrategy,
    /// Initial lifecycle status.
    pub status: RatePlanStatus,
    /// Optional floor applied after all rules.
    pub minimum_rate: Option<Decimal>,
    /// Optional ceiling applied after all rules.
    pub maximum_rate: Option<Decimal>,
    /// Whether the weekend multiplier participates in evaluation.
    pub weekend_pricing_enabled: bool,
    /// Multiplier applied on weekend days.
    pub weekend_multiplier: Option<Decimal>,
    /// Days the plan treats as its weekend.
    pub weekend_days: Vec<Weekday>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewRatePlan {
    /// Build a new plan payload with defaults and the current timestamp.
    pub fn new(
        property_id: i32,
        name: impl Into<String>,
        base_rate: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            property_id,
            name: name.into().trim().to_string(),
            description: None,
            base_rate,
            currency: currency.into(),
            strategy: PricingStrategy::default(),
            status: RatePlanStatus::default(),
            minimum_rate: None,
            maximum_rate: None,
            weekend_pricing_enabled: false,
            weekend_multiplier: None,
            weekend_days: DEFAULT_WEEKEND_DAYS.to_vec(),
            updated_at: now,
        }
    }

    /// Attach a description to the payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the default pricing strategy.
    pub fn with_strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the default lifecycle status.
    pub fn with_status(mut self, status: RatePlanStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the floor/ceiling pair applied after all rules.
    pub fn with_rate_bounds(mut self, minimum: Option<Decimal>, maximum: Option<Decimal>) -> Self {
        self.minimum_rate = minimum;
        self.maximum_rate = maximum;
        self
    }

    /// Enable weekend pricing with the given multiplier and day set.
    pub fn with_weekend_pricing(mut self, multiplier: Decimal, days: Vec<Weekday>) -> Self {
        self.weekend_pricing_enabled = true;
        self.weekend_multiplier = Some(multiplier);
        if !days.is_empty() {
            self.weekend_days = days;
        }
        self
    }
}

/// Patch data applied when updating an existing rate plan.
#[derive(Debug, Clone)]
pub struct UpdateRatePlan {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update, using inner `None` to clear the value.
    pub description: Option<Option<String>>,
    /// Optional base rate update.
    pub base_rate: Option<Decimal>,
    /// Optional strategy update.
    pub strategy: Option<PricingStrategy>,
    /// Optional status update.
    pub status: Option<RatePlanStatus>,
    /// Optional floor update, using inner `None` to clear the value.
    pub minimum_rate: Option<Option<Decimal>>,
    /// Optional ceiling update, using inner `None` to clear the value.
    pub maximum_rate: Option<Option<Decimal>>,
    /// Optional weekend pricing toggle.
    pub weekend_pricing_enabled: Option<bool>,
    /// Optional weekend multiplier update, using inner `None` to clear the value.
    pub weekend_multiplier: Option<Option<Decimal>>,
    /// Optional weekend day set update.
    pub weekend_days: Option<Vec<Weekday>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateRatePlan {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRatePlan {
    /// Create a patch with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            description: None,
            base_rate: None,
            strategy: None,
            status: None,
            minimum_rate: None,
            maximum_rate: None,
            weekend_pricing_enabled: None,
            weekend_multiplier: None,
            weekend_days: None,
            updated_at: now,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    pub fn base_rate(mut self, base_rate: Decimal) -> Self {
        self.base_rate = Some(base_rate);
        self
    }

    pub fn strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn status(mut self, status: RatePlanStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn rate_bounds(mut self, minimum: Option<Decimal>, maximum: Option<Decimal>) -> Self {
        self.minimum_rate = Some(minimum);
        self.maximum_rate = Some(maximum);
        self
    }

    pub fn weekend_pricing(mut self, enabled: bool, multiplier: Option<Decimal>) -> Self {
        self.weekend_pricing_enabled = Some(enabled);
        self.weekend_multiplier = Some(multiplier);
        self
    }

    pub fn weekend_days(mut self, days: Vec<Weekday>) -> Self {
        self.weekend_days = Some(days);
        self
    }
}

/// Query definition used to list rate plans for a property.
#[derive(Debug, Clone)]
pub struct RatePlanListQuery {
    /// Owning property identifier.
    pub property_id: i32,
    /// Optional status filter.
    pub status: Option<RatePlanStatus>,
    /// Optional case-insensitive substring search on name or description.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl RatePlanListQuery {
    /// Construct a query that targets all plans belonging to `property_id`.
    pub fn new(property_id: i32) -> Self {
        Self {
            property_id,
            status: None,
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: RatePlanStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter the results by a search term applied to name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
