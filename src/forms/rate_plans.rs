use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::rate_plan::{NewRatePlan, PricingStrategy, RatePlanStatus, UpdateRatePlan};
use crate::forms::{parse_decimal, sanitize_currency, sanitize_inline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a rate plan name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the rate plan form helpers.
pub type RatePlanFormResult<T> = Result<T, RatePlanFormError>;

/// Errors that can occur while processing rate plan forms.
#[derive(Debug, Error)]
pub enum RatePlanFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("rate plan name cannot be empty")]
    EmptyName,
    /// The provided currency code is invalid.
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
    /// The provided strategy is not one of the known strategies.
    #[error("unknown pricing strategy `{value}`")]
    InvalidStrategy { value: String },
    /// The provided status is not one of the known statuses.
    #[error("unknown rate plan status `{value}`")]
    InvalidStatus { value: String },
    /// A numeric field could not be parsed.
    #[error("`{value}` is not a valid amount")]
    InvalidNumber { value: String },
    /// The base rate must be positive.
    #[error("base rate must be greater than zero")]
    NonPositiveBaseRate,
    /// Minimum rate must stay below maximum rate.
    #[error("minimum rate must be less than maximum rate")]
    RateBoundsOutOfOrder,
    /// Weekend pricing needs a multiplier.
    #[error("weekend pricing requires a multiplier")]
    MissingWeekendMultiplier,
    /// The weekend multiplier must be positive.
    #[error("weekend multiplier must be greater than zero")]
    NonPositiveWeekendMultiplier,
    /// A weekday value could not be parsed.
    #[error("`{value}` is not a valid weekday")]
    InvalidWeekday { value: String },
}

/// Form payload emitted when submitting the "Add rate plan" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddRatePlanForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Base nightly rate, a decimal string such as `120.00`.
    pub base_rate: String,
    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,
    /// One of the known pricing strategies.
    pub strategy: String,
    /// Optional floor for the final rate.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub minimum_rate: Option<String>,
    /// Optional ceiling for the final rate.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub maximum_rate: Option<String>,
    /// Whether the weekend multiplier participates in evaluation.
    #[serde(default)]
    pub weekend_pricing_enabled: bool,
    /// Weekend multiplier, required when weekend pricing is enabled.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub weekend_multiplier: Option<String>,
    /// Selected weekend days, short names such as `Fri`.
    #[serde(default)]
    pub weekend_days: Vec<String>,
}

impl AddRatePlanForm {
    /// Validates and sanitizes the payload into a domain `NewRatePlan`.
    pub fn into_new_rate_plan(self, property_id: i32) -> RatePlanFormResult<NewRatePlan> {
        self.validate()?;

        let fields = RatePlanFields::parse(
            &self.name,
            self.description.as_deref(),
            &self.base_rate,
            &self.currency,
            &self.strategy,
            self.minimum_rate.as_deref(),
            self.maximum_rate.as_deref(),
            self.weekend_pricing_enabled,
            self.weekend_multiplier.as_deref(),
            &self.weekend_days,
        )?;

        let mut new_rate_plan =
            NewRatePlan::new(property_id, fields.name, fields.base_rate, fields.currency)
                .with_strategy(fields.strategy)
                .with_rate_bounds(fields.minimum_rate, fields.maximum_rate);

        if let Some(description) = fields.description {
            new_rate_plan = new_rate_plan.with_description(description);
        }

        if fields.weekend_pricing_enabled {
            // Presence guaranteed by RatePlanFields::parse.
            if let Some(multiplier) = fields.weekend_multiplier {
                new_rate_plan =
                    new_rate_plan.with_weekend_pricing(multiplier, fields.weekend_days);
            }
        }

        Ok(new_rate_plan)
    }
}

/// Form payload emitted when submitting the "Edit rate plan" form.
#[derive(Debug, Deserialize, Validate)]
pub struct EditRatePlanForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description; an empty value clears it.
    pub description: Option<String>,
    /// Base nightly rate, a decimal string such as `120.00`.
    pub base_rate: String,
    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,
    /// One of the known pricing strategies.
    pub strategy: String,
    /// Optional floor for the final rate; an empty value clears it.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub minimum_rate: Option<String>,
    /// Optional ceiling for the final rate; an empty value clears it.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub maximum_rate: Option<String>,
    /// Whether the weekend multiplier participates in evaluation.
    #[serde(default)]
    pub weekend_pricing_enabled: bool,
    /// Weekend multiplier, required when weekend pricing is enabled.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub weekend_multiplier: Option<String>,
    /// Selected weekend days, short names such as `Fri`.
    #[serde(default)]
    pub weekend_days: Vec<String>,
}

impl EditRatePlanForm {
    /// Validates and sanitizes the payload into a domain `UpdateRatePlan`.
    pub fn into_update_rate_plan(self) -> RatePlanFormResult<UpdateRatePlan> {
        self.validate()?;

        let fields = RatePlanFields::parse(
            &self.name,
            self.description.as_deref(),
            &self.base_rate,
            &self.currency,
            &self.strategy,
            self.minimum_rate.as_deref(),
            self.maximum_rate.as_deref(),
            self.weekend_pricing_enabled,
            self.weekend_multiplier.as_deref(),
            &self.weekend_days,
        )?;

        let mut updates = UpdateRatePlan::new()
            .name(fields.name)
            .description(fields.description)
            .base_rate(fields.base_rate)
            .strategy(fields.strategy)
            .rate_bounds(fields.minimum_rate, fields.maximum_rate)
            .weekend_pricing(fields.weekend_pricing_enabled, fields.weekend_multiplier);

        if !fields.weekend_days.is_empty() {
            updates = updates.weekend_days(fields.weekend_days);
        }

        Ok(updates)
    }
}

/// Form payload for the status action on a plan.
#[derive(Debug, Deserialize)]
pub struct SetRatePlanStatusForm {
    /// One of the known lifecycle statuses.
    pub status: String,
}

impl SetRatePlanStatusForm {
    /// Parses the requested status strictly.
    pub fn into_status(self) -> RatePlanFormResult<RatePlanStatus> {
        RatePlanStatus::parse(self.status.trim()).ok_or(RatePlanFormError::InvalidStatus {
            value: self.status,
        })
    }
}

/// Fields shared by the add and edit forms, parsed and cross-checked once.
struct RatePlanFields {
    name: String,
    description: Option<String>,
    base_rate: Decimal,
    currency: String,
    strategy: PricingStrategy,
    minimum_rate: Option<Decimal>,
    maximum_rate: Option<Decimal>,
    weekend_pricing_enabled: bool,
    weekend_multiplier: Option<Decimal>,
    weekend_days: Vec<Weekday>,
}

impl RatePlanFields {
    #[allow(clippy::too_many_arguments)]
    fn parse(
        name: &str,
        description: Option<&str>,
        base_rate: &str,
        currency: &str,
        strategy: &str,
        minimum_rate: Option<&str>,
        maximum_rate: Option<&str>,
        weekend_pricing_enabled: bool,
        weekend_multiplier: Option<&str>,
        weekend_days: &[String],
    ) -> RatePlanFormResult<Self> {
        let name = sanitize_inline_text(name);
        if name.is_empty() {
            return Err(RatePlanFormError::EmptyName);
        }

        let description = description
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        let currency =
            sanitize_currency(currency).ok_or_else(|| RatePlanFormError::InvalidCurrency {
                value: currency.to_string(),
            })?;

        let strategy = PricingStrategy::parse(strategy.trim()).ok_or_else(|| {
            RatePlanFormError::InvalidStrategy {
                value: strategy.to_string(),
            }
        })?;

        let base_rate = parse_rate(base_rate)?;
        if base_rate <= Decimal::ZERO {
            return Err(RatePlanFormError::NonPositiveBaseRate);
        }

        let minimum_rate = minimum_rate.map(parse_rate).transpose()?;
        let maximum_rate = maximum_rate.map(parse_rate).transpose()?;
        if let (Some(minimum), Some(maximum)) = (minimum_rate, maximum_rate) {
            if minimum >= maximum {
                return Err(RatePlanFormError::RateBoundsOutOfOrder);
            }
        }

        let weekend_multiplier = weekend_multiplier.map(parse_rate).transpose()?;
        if weekend_pricing_enabled {
            match weekend_multiplier {
                None => return Err(RatePlanFormError::MissingWeekendMultiplier),
                Some(multiplier) if multiplier <= Decimal::ZERO => {
                    return Err(RatePlanFormError::NonPositiveWeekendMultiplier);
                }
                Some(_) => {}
            }
        }

        let mut parsed_days = Vec::with_capacity(weekend_days.len());
        for day in weekend_days {
            let weekday =
                day.trim()
                    .parse::<Weekday>()
                    .map_err(|_| RatePlanFormError::InvalidWeekday {
                        value: day.to_string(),
                    })?;
            if !parsed_days.contains(&weekday) {
                parsed_days.push(weekday);
            }
        }

        Ok(Self {
            name,
            description,
            base_rate,
            currency,
            strategy,
            minimum_rate,
            maximum_rate,
            weekend_pricing_enabled,
            weekend_multiplier,
            weekend_days: parsed_days,
        })
    }
}

fn parse_rate(value: &str) -> RatePlanFormResult<Decimal> {
    parse_decimal(value).ok_or_else(|| RatePlanFormError::InvalidNumber {
        value: value.to_string(),
    })
}
