use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::automation::{OccupancyStep, UpdateAutomationSettings};
use crate::forms::parse_decimal;
use crate::routes::empty_string_as_none;

/// Result type returned by the automation form helpers.
pub type AutomationFormResult<T> = Result<T, AutomationFormError>;

/// Errors that can occur while processing the automation settings form.
#[derive(Debug, Error)]
pub enum AutomationFormError {
    /// A numeric field could not be parsed.
    #[error("`{value}` is not a valid amount")]
    InvalidNumber { value: String },
    /// The daily adjustment cap must sit in (0, 100].
    #[error("max daily adjustment must be between 0 and 100 percent")]
    InvalidMaxAdjustment,
    /// The occupancy ladder rows did not line up.
    #[error("each occupancy step needs both a threshold and an adjustment")]
    UnbalancedOccupancySteps,
    /// An occupancy threshold outside 0-100, or thresholds out of order.
    #[error("occupancy steps must use increasing thresholds between 0 and 100")]
    InvalidOccupancySteps,
    /// Demand multiplier bounds must be positive and ordered.
    #[error("demand multiplier bounds must be positive, minimum first")]
    InvalidDemandBounds,
    /// A discount window must be non-negative days.
    #[error("discount windows must be non-negative")]
    InvalidDiscountWindow,
    /// A discount percentage outside 0-100.
    #[error("discounts must be between 0 and 100 percent")]
    InvalidDiscountPercent,
}

/// Form payload emitted when saving the automation settings page.
///
/// Parsed with `serde_html_form`: the occupancy ladder arrives as the
/// repeated fields `step_min_occupancy` / `step_adjustment_percent`.
#[derive(Debug, Deserialize)]
pub struct AutomationSettingsForm {
    /// Master switch for automatic pricing on the plan.
    #[serde(default)]
    pub enabled: bool,
    /// Largest allowed net change from the base rate per day, in percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_adjustment_percent: Option<String>,
    /// Occupancy thresholds of the ladder, row by row.
    #[serde(default)]
    pub step_min_occupancy: Vec<i32>,
    /// Adjustment percentages of the ladder, row by row.
    #[serde(default)]
    pub step_adjustment_percent: Vec<String>,
    /// Lower bound for the demand multiplier.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_demand_multiplier: Option<String>,
    /// Upper bound for the demand multiplier.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_demand_multiplier: Option<String>,
    /// Window, in days before arrival, for the last-minute discount.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_minute_days: Option<i32>,
    /// Last-minute discount in percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_minute_discount_percent: Option<String>,
    /// Lead time, in days before arrival, for the early-bird discount.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub early_bird_days: Option<i32>,
    /// Early-bird discount in percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub early_bird_discount_percent: Option<String>,
}

impl AutomationSettingsForm {
    /// Validates and converts the payload into a domain
    /// `UpdateAutomationSettings`.
    pub fn into_update_automation_settings(
        self,
    ) -> AutomationFormResult<UpdateAutomationSettings> {
        let max_adjustment_percent = self
            .max_adjustment_percent
            .as_deref()
            .map(parse_number)
            .transpose()?;
        if let Some(limit) = max_adjustment_percent {
            if limit <= Decimal::ZERO || limit > Decimal::ONE_HUNDRED {
                return Err(AutomationFormError::InvalidMaxAdjustment);
            }
        }

        if self.step_min_occupancy.len() != self.step_adjustment_percent.len() {
            return Err(AutomationFormError::UnbalancedOccupancySteps);
        }

        let mut occupancy_steps = Vec::with_capacity(self.step_min_occupancy.len());
        let mut previous_threshold: Option<i32> = None;
        for (threshold, adjustment) in self
            .step_min_occupancy
            .iter()
            .zip(self.step_adjustment_percent.iter())
        {
            if !(0..=100).contains(threshold) {
                return Err(AutomationFormError::InvalidOccupancySteps);
            }
            if previous_threshold.is_some_and(|previous| *threshold <= previous) {
                return Err(AutomationFormError::InvalidOccupancySteps);
            }
            previous_threshold = Some(*threshold);

            occupancy_steps.push(OccupancyStep {
                min_occupancy: *threshold,
                adjustment_percent: parse_number(adjustment)?,
            });
        }

        let min_demand_multiplier = self
            .min_demand_multiplier
            .as_deref()
            .map(parse_number)
            .transpose()?;
        let max_demand_multiplier = self
            .max_demand_multiplier
            .as_deref()
            .map(parse_number)
            .transpose()?;
        for bound in [min_demand_multiplier, max_demand_multiplier].into_iter().flatten() {
            if bound <= Decimal::ZERO {
                return Err(AutomationFormError::InvalidDemandBounds);
            }
        }
        if let (Some(minimum), Some(maximum)) = (min_demand_multiplier, max_demand_multiplier) {
            if minimum > maximum {
                return Err(AutomationFormError::InvalidDemandBounds);
            }
        }

        let last_minute_discount_percent = self
            .last_minute_discount_percent
            .as_deref()
            .map(parse_number)
            .transpose()?;
        let early_bird_discount_percent = self
            .early_bird_discount_percent
            .as_deref()
            .map(parse_number)
            .transpose()?;

        for window in [self.last_minute_days, self.early_bird_days].into_iter().flatten() {
            if window < 0 {
                return Err(AutomationFormError::InvalidDiscountWindow);
            }
        }
        for percent in [last_minute_discount_percent, early_bird_discount_percent]
            .into_iter()
            .flatten()
        {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(AutomationFormError::InvalidDiscountPercent);
            }
        }

        Ok(UpdateAutomationSettings::new()
            .enabled(self.enabled)
            .max_adjustment_percent(max_adjustment_percent)
            .occupancy_steps(occupancy_steps)
            .demand_multiplier_bounds(min_demand_multiplier, max_demand_multiplier)
            .last_minute_discount(self.last_minute_days, last_minute_discount_percent)
            .early_bird_discount(self.early_bird_days, early_bird_discount_percent))
    }
}

fn parse_number(value: &str) -> AutomationFormResult<Decimal> {
    parse_decimal(value).ok_or_else(|| AutomationFormError::InvalidNumber {
        value: value.to_string(),
    })
}
