use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::pricing_rule::{
    NewPricingRule, PRIORITY_MAX, PRIORITY_MIN, RuleCondition, RuleType, UpdatePricingRule,
};
use crate::domain::rate_modifier::{ModifierKind, NewRateModifier};
use crate::forms::{parse_decimal, sanitize_inline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a rule name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;
const PRIORITY_MIN_VALIDATOR: i32 = PRIORITY_MIN;
const PRIORITY_MAX_VALIDATOR: i32 = PRIORITY_MAX;

/// Result type returned by the pricing rule form helpers.
pub type PricingRuleFormResult<T> = Result<T, PricingRuleFormError>;

/// Errors that can occur while processing pricing rule forms.
#[derive(Debug, Error)]
pub enum PricingRuleFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("rule name cannot be empty")]
    EmptyName,
    /// The provided rule type is not one of the known types.
    #[error("unknown rule type `{value}`")]
    InvalidRuleType { value: String },
    /// The condition lacks the fields its rule type needs.
    #[error("rule type `{rule_type}` needs its condition fields filled in")]
    MissingCondition { rule_type: &'static str },
    /// A date range where the start comes after the end.
    #[error("start date must not be after end date")]
    DateRangeOutOfOrder,
    /// An occupancy bound outside 0-100, or min above max.
    #[error("occupancy bounds must be between 0 and 100, minimum first")]
    InvalidOccupancyBounds,
    /// A negative advance-booking bound, or min above max.
    #[error("advance-booking bounds must be non-negative, minimum first")]
    InvalidAdvanceBounds,
    /// A stay-length threshold below one night.
    #[error("stay length must be at least one night")]
    InvalidStayLength,
    /// A weekday value could not be parsed.
    #[error("`{value}` is not a valid weekday")]
    InvalidWeekday { value: String },
    /// The provided modifier kind is not one of the known kinds.
    #[error("unknown modifier kind `{value}`")]
    InvalidModifierKind { value: String },
    /// A numeric field could not be parsed.
    #[error("`{value}` is not a valid amount")]
    InvalidNumber { value: String },
}

/// Form payload emitted when submitting the "Add rule" form.
///
/// Parsed with `serde_html_form` so the weekday multi-select arrives as a
/// repeated field.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPricingRuleForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// One of the known rule types.
    pub rule_type: String,
    /// Priority 1-10, higher evaluated first.
    #[validate(range(min = PRIORITY_MIN_VALIDATOR, max = PRIORITY_MAX_VALIDATOR))]
    pub priority: i32,
    /// Whether the rule starts enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Inclusive start of a date-range window.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of a date-range window.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Weekday set for day-of-week rules.
    #[serde(default)]
    pub weekdays: Vec<String>,
    /// Lower occupancy bound in whole percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_occupancy: Option<i32>,
    /// Upper occupancy bound in whole percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_occupancy: Option<i32>,
    /// Lower advance-booking bound in days.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_advance_days: Option<i32>,
    /// Upper advance-booking bound in days.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_advance_days: Option<i32>,
    /// Stay-length threshold in nights.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub stay_length_nights: Option<i32>,
    /// Kind of the rule's first modifier.
    pub modifier_kind: String,
    /// Signed value of the first modifier.
    pub modifier_value: String,
    /// Whether a percentage modifier uses the base rate as its basis.
    #[serde(default)]
    pub modifier_apply_to_base_rate: bool,
    /// Optional description of the first modifier.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub modifier_description: Option<String>,
}

impl AddPricingRuleForm {
    /// Validates and sanitizes the payload into a domain `NewPricingRule`
    /// carrying its first modifier.
    pub fn into_new_pricing_rule(self, rate_plan_id: i32) -> PricingRuleFormResult<NewPricingRule> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(PricingRuleFormError::EmptyName);
        }

        let rule_type = parse_rule_type(&self.rule_type)?;
        let condition = build_condition(
            rule_type,
            self.start_date,
            self.end_date,
            &self.weekdays,
            self.min_occupancy,
            self.max_occupancy,
            self.min_advance_days,
            self.max_advance_days,
            self.stay_length_nights,
        )?;

        let modifier = parse_modifier(
            &self.modifier_kind,
            &self.modifier_value,
            self.modifier_apply_to_base_rate,
            self.modifier_description.as_deref(),
        )?;

        let mut new_rule =
            NewPricingRule::new(rate_plan_id, name, rule_type, condition, self.priority)
                .with_modifier(modifier);
        if !self.enabled {
            new_rule = new_rule.disabled();
        }

        Ok(new_rule)
    }
}

/// Form payload emitted when submitting the "Edit rule" form.
#[derive(Debug, Deserialize, Validate)]
pub struct EditPricingRuleForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// One of the known rule types.
    pub rule_type: String,
    /// Priority 1-10, higher evaluated first.
    #[validate(range(min = PRIORITY_MIN_VALIDATOR, max = PRIORITY_MAX_VALIDATOR))]
    pub priority: i32,
    /// Whether the rule is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Inclusive start of a date-range window.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of a date-range window.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Weekday set for day-of-week rules.
    #[serde(default)]
    pub weekdays: Vec<String>,
    /// Lower occupancy bound in whole percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_occupancy: Option<i32>,
    /// Upper occupancy bound in whole percent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_occupancy: Option<i32>,
    /// Lower advance-booking bound in days.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_advance_days: Option<i32>,
    /// Upper advance-booking bound in days.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_advance_days: Option<i32>,
    /// Stay-length threshold in nights.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub stay_length_nights: Option<i32>,
}

impl EditPricingRuleForm {
    /// Validates and sanitizes the payload into a domain `UpdatePricingRule`.
    pub fn into_update_pricing_rule(self) -> PricingRuleFormResult<UpdatePricingRule> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(PricingRuleFormError::EmptyName);
        }

        let rule_type = parse_rule_type(&self.rule_type)?;
        let condition = build_condition(
            rule_type,
            self.start_date,
            self.end_date,
            &self.weekdays,
            self.min_occupancy,
            self.max_occupancy,
            self.min_advance_days,
            self.max_advance_days,
            self.stay_length_nights,
        )?;

        Ok(UpdatePricingRule::new()
            .name(name)
            .rule_type(rule_type)
            .condition(condition)
            .enabled(self.enabled)
            .priority(self.priority))
    }
}

/// Form payload for the enable/disable action on a rule.
#[derive(Debug, Deserialize)]
pub struct ToggleRuleForm {
    /// Desired enabled state.
    pub enabled: bool,
}

/// Form payload emitted when appending a modifier to a rule.
#[derive(Debug, Deserialize)]
pub struct AddModifierForm {
    /// Percentage or fixed.
    pub kind: String,
    /// Signed value of the modifier.
    pub value: String,
    /// Whether a percentage modifier uses the base rate as its basis.
    #[serde(default)]
    pub apply_to_base_rate: bool,
    /// Optional description shown in the editor.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
}

impl AddModifierForm {
    /// Validates and sanitizes the payload into a domain `NewRateModifier`.
    pub fn into_new_rate_modifier(self) -> PricingRuleFormResult<NewRateModifier> {
        parse_modifier(
            &self.kind,
            &self.value,
            self.apply_to_base_rate,
            self.description.as_deref(),
        )
    }
}

fn parse_rule_type(value: &str) -> PricingRuleFormResult<RuleType> {
    RuleType::parse(value.trim()).ok_or_else(|| PricingRuleFormError::InvalidRuleType {
        value: value.to_string(),
    })
}

/// Cross-checks the condition fields the declared type relies on; fields
/// outside the declared type are carried along untouched.
#[allow(clippy::too_many_arguments)]
fn build_condition(
    rule_type: RuleType,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    weekdays: &[String],
    min_occupancy: Option<i32>,
    max_occupancy: Option<i32>,
    min_advance_days: Option<i32>,
    max_advance_days: Option<i32>,
    stay_length_nights: Option<i32>,
) -> PricingRuleFormResult<RuleCondition> {
    let mut parsed_days = Vec::with_capacity(weekdays.len());
    for day in weekdays {
        let weekday =
            day.trim()
                .parse::<Weekday>()
                .map_err(|_| PricingRuleFormError::InvalidWeekday {
                    value: day.to_string(),
                })?;
        if !parsed_days.contains(&weekday) {
            parsed_days.push(weekday);
        }
    }

    match rule_type {
        RuleType::DateRange => {
            if start_date.is_none() && end_date.is_none() {
                return Err(PricingRuleFormError::MissingCondition {
                    rule_type: rule_type.as_str(),
                });
            }
            if let (Some(start), Some(end)) = (start_date, end_date) {
                if start > end {
                    return Err(PricingRuleFormError::DateRangeOutOfOrder);
                }
            }
        }
        RuleType::DayOfWeek => {
            if parsed_days.is_empty() {
                return Err(PricingRuleFormError::MissingCondition {
                    rule_type: rule_type.as_str(),
                });
            }
        }
        RuleType::OccupancyLevel => {
            if min_occupancy.is_none() && max_occupancy.is_none() {
                return Err(PricingRuleFormError::MissingCondition {
                    rule_type: rule_type.as_str(),
                });
            }
            let in_range = |bound: Option<i32>| bound.map_or(true, |value| (0..=100).contains(&value));
            if !in_range(min_occupancy) || !in_range(max_occupancy) {
                return Err(PricingRuleFormError::InvalidOccupancyBounds);
            }
            if let (Some(min), Some(max)) = (min_occupancy, max_occupancy) {
                if min > max {
                    return Err(PricingRuleFormError::InvalidOccupancyBounds);
                }
            }
        }
        RuleType::AdvanceBooking => {
            if min_advance_days.is_none() && max_advance_days.is_none() {
                return Err(PricingRuleFormError::MissingCondition {
                    rule_type: rule_type.as_str(),
                });
            }
            let non_negative = |bound: Option<i32>| bound.map_or(true, |value| value >= 0);
            if !non_negative(min_advance_days) || !non_negative(max_advance_days) {
                return Err(PricingRuleFormError::InvalidAdvanceBounds);
            }
            if let (Some(min), Some(max)) = (min_advance_days, max_advance_days) {
                if min > max {
                    return Err(PricingRuleFormError::InvalidAdvanceBounds);
                }
            }
        }
        RuleType::MinimumStay | RuleType::MaximumStay => match stay_length_nights {
            None => {
                return Err(PricingRuleFormError::MissingCondition {
                    rule_type: rule_type.as_str(),
                });
            }
            Some(nights) if nights < 1 => {
                return Err(PricingRuleFormError::InvalidStayLength);
            }
            Some(_) => {}
        },
    }

    Ok(RuleCondition {
        start_date,
        end_date,
        weekdays: parsed_days,
        min_occupancy,
        max_occupancy,
        min_advance_days,
        max_advance_days,
        stay_length_nights,
    })
}

fn parse_modifier(
    kind: &str,
    value: &str,
    apply_to_base_rate: bool,
    description: Option<&str>,
) -> PricingRuleFormResult<NewRateModifier> {
    let kind = ModifierKind::parse(kind.trim()).ok_or_else(|| {
        PricingRuleFormError::InvalidModifierKind {
            value: kind.to_string(),
        }
    })?;

    let value = parse_decimal(value).ok_or_else(|| PricingRuleFormError::InvalidNumber {
        value: value.to_string(),
    })?;

    let description = description
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty());

    // The basis flag only means something for percentages.
    let apply_to_base_rate = apply_to_base_rate && kind == ModifierKind::Percentage;

    let mut modifier = NewRateModifier {
        kind,
        value,
        apply_to_base_rate,
        description: None,
    };
    if let Some(description) = description {
        modifier = modifier.with_description(description);
    }

    Ok(modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form() -> AddPricingRuleForm {
        AddPricingRuleForm {
            name: "summer-peak".to_string(),
            rule_type: "date-range".to_string(),
            priority: 5,
            enabled: true,
            start_date: Some("2026-06-01".parse().unwrap()),
            end_date: Some("2026-08-31".parse().unwrap()),
            weekdays: Vec::new(),
            min_occupancy: None,
            max_occupancy: None,
            min_advance_days: None,
            max_advance_days: None,
            stay_length_nights: None,
            modifier_kind: "percentage".to_string(),
            modifier_value: "35".to_string(),
            modifier_apply_to_base_rate: false,
            modifier_description: None,
        }
    }

    #[test]
    fn add_form_converts_with_first_modifier() {
        let new_rule = form().into_new_pricing_rule(9).expect("expected success");

        assert_eq!(new_rule.rate_plan_id, 9);
        assert_eq!(new_rule.rule_type, RuleType::DateRange);
        assert!(new_rule.enabled);
        assert_eq!(new_rule.modifiers.len(), 1);
        assert_eq!(new_rule.modifiers[0].kind, ModifierKind::Percentage);
        assert_eq!(new_rule.modifiers[0].value, dec!(35));
    }

    #[test]
    fn date_range_needs_at_least_one_bound() {
        let mut bad = form();
        bad.start_date = None;
        bad.end_date = None;

        let result = bad.into_new_pricing_rule(1);

        assert!(matches!(
            result,
            Err(PricingRuleFormError::MissingCondition { .. })
        ));
    }

    #[test]
    fn date_range_must_be_ordered() {
        let mut bad = form();
        bad.start_date = Some("2026-09-01".parse().unwrap());
        bad.end_date = Some("2026-06-01".parse().unwrap());

        let result = bad.into_new_pricing_rule(1);

        assert!(matches!(result, Err(PricingRuleFormError::DateRangeOutOfOrder)));
    }

    #[test]
    fn occupancy_bounds_are_checked() {
        let mut bad = form();
        bad.rule_type = "occupancy-level".to_string();
        bad.min_occupancy = Some(110);

        let result = bad.into_new_pricing_rule(1);

        assert!(matches!(
            result,
            Err(PricingRuleFormError::InvalidOccupancyBounds)
        ));
    }

    #[test]
    fn day_of_week_needs_days() {
        let mut bad = form();
        bad.rule_type = "day-of-week".to_string();

        let result = bad.into_new_pricing_rule(1);

        assert!(matches!(
            result,
            Err(PricingRuleFormError::MissingCondition { .. })
        ));
    }

    #[test]
    fn priority_outside_range_fails_validation() {
        let mut bad = form();
        bad.priority = 11;

        let result = bad.into_new_pricing_rule(1);

        assert!(matches!(result, Err(PricingRuleFormError::Validation(_))));
    }

    #[test]
    fn base_rate_flag_is_dropped_for_fixed_modifiers() {
        let modifier = AddModifierForm {
            kind: "fixed".to_string(),
            value: "-10".to_string(),
            apply_to_base_rate: true,
            description: Some("winter cut".to_string()),
        }
        .into_new_rate_modifier()
        .expect("expected success");

        assert_eq!(modifier.kind, ModifierKind::Fixed);
        assert_eq!(modifier.value, dec!(-10));
        assert!(!modifier.apply_to_base_rate);
        assert_eq!(modifier.description.as_deref(), Some("winter cut"));
    }
}
