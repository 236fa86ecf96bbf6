use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::automation::AutomationSettings;
use crate::domain::pricing_rule::{PricingRule, RuleType};
use crate::domain::rate_modifier::ModifierKind;
use crate::domain::rate_plan::RatePlan;

/// Name recorded when the weekend multiplier fires.
pub const WEEKEND_RULE_NAME: &str = "weekend";

/// Minor-unit precision of the currencies in scope.
const RATE_SCALE: u32 = 2;

/// Contextual facts the caller supplies for one evaluated night.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    /// Current occupancy of the property, 0-100.
    pub occupancy_percent: Decimal,
    /// Days between booking time and the evaluated night.
    pub advance_days: i64,
    /// Requested stay length in nights.
    pub stay_length_nights: i32,
}

/// Result of evaluating one plan for one night.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Final nightly rate after rules, clamps and rounding.
    pub final_rate: Decimal,
    /// Names of the rules that fired, in application order.
    pub applied_rules: Vec<String>,
}

/// Round a rate to minor-unit precision, half-up.
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the final nightly rate for `plan` on `date`.
///
/// Total: absence of matching rules yields the base rate, and malformed
/// rule conditions are treated as never matching rather than as errors, so
/// calendar rendering can never fail on one bad rule.
pub fn evaluate(
    plan: &RatePlan,
    automation: Option<&AutomationSettings>,
    date: NaiveDate,
    context: &EvaluationContext,
) -> Evaluation {
    let base = plan.base_rate;
    let mut rate = base;
    let mut applied = Vec::new();

    if plan.weekend_pricing_enabled && plan.is_weekend(date) {
        if let Some(multiplier) = plan.weekend_multiplier {
            rate *= multiplier;
            applied.push(WEEKEND_RULE_NAME.to_string());
        }
    }

    let mut matching: Vec<&PricingRule> = plan
        .rules
        .iter()
        .filter(|rule| rule.enabled && rule_matches(rule, date, context))
        .collect();
    // Stable sort: declaration order breaks priority ties.
    matching.sort_by(|a, b| b.priority.cmp(&a.priority));

    for rule in matching {
        for modifier in &rule.modifiers {
            match modifier.kind {
                ModifierKind::Percentage => {
                    let basis = if modifier.apply_to_base_rate { base } else { rate };
                    rate += basis * modifier.value / Decimal::ONE_HUNDRED;
                }
                ModifierKind::Fixed => rate += modifier.value,
            }
        }
        applied.push(rule.name.clone());
    }

    if let Some(settings) = automation {
        if settings.enabled {
            if let Some(limit) = settings.max_adjustment_percent {
                let max_delta = (base * limit / Decimal::ONE_HUNDRED).abs();
                rate = rate.clamp(base - max_delta, base + max_delta);
            }
        }
    }

    // Floor/ceiling are absolute, so they come after the automation clamp.
    if let Some(minimum) = plan.minimum_rate {
        if rate < minimum {
            rate = minimum;
        }
    }
    if let Some(maximum) = plan.maximum_rate {
        if rate > maximum {
            rate = maximum;
        }
    }

    Evaluation {
        final_rate: round_rate(rate),
        applied_rules: applied,
    }
}

/// Whether a rule's condition holds for the date/context.
///
/// Conditions with none of their type's fields set never match. Condition
/// fields outside the declared type are ignored.
fn rule_matches(rule: &PricingRule, date: NaiveDate, context: &EvaluationContext) -> bool {
    let condition = &rule.condition;

    match rule.rule_type {
        RuleType::DateRange => {
            if condition.start_date.is_none() && condition.end_date.is_none() {
                return false;
            }
            condition.start_date.map_or(true, |start| date >= start)
                && condition.end_date.map_or(true, |end| date <= end)
        }
        RuleType::DayOfWeek => condition.weekdays.contains(&date.weekday()),
        RuleType::OccupancyLevel => {
            if condition.min_occupancy.is_none() && condition.max_occupancy.is_none() {
                return false;
            }
            condition
                .min_occupancy
                .map_or(true, |min| context.occupancy_percent >= Decimal::from(min))
                && condition
                    .max_occupancy
                    .map_or(true, |max| context.occupancy_percent <= Decimal::from(max))
        }
        RuleType::AdvanceBooking => {
            if condition.min_advance_days.is_none() && condition.max_advance_days.is_none() {
                return false;
            }
            condition
                .min_advance_days
                .map_or(true, |min| context.advance_days >= i64::from(min))
                && condition
                    .max_advance_days
                    .map_or(true, |max| context.advance_days <= i64::from(max))
        }
        RuleType::MinimumStay => condition
            .stay_length_nights
            .map_or(false, |nights| context.stay_length_nights >= nights),
        RuleType::MaximumStay => condition
            .stay_length_nights
            .map_or(false, |nights| context.stay_length_nights <= nights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use rust_decimal_macros::dec;

    use crate::domain::automation::AutomationSettings;
    use crate::domain::pricing_rule::RuleCondition;
    use crate::domain::rate_modifier::RateModifier;
    use crate::domain::rate_plan::{PricingStrategy, RatePlanStatus};

    fn plan(base_rate: Decimal) -> RatePlan {
        let now = chrono::Local::now().naive_utc();
        RatePlan {
            id: 1,
            property_id: 1,
            name: "Standard".to_string(),
            description: None,
            base_rate,
            currency: "USD".to_string(),
            strategy: PricingStrategy::Fixed,
            status: RatePlanStatus::Active,
            minimum_rate: None,
            maximum_rate: None,
            weekend_pricing_enabled: false,
            weekend_multiplier: None,
            weekend_days: vec![Weekday::Fri, Weekday::Sat],
            rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn rule(
        id: i32,
        name: &str,
        rule_type: RuleType,
        condition: RuleCondition,
        priority: i32,
        position: i32,
    ) -> PricingRule {
        let now = chrono::Local::now().naive_utc();
        PricingRule {
            id,
            rate_plan_id: 1,
            name: name.to_string(),
            rule_type,
            condition,
            enabled: true,
            priority,
            position,
            modifiers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn modifier(kind: ModifierKind, value: Decimal, apply_to_base_rate: bool) -> RateModifier {
        let now = chrono::Local::now().naive_utc();
        RateModifier {
            id: 0,
            rule_id: 0,
            kind,
            value,
            apply_to_base_rate,
            description: None,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn context() -> EvaluationContext {
        EvaluationContext {
            occupancy_percent: dec!(50),
            advance_days: 30,
            stay_length_nights: 1,
        }
    }

    fn date_range_condition(start: &str, end: &str) -> RuleCondition {
        RuleCondition {
            start_date: Some(start.parse().expect("start date")),
            end_date: Some(end.parse().expect("end date")),
            ..RuleCondition::default()
        }
    }

    fn automation(enabled: bool, limit: Option<Decimal>) -> AutomationSettings {
        let now = chrono::Local::now().naive_utc();
        AutomationSettings {
            id: 1,
            rate_plan_id: 1,
            enabled,
            max_adjustment_percent: limit,
            occupancy_steps: Vec::new(),
            min_demand_multiplier: None,
            max_demand_multiplier: None,
            last_minute_days: None,
            last_minute_discount_percent: None,
            early_bird_days: None,
            early_bird_discount_percent: None,
            created_at: now,
            updated_at: now,
        }
    }

    // 2026-07-15 is a Wednesday, 2026-07-18 a Saturday.
    const WEDNESDAY: &str = "2026-07-15";
    const SATURDAY: &str = "2026-07-18";

    #[test]
    fn no_rules_yields_base_rate() {
        let plan = plan(dec!(100));

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.00));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn summer_peak_percentage_on_running_total() {
        let mut plan = plan(dec!(100));
        let mut peak = rule(
            1,
            "summer-peak",
            RuleType::DateRange,
            date_range_condition("2026-06-01", "2026-08-31"),
            5,
            0,
        );
        peak.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(35), false));
        plan.rules.push(peak);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(135.00));
        assert_eq!(result.applied_rules, vec!["summer-peak".to_string()]);
    }

    #[test]
    fn weekend_multiplier_fires_on_saturday() {
        let mut plan = plan(dec!(100));
        plan.weekend_pricing_enabled = true;
        plan.weekend_multiplier = Some(dec!(1.2));

        let result = evaluate(&plan, None, SATURDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(120.00));
        assert_eq!(result.applied_rules, vec![WEEKEND_RULE_NAME.to_string()]);
    }

    #[test]
    fn weekend_multiplier_skips_midweek() {
        let mut plan = plan(dec!(100));
        plan.weekend_pricing_enabled = true;
        plan.weekend_multiplier = Some(dec!(1.2));

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.00));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn weekend_pricing_without_multiplier_is_inert() {
        let mut plan = plan(dec!(100));
        plan.weekend_pricing_enabled = true;

        let result = evaluate(&plan, None, SATURDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.00));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn maximum_rate_clamps_fixed_surcharge() {
        let mut plan = plan(dec!(200));
        plan.maximum_rate = Some(dec!(180));
        let mut surcharge = rule(
            1,
            "event-surcharge",
            RuleType::DateRange,
            date_range_condition("2026-07-01", "2026-07-31"),
            5,
            0,
        );
        surcharge
            .modifiers
            .push(modifier(ModifierKind::Fixed, dec!(50), false));
        plan.rules.push(surcharge);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(180.00));
        assert_eq!(result.applied_rules, vec!["event-surcharge".to_string()]);
    }

    #[test]
    fn minimum_rate_clamps_discounts() {
        let mut plan = plan(dec!(100));
        plan.minimum_rate = Some(dec!(80));
        let mut discount = rule(
            1,
            "deep-discount",
            RuleType::DateRange,
            date_range_condition("2026-07-01", "2026-07-31"),
            5,
            0,
        );
        discount
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(-40), false));
        plan.rules.push(discount);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(80.00));
    }

    #[test]
    fn disabled_rules_never_fire() {
        let mut plan = plan(dec!(100));
        let mut peak = rule(
            1,
            "summer-peak",
            RuleType::DateRange,
            date_range_condition("2026-06-01", "2026-08-31"),
            5,
            0,
        );
        peak.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(35), false));
        peak.enabled = false;
        plan.rules.push(peak);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.00));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn higher_priority_applies_first() {
        // A fixed surcharge and a percentage-on-running-total modifier give
        // different results depending on which fires first.
        let mut plan = plan(dec!(100));

        let mut low = rule(
            1,
            "low",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            3,
            0,
        );
        low.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(10), false));

        let mut high = rule(
            2,
            "high",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            8,
            1,
        );
        high.modifiers
            .push(modifier(ModifierKind::Fixed, dec!(20), false));

        plan.rules.push(low);
        plan.rules.push(high);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        // high first: 100 + 20 = 120, then +10% of running = 132.
        // low first would be: 110 + 20 = 130.
        assert_eq!(result.final_rate, dec!(132.00));
        assert_eq!(
            result.applied_rules,
            vec!["high".to_string(), "low".to_string()]
        );
    }

    #[test]
    fn equal_priority_keeps_declaration_order() {
        let mut plan = plan(dec!(100));
        for (id, name) in [(1, "first"), (2, "second"), (3, "third")] {
            let mut r = rule(
                id,
                name,
                RuleType::DateRange,
                date_range_condition("2026-01-01", "2026-12-31"),
                5,
                id - 1,
            );
            r.modifiers
                .push(modifier(ModifierKind::Fixed, dec!(1), false));
            plan.rules.push(r);
        }

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(
            result.applied_rules,
            vec!["first".to_string(), "second".to_string(), "third".to_string()]
        );
        assert_eq!(result.final_rate, dec!(103.00));
    }

    #[test]
    fn rule_name_recorded_once_per_rule_not_per_modifier() {
        let mut plan = plan(dec!(100));
        let mut combo = rule(
            1,
            "combo",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        combo
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(10), true));
        combo
            .modifiers
            .push(modifier(ModifierKind::Fixed, dec!(5), false));
        plan.rules.push(combo);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.applied_rules, vec!["combo".to_string()]);
        assert_eq!(result.final_rate, dec!(115.00));
    }

    #[test]
    fn percentage_on_base_ignores_running_total() {
        let mut plan = plan(dec!(100));
        plan.weekend_pricing_enabled = true;
        plan.weekend_multiplier = Some(dec!(1.5));
        let mut bump = rule(
            1,
            "bump",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        bump.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(10), true));
        plan.rules.push(bump);

        // Saturday: 100 * 1.5 = 150, then + 10% of the *base* = 160.
        let result = evaluate(&plan, None, SATURDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(160.00));
        assert_eq!(
            result.applied_rules,
            vec![WEEKEND_RULE_NAME.to_string(), "bump".to_string()]
        );
    }

    #[test]
    fn occupancy_band_matches_inclusive_bounds() {
        let mut plan = plan(dec!(100));
        let mut busy = rule(
            1,
            "busy",
            RuleType::OccupancyLevel,
            RuleCondition {
                min_occupancy: Some(50),
                max_occupancy: Some(90),
                ..RuleCondition::default()
            },
            5,
            0,
        );
        busy.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(20), false));
        plan.rules.push(busy);

        let mut ctx = context();
        ctx.occupancy_percent = dec!(50);
        let at_lower = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(at_lower.final_rate, dec!(120.00));

        ctx.occupancy_percent = dec!(49.9);
        let below = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(below.final_rate, dec!(100.00));

        ctx.occupancy_percent = dec!(90.1);
        let above = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(above.final_rate, dec!(100.00));
    }

    #[test]
    fn advance_booking_band_matches() {
        let mut plan = plan(dec!(100));
        let mut early_bird = rule(
            1,
            "early-bird",
            RuleType::AdvanceBooking,
            RuleCondition {
                min_advance_days: Some(60),
                max_advance_days: None,
                ..RuleCondition::default()
            },
            5,
            0,
        );
        early_bird
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(-15), false));
        plan.rules.push(early_bird);

        let mut ctx = context();
        ctx.advance_days = 90;
        let matched = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(matched.final_rate, dec!(85.00));

        ctx.advance_days = 10;
        let missed = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(missed.final_rate, dec!(100.00));
    }

    #[test]
    fn stay_length_thresholds() {
        let mut plan = plan(dec!(100));
        let mut long_stay = rule(
            1,
            "long-stay",
            RuleType::MinimumStay,
            RuleCondition {
                stay_length_nights: Some(7),
                ..RuleCondition::default()
            },
            5,
            0,
        );
        long_stay
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(-10), false));
        plan.rules.push(long_stay);

        let mut ctx = context();
        ctx.stay_length_nights = 7;
        let matched = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(matched.final_rate, dec!(90.00));

        ctx.stay_length_nights = 3;
        let missed = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);
        assert_eq!(missed.final_rate, dec!(100.00));
    }

    #[test]
    fn day_of_week_rule_matches_weekday_set() {
        let mut plan = plan(dec!(100));
        let mut midweek = rule(
            1,
            "midweek",
            RuleType::DayOfWeek,
            RuleCondition {
                weekdays: vec![Weekday::Tue, Weekday::Wed],
                ..RuleCondition::default()
            },
            5,
            0,
        );
        midweek
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(-5), false));
        plan.rules.push(midweek);

        let matched = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());
        assert_eq!(matched.final_rate, dec!(95.00));

        let missed = evaluate(&plan, None, SATURDAY.parse().unwrap(), &context());
        assert_eq!(missed.final_rate, dec!(100.00));
    }

    #[test]
    fn malformed_conditions_never_match() {
        let mut plan = plan(dec!(100));
        for (id, rule_type) in [
            (1, RuleType::DateRange),
            (2, RuleType::DayOfWeek),
            (3, RuleType::OccupancyLevel),
            (4, RuleType::AdvanceBooking),
            (5, RuleType::MinimumStay),
            (6, RuleType::MaximumStay),
        ] {
            let mut broken = rule(
                id,
                "broken",
                rule_type,
                RuleCondition::default(),
                5,
                id - 1,
            );
            broken
                .modifiers
                .push(modifier(ModifierKind::Fixed, dec!(999), false));
            plan.rules.push(broken);
        }

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.00));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn open_ended_date_range_still_matches() {
        let mut plan = plan(dec!(100));
        let mut from_june = rule(
            1,
            "from-june",
            RuleType::DateRange,
            RuleCondition {
                start_date: Some("2026-06-01".parse().unwrap()),
                ..RuleCondition::default()
            },
            5,
            0,
        );
        from_june
            .modifiers
            .push(modifier(ModifierKind::Fixed, dec!(10), false));
        plan.rules.push(from_june);

        let inside = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());
        assert_eq!(inside.final_rate, dec!(110.00));

        let before: NaiveDate = "2026-05-01".parse().unwrap();
        let outside = evaluate(&plan, None, before, &context());
        assert_eq!(outside.final_rate, dec!(100.00));
    }

    #[test]
    fn automation_clamp_limits_daily_delta_both_ways() {
        let mut plan = plan(dec!(100));
        let mut spike = rule(
            1,
            "spike",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        spike
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(50), false));
        plan.rules.push(spike);

        let settings = automation(true, Some(dec!(10)));
        let capped = evaluate(
            &plan,
            Some(&settings),
            WEDNESDAY.parse().unwrap(),
            &context(),
        );
        assert_eq!(capped.final_rate, dec!(110.00));
        // The rule still fired even though its effect was capped.
        assert_eq!(capped.applied_rules, vec!["spike".to_string()]);

        plan.rules[0].modifiers[0].value = dec!(-50);
        let floored = evaluate(
            &plan,
            Some(&settings),
            WEDNESDAY.parse().unwrap(),
            &context(),
        );
        assert_eq!(floored.final_rate, dec!(90.00));
    }

    #[test]
    fn automation_clamp_ignored_when_disabled() {
        let mut plan = plan(dec!(100));
        let mut spike = rule(
            1,
            "spike",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        spike
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(50), false));
        plan.rules.push(spike);

        let settings = automation(false, Some(dec!(10)));
        let result = evaluate(
            &plan,
            Some(&settings),
            WEDNESDAY.parse().unwrap(),
            &context(),
        );

        assert_eq!(result.final_rate, dec!(150.00));
    }

    #[test]
    fn floor_and_ceiling_are_absolute_over_the_automation_band() {
        // Ceiling sits below what the automation band would allow; the
        // ceiling must win because floor/ceiling clamping is applied last.
        let mut plan = plan(dec!(100));
        plan.maximum_rate = Some(dec!(104));
        let mut spike = rule(
            1,
            "spike",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        spike
            .modifiers
            .push(modifier(ModifierKind::Percentage, dec!(50), false));
        plan.rules.push(spike);

        let settings = automation(true, Some(dec!(10)));
        let result = evaluate(
            &plan,
            Some(&settings),
            WEDNESDAY.parse().unwrap(),
            &context(),
        );

        assert_eq!(result.final_rate, dec!(104.00));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut plan = plan(dec!(123.45));
        plan.weekend_pricing_enabled = true;
        plan.weekend_multiplier = Some(dec!(1.15));
        let mut peak = rule(
            1,
            "peak",
            RuleType::DateRange,
            date_range_condition("2026-07-01", "2026-07-31"),
            7,
            0,
        );
        peak.modifiers
            .push(modifier(ModifierKind::Percentage, dec!(12.5), true));
        plan.rules.push(peak);

        let date: NaiveDate = SATURDAY.parse().unwrap();
        let first = evaluate(&plan, None, date, &context());
        let second = evaluate(&plan, None, date, &context());

        assert_eq!(first, second);
    }

    #[test]
    fn rounds_half_up_to_two_decimals() {
        let mut plan = plan(dec!(100));
        let mut sliver = rule(
            1,
            "sliver",
            RuleType::DateRange,
            date_range_condition("2026-01-01", "2026-12-31"),
            5,
            0,
        );
        sliver
            .modifiers
            .push(modifier(ModifierKind::Fixed, dec!(0.005), false));
        plan.rules.push(sliver);

        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &context());

        assert_eq!(result.final_rate, dec!(100.01));
    }

    #[test]
    fn condition_fields_outside_declared_type_are_ignored() {
        let mut plan = plan(dec!(100));
        // A date-range rule that also carries an occupancy band; the band
        // must not be consulted.
        let mut mixed = rule(
            1,
            "mixed",
            RuleType::DateRange,
            RuleCondition {
                start_date: Some("2026-07-01".parse().unwrap()),
                end_date: Some("2026-07-31".parse().unwrap()),
                min_occupancy: Some(99),
                ..RuleCondition::default()
            },
            5,
            0,
        );
        mixed
            .modifiers
            .push(modifier(ModifierKind::Fixed, dec!(25), false));
        plan.rules.push(mixed);

        let mut ctx = context();
        ctx.occupancy_percent = dec!(10);
        let result = evaluate(&plan, None, WEDNESDAY.parse().unwrap(), &ctx);

        assert_eq!(result.final_rate, dec!(125.00));
        assert_eq!(result.applied_rules, vec!["mixed".to_string()]);
    }
}
