use chrono::Weekday;
use rust_decimal_macros::dec;

use rateboard::domain::booking::{BookingStatus, NewBooking};
use rateboard::domain::pricing_rule::{NewPricingRule, RuleCondition, RuleType, UpdatePricingRule};
use rateboard::domain::property::NewProperty;
use rateboard::domain::rate_modifier::NewRateModifier;
use rateboard::domain::rate_plan::{
    NewRatePlan, PricingStrategy, RatePlanListQuery, RatePlanStatus, UpdateRatePlan,
};
use rateboard::repository::errors::RepositoryError;
use rateboard::repository::{
    AvailabilityReader, BookingWriter, DieselRepository, PricingRuleWriter, PropertyWriter,
    RatePlanReader, RatePlanWriter,
};

mod common;

fn seed_property(repo: &DieselRepository) -> i32 {
    repo.create_property(&NewProperty::new("Sea View Hotel", 10, "USD"))
        .expect("create property")
        .id
}

#[test]
fn rate_plan_round_trips_with_rules_and_modifiers() {
    let test_db = common::TestDb::new("repo_rate_plan_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo);

    let new_plan = NewRatePlan::new(property_id, "Standard Season", dec!(120.50), "USD")
        .with_strategy(PricingStrategy::Dynamic)
        .with_status(RatePlanStatus::Active)
        .with_rate_bounds(Some(dec!(80)), Some(dec!(300)))
        .with_weekend_pricing(dec!(1.2), vec![Weekday::Fri, Weekday::Sat]);

    let plan = repo.create_rate_plan(&new_plan).expect("create rate plan");
    assert_eq!(plan.base_rate, dec!(120.50));
    assert_eq!(plan.weekend_multiplier, Some(dec!(1.2)));
    assert_eq!(plan.weekend_days, vec![Weekday::Fri, Weekday::Sat]);

    let condition = RuleCondition {
        start_date: Some("2026-06-01".parse().unwrap()),
        end_date: Some("2026-08-31".parse().unwrap()),
        ..RuleCondition::default()
    };
    let new_rule = NewPricingRule::new(plan.id, "summer-peak", RuleType::DateRange, condition, 8)
        .with_modifier(NewRateModifier::percentage(dec!(35)))
        .with_modifier(NewRateModifier::fixed(dec!(-5)).with_description("loyalty offset"));

    let rule = repo.create_rule(&new_rule).expect("create rule");
    assert_eq!(rule.position, 0);
    assert_eq!(rule.modifiers.len(), 2);
    assert_eq!(rule.modifiers[0].value, dec!(35));
    assert_eq!(rule.modifiers[1].description.as_deref(), Some("loyalty offset"));

    // A second rule lands after the first.
    let second = repo
        .create_rule(&NewPricingRule::new(
            plan.id,
            "midweek",
            RuleType::DayOfWeek,
            RuleCondition {
                weekdays: vec![Weekday::Tue, Weekday::Wed],
                ..RuleCondition::default()
            },
            3,
        ))
        .expect("create second rule");
    assert_eq!(second.position, 1);

    let loaded = repo
        .get_rate_plan_by_id(plan.id, property_id)
        .expect("load plan")
        .expect("plan should exist");

    assert_eq!(loaded.rules.len(), 2);
    assert_eq!(loaded.rules[0].name, "summer-peak");
    assert_eq!(loaded.rules[0].condition.start_date, rule.condition.start_date);
    assert_eq!(loaded.rules[1].name, "midweek");
    assert_eq!(
        loaded.rules[1].condition.weekdays,
        vec![Weekday::Tue, Weekday::Wed]
    );
}

#[test]
fn rate_plan_is_scoped_to_its_property() {
    let test_db = common::TestDb::new("repo_rate_plan_scoping.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo);
    let other_property = repo
        .create_property(&NewProperty::new("City Annex", 5, "USD"))
        .expect("create property")
        .id;

    let plan = repo
        .create_rate_plan(&NewRatePlan::new(property_id, "Standard", dec!(100), "USD"))
        .expect("create rate plan");

    let foreign = repo
        .get_rate_plan_by_id(plan.id, other_property)
        .expect("lookup should succeed");
    assert!(foreign.is_none());

    let result = repo.delete_rate_plan(plan.id, other_property);
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn list_rate_plans_filters_by_status_and_search() {
    let test_db = common::TestDb::new("repo_rate_plan_filters.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo);

    repo.create_rate_plan(
        &NewRatePlan::new(property_id, "Standard", dec!(100), "USD")
            .with_status(RatePlanStatus::Active),
    )
    .expect("create plan");
    repo.create_rate_plan(
        &NewRatePlan::new(property_id, "Summer Special", dec!(150), "USD")
            .with_status(RatePlanStatus::Draft),
    )
    .expect("create plan");

    let (total, active) = repo
        .list_rate_plans(RatePlanListQuery::new(property_id).status(RatePlanStatus::Active))
        .expect("list");
    assert_eq!(total, 1);
    assert_eq!(active[0].name, "Standard");

    let (total, found) = repo
        .list_rate_plans(RatePlanListQuery::new(property_id).search("summer"))
        .expect("list");
    assert_eq!(total, 1);
    assert_eq!(found[0].name, "Summer Special");
}

#[test]
fn update_rate_plan_clears_bounds() {
    let test_db = common::TestDb::new("repo_rate_plan_update.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo);

    let plan = repo
        .create_rate_plan(
            &NewRatePlan::new(property_id, "Standard", dec!(100), "USD")
                .with_rate_bounds(Some(dec!(80)), Some(dec!(200))),
        )
        .expect("create plan");

    let updated = repo
        .update_rate_plan(
            plan.id,
            property_id,
            &UpdateRatePlan::new()
                .base_rate(dec!(110))
                .rate_bounds(None, None),
        )
        .expect("update plan");

    assert_eq!(updated.base_rate, dec!(110));
    assert_eq!(updated.minimum_rate, None);
    assert_eq!(updated.maximum_rate, None);
}

#[test]
fn rule_updates_and_deletes_cascade_to_modifiers() {
    let test_db = common::TestDb::new("repo_rule_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo);

    let plan = repo
        .create_rate_plan(&NewRatePlan::new(property_id, "Standard", dec!(100), "USD"))
        .expect("create plan");

    let rule = repo
        .create_rule(
            &NewPricingRule::new(
                plan.id,
                "early-bird",
                RuleType::AdvanceBooking,
                RuleCondition {
                    min_advance_days: Some(60),
                    ..RuleCondition::default()
                },
                5,
            )
            .with_modifier(NewRateModifier::percentage(dec!(-15))),
        )
        .expect("create rule");

    let updated = repo
        .update_rule(
            rule.id,
            plan.id,
            &UpdatePricingRule::new().enabled(false).priority(9),
        )
        .expect("update rule");
    assert!(!updated.enabled);
    assert_eq!(updated.priority, 9);
    // Untouched fields survive a partial update.
    assert_eq!(updated.condition.min_advance_days, Some(60));
    assert_eq!(updated.modifiers.len(), 1);

    let added = repo
        .add_modifier(rule.id, &NewRateModifier::fixed(dec!(10)))
        .expect("add modifier");
    assert_eq!(added.position, 1);

    repo.delete_rule(rule.id, plan.id).expect("delete rule");

    let reloaded = repo
        .get_rate_plan_by_id(plan.id, property_id)
        .expect("load plan")
        .expect("plan should exist");
    assert!(reloaded.rules.is_empty());
}

#[test]
fn day_occupancy_aggregates_channels_as_shared_inventory() {
    let test_db = common::TestDb::new("repo_shared_inventory.db");
    let repo = DieselRepository::new(test_db.pool());
    let property_id = seed_property(&repo); // 10 rooms

    let check_in = "2026-07-01".parse().unwrap();
    let check_out = "2026-07-04".parse().unwrap();

    repo.create_booking(
        &NewBooking::new(property_id, "booking.com", check_in, check_out).with_rooms(3),
    )
    .expect("create booking");
    repo.create_booking(&NewBooking::new(property_id, "expedia", check_in, check_out))
        .expect("create booking");
    // Cancelled bookings release their rooms on every channel.
    repo.create_booking(
        &NewBooking::new(property_id, "airbnb", check_in, check_out)
            .with_rooms(5)
            .with_status(BookingStatus::Cancelled),
    )
    .expect("create booking");

    let night = repo
        .day_occupancy(property_id, "2026-07-02".parse().unwrap())
        .expect("occupancy");
    assert_eq!(night.booked_rooms, 4);
    assert_eq!(night.available_rooms, 6);
    assert_eq!(night.occupancy_percent, dec!(40.00));

    // Check-out day is not occupied.
    let after = repo
        .day_occupancy(property_id, "2026-07-04".parse().unwrap())
        .expect("occupancy");
    assert_eq!(after.booked_rooms, 0);
    assert_eq!(after.available_rooms, 10);

    let missing = repo.day_occupancy(999, "2026-07-02".parse().unwrap());
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}
