use chrono::NaiveDate;
use rust_decimal_macros::dec;

use rateboard::auth::{AuthenticatedUser, Role};
use rateboard::domain::booking::NewBooking;
use rateboard::domain::pricing_rule::{NewPricingRule, RuleCondition, RuleType};
use rateboard::domain::property::NewProperty;
use rateboard::domain::rate_modifier::NewRateModifier;
use rateboard::domain::rate_plan::{NewRatePlan, RatePlanStatus};
use rateboard::forms::automation::AutomationSettingsForm;
use rateboard::repository::{BookingWriter, DieselRepository, PricingRuleWriter, PropertyWriter, RatePlanWriter};
use rateboard::services::ServiceError;
use rateboard::services::automation::save_automation_settings;
use rateboard::services::calendar::{CalendarQuery, build_rate_calendar};

mod common;

fn user(property_id: i32, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user".into(),
        email: "user@example.com".into(),
        name: "User".into(),
        property_id,
        role,
        exp: 0,
    }
}

fn query(start: &str, end: &str) -> CalendarQuery {
    CalendarQuery {
        start: Some(start.parse().unwrap()),
        end: Some(end.parse().unwrap()),
        stay_length: None,
    }
}

#[test]
fn calendar_prices_each_night_from_bookings_and_rules() {
    let test_db = common::TestDb::new("service_calendar_end_to_end.db");
    let repo = DieselRepository::new(test_db.pool());

    let property_id = repo
        .create_property(&NewProperty::new("Sea View Hotel", 10, "USD"))
        .expect("create property")
        .id;
    let admin = user(property_id, Role::Admin);

    let plan = repo
        .create_rate_plan(
            &NewRatePlan::new(property_id, "Standard", dec!(100), "USD")
                .with_status(RatePlanStatus::Active),
        )
        .expect("create plan");

    // +25% whenever occupancy reaches 80%.
    repo.create_rule(
        &NewPricingRule::new(
            plan.id,
            "high-demand",
            RuleType::OccupancyLevel,
            RuleCondition {
                min_occupancy: Some(80),
                ..RuleCondition::default()
            },
            7,
        )
        .with_modifier(NewRateModifier::percentage(dec!(25))),
    )
    .expect("create rule");

    // 8 of 10 rooms are taken on 2026-07-02 only, spread across channels.
    let check_in: NaiveDate = "2026-07-02".parse().unwrap();
    let check_out: NaiveDate = "2026-07-03".parse().unwrap();
    repo.create_booking(&NewBooking::new(property_id, "booking.com", check_in, check_out).with_rooms(5))
        .expect("create booking");
    repo.create_booking(&NewBooking::new(property_id, "expedia", check_in, check_out).with_rooms(3))
        .expect("create booking");

    let today: NaiveDate = "2026-06-01".parse().unwrap();
    let data = build_rate_calendar(
        &repo,
        &admin,
        plan.id,
        query("2026-07-01", "2026-07-03"),
        today,
    )
    .expect("build calendar");

    assert_eq!(data.entries.len(), 3);

    let quiet = &data.entries[0];
    assert_eq!(quiet.final_rate, dec!(100.00));
    assert!(quiet.applied_rules.is_empty());
    assert_eq!(quiet.available_rooms, 10);

    let busy = &data.entries[1];
    assert_eq!(busy.occupancy_percent, dec!(80.00));
    assert_eq!(busy.booked_rooms, 8);
    assert_eq!(busy.available_rooms, 2);
    assert_eq!(busy.final_rate, dec!(125.00));
    assert_eq!(busy.applied_rules, vec!["high-demand".to_string()]);

    let after = &data.entries[2];
    assert_eq!(after.final_rate, dec!(100.00));
}

#[test]
fn automation_cap_limits_the_calendar() {
    let test_db = common::TestDb::new("service_calendar_automation.db");
    let repo = DieselRepository::new(test_db.pool());

    let property_id = repo
        .create_property(&NewProperty::new("Sea View Hotel", 10, "USD"))
        .expect("create property")
        .id;
    let admin = user(property_id, Role::Admin);

    let plan = repo
        .create_rate_plan(&NewRatePlan::new(property_id, "Standard", dec!(100), "USD"))
        .expect("create plan");

    repo.create_rule(
        &NewPricingRule::new(
            plan.id,
            "festival",
            RuleType::DateRange,
            RuleCondition {
                start_date: Some("2026-07-01".parse().unwrap()),
                end_date: Some("2026-07-31".parse().unwrap()),
                ..RuleCondition::default()
            },
            9,
        )
        .with_modifier(NewRateModifier::percentage(dec!(50))),
    )
    .expect("create rule");

    // Cap daily movement at 10% through the automation page.
    save_automation_settings(
        &repo,
        &admin,
        plan.id,
        AutomationSettingsForm {
            enabled: true,
            max_adjustment_percent: Some("10".to_string()),
            step_min_occupancy: Vec::new(),
            step_adjustment_percent: Vec::new(),
            min_demand_multiplier: None,
            max_demand_multiplier: None,
            last_minute_days: None,
            last_minute_discount_percent: None,
            early_bird_days: None,
            early_bird_discount_percent: None,
        },
    )
    .expect("save automation settings");

    let today: NaiveDate = "2026-06-01".parse().unwrap();
    let data = build_rate_calendar(
        &repo,
        &admin,
        plan.id,
        query("2026-07-10", "2026-07-10"),
        today,
    )
    .expect("build calendar");

    assert_eq!(data.entries[0].final_rate, dec!(110.00));
    assert_eq!(data.entries[0].applied_rules, vec!["festival".to_string()]);
}

#[test]
fn clients_see_the_calendar_but_not_the_editor() {
    let test_db = common::TestDb::new("service_calendar_client_role.db");
    let repo = DieselRepository::new(test_db.pool());

    let property_id = repo
        .create_property(&NewProperty::new("Sea View Hotel", 10, "USD"))
        .expect("create property")
        .id;
    let client = user(property_id, Role::Client);

    let plan = repo
        .create_rate_plan(&NewRatePlan::new(property_id, "Standard", dec!(100), "USD"))
        .expect("create plan");

    let today: NaiveDate = "2026-06-01".parse().unwrap();
    let data = build_rate_calendar(
        &repo,
        &client,
        plan.id,
        query("2026-07-01", "2026-07-02"),
        today,
    )
    .expect("clients may view the calendar");
    assert_eq!(data.entries.len(), 2);

    let denied = rateboard::services::rate_plans::load_rate_plans(
        &repo,
        &client,
        Default::default(),
    );
    assert!(matches!(denied, Err(ServiceError::Unauthorized)));
}

#[test]
fn missing_plan_yields_not_found() {
    let test_db = common::TestDb::new("service_calendar_missing_plan.db");
    let repo = DieselRepository::new(test_db.pool());

    let property_id = repo
        .create_property(&NewProperty::new("Sea View Hotel", 10, "USD"))
        .expect("create property")
        .id;
    let admin = user(property_id, Role::Admin);

    let today: NaiveDate = "2026-06-01".parse().unwrap();
    let result = build_rate_calendar(&repo, &admin, 404, CalendarQuery::default(), today);

    assert!(matches!(result, Err(ServiceError::NotFound)));
}
