pub mod automation;
pub mod booking;
pub mod calendar;
pub mod pricing_rule;
pub mod property;
pub mod rate_modifier;
pub mod rate_plan;
