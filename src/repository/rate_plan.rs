use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::pricing_rule::PricingRule as DomainPricingRule,
    domain::rate_modifier::RateModifier as DomainRateModifier,
    domain::rate_plan::{
        NewRatePlan as DomainNewRatePlan, RatePlan as DomainRatePlan, RatePlanListQuery,
        UpdateRatePlan as DomainUpdateRatePlan,
    },
    models::pricing_rule::PricingRule as DbPricingRule,
    models::rate_modifier::RateModifier as DbRateModifier,
    models::rate_plan::{
        NewRatePlan as DbNewRatePlan, RatePlan as DbRatePlan, UpdateRatePlan as DbUpdateRatePlan,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, RatePlanReader, RatePlanWriter},
};

impl RatePlanReader for DieselRepository {
    fn get_rate_plan_by_id(
        &self,
        id: i32,
        property_id: i32,
    ) -> RepositoryResult<Option<DomainRatePlan>> {
        use crate::schema::rate_plans;

        let mut conn = self.conn()?;
        let rate_plan = rate_plans::table
            .filter(rate_plans::id.eq(id))
            .filter(rate_plans::property_id.eq(property_id))
            .first::<DbRatePlan>(&mut conn)
            .optional()?;

        if let Some(db_plan) = rate_plan {
            let mut rules = load_rules_for_plans(&mut conn, &[db_plan.id])?;
            let plan_rules = rules.remove(&db_plan.id).unwrap_or_default();
            Ok(Some(db_plan.into_domain(plan_rules)))
        } else {
            Ok(None)
        }
    }

    fn list_rate_plans(
        &self,
        query: RatePlanListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainRatePlan>)> {
        use crate::schema::rate_plans;

        let mut conn = self.conn()?;

        let mut count_query = rate_plans::table
            .filter(rate_plans::property_id.eq(query.property_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            count_query = count_query.filter(rate_plans::status.eq(status.as_str()));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                rate_plans::name
                    .like(pattern.clone())
                    .or(rate_plans::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = rate_plans::table
            .filter(rate_plans::property_id.eq(query.property_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            items = items.filter(rate_plans::status.eq(status.as_str()));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                rate_plans::name
                    .like(pattern.clone())
                    .or(rate_plans::description.like(pattern)),
            );
        }

        items = items.order((rate_plans::name.asc(), rate_plans::created_at.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_plans = items.load::<DbRatePlan>(&mut conn)?;

        if db_plans.is_empty() {
            return Ok((total, Vec::new()));
        }

        let plan_ids: Vec<i32> = db_plans.iter().map(|plan| plan.id).collect();
        let mut rule_map = load_rules_for_plans(&mut conn, &plan_ids)?;

        let mut domain_plans = Vec::with_capacity(db_plans.len());
        for db_plan in db_plans {
            let rules = rule_map.remove(&db_plan.id).unwrap_or_default();
            domain_plans.push(db_plan.into_domain(rules));
        }

        Ok((total, domain_plans))
    }
}

impl RatePlanWriter for DieselRepository {
    fn create_rate_plan(
        &self,
        new_rate_plan: &DomainNewRatePlan,
    ) -> RepositoryResult<DomainRatePlan> {
        use crate::schema::rate_plans;

        let mut conn = self.conn()?;
        let db_new = DbNewRatePlan::from(new_rate_plan);

        let created = diesel::insert_into(rate_plans::table)
            .values(&db_new)
            .get_result::<DbRatePlan>(&mut conn)?;

        Ok(created.into_domain(Vec::new()))
    }

    fn update_rate_plan(
        &self,
        rate_plan_id: i32,
        property_id: i32,
        updates: &DomainUpdateRatePlan,
    ) -> RepositoryResult<DomainRatePlan> {
        use crate::schema::rate_plans;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateRatePlan::from(updates);

        let target = rate_plans::table
            .filter(rate_plans::id.eq(rate_plan_id))
            .filter(rate_plans::property_id.eq(property_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbRatePlan>(&mut conn)?;

        let mut rules = load_rules_for_plans(&mut conn, &[updated.id])?;
        let plan_rules = rules.remove(&updated.id).unwrap_or_default();

        Ok(updated.into_domain(plan_rules))
    }

    fn delete_rate_plan(&self, rate_plan_id: i32, property_id: i32) -> RepositoryResult<()> {
        use crate::schema::{automation_settings, pricing_rules, rate_modifiers, rate_plans};

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let rule_ids = pricing_rules::table
                .filter(pricing_rules::rate_plan_id.eq(rate_plan_id))
                .select(pricing_rules::id)
                .load::<i32>(conn)?;

            if !rule_ids.is_empty() {
                diesel::delete(
                    rate_modifiers::table.filter(rate_modifiers::rule_id.eq_any(&rule_ids)),
                )
                .execute(conn)?;
                diesel::delete(
                    pricing_rules::table.filter(pricing_rules::id.eq_any(&rule_ids)),
                )
                .execute(conn)?;
            }

            diesel::delete(
                automation_settings::table
                    .filter(automation_settings::rate_plan_id.eq(rate_plan_id)),
            )
            .execute(conn)?;

            let target = rate_plans::table
                .filter(rate_plans::id.eq(rate_plan_id))
                .filter(rate_plans::property_id.eq(property_id));

            let deleted = diesel::delete(target).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Load rules (with their modifiers) for a set of plans, keyed by plan id,
/// in declaration order.
pub(crate) fn load_rules_for_plans(
    conn: &mut SqliteConnection,
    plan_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainPricingRule>>> {
    use crate::schema::{pricing_rules, rate_modifiers};

    if plan_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let db_rules = pricing_rules::table
        .filter(pricing_rules::rate_plan_id.eq_any(plan_ids))
        .order(pricing_rules::position.asc())
        .load::<DbPricingRule>(conn)?;

    let rule_ids: Vec<i32> = db_rules.iter().map(|rule| rule.id).collect();

    let mut modifier_map: HashMap<i32, Vec<DomainRateModifier>> = HashMap::new();
    if !rule_ids.is_empty() {
        let db_modifiers = rate_modifiers::table
            .filter(rate_modifiers::rule_id.eq_any(&rule_ids))
            .order(rate_modifiers::position.asc())
            .load::<DbRateModifier>(conn)?;

        for db_modifier in db_modifiers {
            modifier_map
                .entry(db_modifier.rule_id)
                .or_default()
                .push(db_modifier.into());
        }
    }

    let mut map: HashMap<i32, Vec<DomainPricingRule>> = HashMap::new();
    for db_rule in db_rules {
        let modifiers = modifier_map.remove(&db_rule.id).unwrap_or_default();
        map.entry(db_rule.rate_plan_id)
            .or_default()
            .push(db_rule.into_domain(modifiers));
    }

    Ok(map)
}
