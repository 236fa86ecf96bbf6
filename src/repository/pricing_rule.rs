use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::pricing_rule::{
        NewPricingRule as DomainNewPricingRule, PricingRule as DomainPricingRule,
        UpdatePricingRule as DomainUpdatePricingRule,
    },
    domain::rate_modifier::{
        NewRateModifier as DomainNewRateModifier, RateModifier as DomainRateModifier,
    },
    models::pricing_rule::{
        NewPricingRule as DbNewPricingRule, PricingRule as DbPricingRule,
        UpdatePricingRule as DbUpdatePricingRule,
    },
    models::rate_modifier::{NewRateModifier as DbNewRateModifier, RateModifier as DbRateModifier},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, PricingRuleReader, PricingRuleWriter},
};

impl PricingRuleReader for DieselRepository {
    fn get_rule_by_id(
        &self,
        id: i32,
        rate_plan_id: i32,
    ) -> RepositoryResult<Option<DomainPricingRule>> {
        use crate::schema::pricing_rules;

        let mut conn = self.conn()?;
        let rule = pricing_rules::table
            .filter(pricing_rules::id.eq(id))
            .filter(pricing_rules::rate_plan_id.eq(rate_plan_id))
            .first::<DbPricingRule>(&mut conn)
            .optional()?;

        if let Some(db_rule) = rule {
            let modifiers = load_modifiers_for_rule(&mut conn, db_rule.id)?;
            Ok(Some(db_rule.into_domain(modifiers)))
        } else {
            Ok(None)
        }
    }

    fn list_rules(&self, rate_plan_id: i32) -> RepositoryResult<Vec<DomainPricingRule>> {
        let mut conn = self.conn()?;
        let mut rules =
            super::rate_plan::load_rules_for_plans(&mut conn, &[rate_plan_id])?;
        Ok(rules.remove(&rate_plan_id).unwrap_or_default())
    }
}

impl PricingRuleWriter for DieselRepository {
    fn create_rule(&self, new_rule: &DomainNewPricingRule) -> RepositoryResult<DomainPricingRule> {
        use crate::schema::pricing_rules;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            // Declaration order: the new rule goes after every existing rule
            // of the plan.
            let next_position = pricing_rules::table
                .filter(pricing_rules::rate_plan_id.eq(new_rule.rate_plan_id))
                .select(diesel::dsl::max(pricing_rules::position))
                .first::<Option<i32>>(conn)?
                .map_or(0, |position| position + 1);

            let db_new = DbNewPricingRule::from_domain(new_rule, next_position);
            let created = diesel::insert_into(pricing_rules::table)
                .values(&db_new)
                .get_result::<DbPricingRule>(conn)?;

            let mut modifiers = Vec::with_capacity(new_rule.modifiers.len());
            for (index, new_modifier) in new_rule.modifiers.iter().enumerate() {
                modifiers.push(insert_modifier(conn, created.id, new_modifier, index as i32)?);
            }

            Ok::<DomainPricingRule, RepositoryError>(created.into_domain(modifiers))
        })
    }

    fn update_rule(
        &self,
        rule_id: i32,
        rate_plan_id: i32,
        updates: &DomainUpdatePricingRule,
    ) -> RepositoryResult<DomainPricingRule> {
        use crate::schema::pricing_rules;

        let mut conn = self.conn()?;
        let db_updates = DbUpdatePricingRule::from(updates);

        let target = pricing_rules::table
            .filter(pricing_rules::id.eq(rule_id))
            .filter(pricing_rules::rate_plan_id.eq(rate_plan_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbPricingRule>(&mut conn)?;

        let modifiers = load_modifiers_for_rule(&mut conn, updated.id)?;
        Ok(updated.into_domain(modifiers))
    }

    fn delete_rule(&self, rule_id: i32, rate_plan_id: i32) -> RepositoryResult<()> {
        use crate::schema::{pricing_rules, rate_modifiers};

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            diesel::delete(rate_modifiers::table.filter(rate_modifiers::rule_id.eq(rule_id)))
                .execute(conn)?;

            let target = pricing_rules::table
                .filter(pricing_rules::id.eq(rule_id))
                .filter(pricing_rules::rate_plan_id.eq(rate_plan_id));

            let deleted = diesel::delete(target).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn add_modifier(
        &self,
        rule_id: i32,
        new_modifier: &DomainNewRateModifier,
    ) -> RepositoryResult<DomainRateModifier> {
        use crate::schema::rate_modifiers;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let next_position = rate_modifiers::table
                .filter(rate_modifiers::rule_id.eq(rule_id))
                .select(diesel::dsl::max(rate_modifiers::position))
                .first::<Option<i32>>(conn)?
                .map_or(0, |position| position + 1);

            insert_modifier(conn, rule_id, new_modifier, next_position)
        })
    }

    fn delete_modifier(&self, modifier_id: i32, rule_id: i32) -> RepositoryResult<()> {
        use crate::schema::rate_modifiers;

        let mut conn = self.conn()?;

        let target = rate_modifiers::table
            .filter(rate_modifiers::id.eq(modifier_id))
            .filter(rate_modifiers::rule_id.eq(rule_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn insert_modifier(
    conn: &mut SqliteConnection,
    rule_id: i32,
    new_modifier: &DomainNewRateModifier,
    position: i32,
) -> RepositoryResult<DomainRateModifier> {
    use crate::schema::rate_modifiers;

    let db_new = DbNewRateModifier::from_domain(rule_id, new_modifier, position);
    let created = diesel::insert_into(rate_modifiers::table)
        .values(&db_new)
        .get_result::<DbRateModifier>(conn)?;

    Ok(created.into())
}

fn load_modifiers_for_rule(
    conn: &mut SqliteConnection,
    rule_id: i32,
) -> RepositoryResult<Vec<DomainRateModifier>> {
    use crate::schema::rate_modifiers;

    let db_modifiers = rate_modifiers::table
        .filter(rate_modifiers::rule_id.eq(rule_id))
        .order(rate_modifiers::position.asc())
        .load::<DbRateModifier>(conn)?;

    Ok(db_modifiers.into_iter().map(Into::into).collect())
}
