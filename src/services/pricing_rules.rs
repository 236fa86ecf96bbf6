use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::pricing_rule::PricingRule;
use crate::domain::rate_modifier::RateModifier;
use crate::domain::rate_plan::RatePlan;
use crate::forms::pricing_rules::{
    AddModifierForm, AddPricingRuleForm, EditPricingRuleForm, ToggleRuleForm,
};
use crate::repository::{PricingRuleReader, PricingRuleWriter, RatePlanReader};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the rule editor template.
pub struct RulesPageData {
    /// The owning plan, with its rules and modifiers in order.
    pub plan: RatePlan,
}

/// Loads one plan with its rules for the rule editor page.
pub fn load_rules_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
) -> ServiceResult<RulesPageData>
where
    R: RatePlanReader + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    let plan = repo
        .get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(RulesPageData { plan })
}

/// Creates a new pricing rule on a plan owned by the user's property.
pub fn create_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    form: AddPricingRuleForm,
) -> ServiceResult<PricingRule>
where
    R: RatePlanReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    // Ownership check before the write: the plan must belong to the
    // user's property.
    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let new_rule = form
        .into_new_pricing_rule(rate_plan_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_rule(&new_rule).map_err(ServiceError::from)
}

/// Updates an existing pricing rule.
pub fn modify_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    rule_id: i32,
    form: EditPricingRuleForm,
) -> ServiceResult<PricingRule>
where
    R: RatePlanReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form
        .into_update_pricing_rule()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_rule(rule_id, rate_plan_id, &updates)
        .map_err(ServiceError::from)
}

/// Enables or disables a rule without touching its definition.
pub fn toggle_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    rule_id: i32,
    form: ToggleRuleForm,
) -> ServiceResult<PricingRule>
where
    R: RatePlanReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let updates = crate::domain::pricing_rule::UpdatePricingRule::new().enabled(form.enabled);

    repo.update_rule(rule_id, rate_plan_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a rule together with its modifiers.
pub fn remove_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    rule_id: i32,
) -> ServiceResult<()>
where
    R: RatePlanReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_rule(rule_id, rate_plan_id)
        .map_err(ServiceError::from)
}

/// Appends a modifier to an existing rule.
pub fn add_modifier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    rule_id: i32,
    form: AddModifierForm,
) -> ServiceResult<RateModifier>
where
    R: RatePlanReader + PricingRuleReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.get_rule_by_id(rule_id, rate_plan_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let new_modifier = form
        .into_new_rate_modifier()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.add_modifier(rule_id, &new_modifier)
        .map_err(ServiceError::from)
}

/// Removes a modifier from a rule.
pub fn remove_modifier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    rule_id: i32,
    modifier_id: i32,
) -> ServiceResult<()>
where
    R: RatePlanReader + PricingRuleWriter + ?Sized,
{
    if !user.can(Capability::ManageRules) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_modifier(modifier_id, rule_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::auth::Role;
    use crate::repository::mock::MockRuleRepository;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user".into(),
            email: "user@example.com".into(),
            name: "User".into(),
            property_id: 1,
            role,
            exp: 0,
        }
    }

    #[test]
    fn rules_require_manage_capability() {
        let repo = MockRuleRepository::new();

        let result = remove_rule(&repo, &user(Role::Client), 1, 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn foreign_plan_is_not_found() {
        let mut repo = MockRuleRepository::new();
        repo.expect_get_rate_plan_by_id()
            .with(eq(5), eq(1))
            .returning(|_, _| Ok(None));

        let result = remove_rule(&repo, &user(Role::Admin), 5, 9);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
