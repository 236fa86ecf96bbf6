use serde::Deserialize;

use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::rate_plan::{RatePlan, RatePlanListQuery, RatePlanStatus};
use crate::forms::rate_plans::{AddRatePlanForm, EditRatePlanForm, SetRatePlanStatusForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{RatePlanReader, RatePlanWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the rate plans index page.
#[derive(Debug, Default, Deserialize)]
pub struct RatePlansQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Optional status filter.
    pub status: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the rate plans index template.
pub struct RatePlansPageData {
    /// Paginated list of plans to show in the table.
    pub rate_plans: Paginated<RatePlan>,
    /// Search query echoed back to the template when present.
    pub search: Option<String>,
    /// Status filter echoed back to the template when present.
    pub status: Option<RatePlanStatus>,
}

/// Loads the rate plans list for the index page.
pub fn load_rate_plans<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: RatePlansQuery,
) -> ServiceResult<RatePlansPageData>
where
    R: RatePlanReader + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    let status = query.status.as_deref().and_then(RatePlanStatus::parse);

    let page = query.page.unwrap_or(1);
    let mut list_query =
        RatePlanListQuery::new(user.property_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    if let Some(value) = query.search.as_ref() {
        list_query = list_query.search(value);
    }

    let (total, rate_plans) = repo.list_rate_plans(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let rate_plans = Paginated::new(rate_plans, page, total_pages);

    Ok(RatePlansPageData {
        rate_plans,
        search: query.search,
        status,
    })
}

/// Loads one plan, with its rules, for the detail page.
pub fn load_rate_plan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
) -> ServiceResult<RatePlan>
where
    R: RatePlanReader + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new rate plan for the authenticated user's property.
pub fn create_rate_plan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddRatePlanForm,
) -> ServiceResult<RatePlan>
where
    R: RatePlanWriter + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    let new_rate_plan = form
        .into_new_rate_plan(user.property_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_rate_plan(&new_rate_plan)
        .map_err(ServiceError::from)
}

/// Updates an existing rate plan for the authenticated user's property.
pub fn modify_rate_plan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    form: EditRatePlanForm,
) -> ServiceResult<RatePlan>
where
    R: RatePlanWriter + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_rate_plan()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_rate_plan(rate_plan_id, user.property_id, &updates)
        .map_err(ServiceError::from)
}

/// Moves a plan to a new lifecycle status.
pub fn change_rate_plan_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    form: SetRatePlanStatusForm,
) -> ServiceResult<RatePlan>
where
    R: RatePlanWriter + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    let status = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updates = crate::domain::rate_plan::UpdateRatePlan::new().status(status);

    repo.update_rate_plan(rate_plan_id, user.property_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a rate plan together with its rules and automation settings.
pub fn remove_rate_plan<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
) -> ServiceResult<()>
where
    R: RatePlanWriter + ?Sized,
{
    if !user.can(Capability::ManageRatePlans) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_rate_plan(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    use crate::auth::Role;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRatePlanRepository;

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

    fn add_form() -> AddRatePlanForm {
        AddRatePlanForm {
            name: "Standard".to_string(),
            description: None,
            base_rate: "100.00".to_string(),
            currency: "USD".to_string(),
            strategy: "fixed".to_string(),
            minimum_rate: None,
            maximum_rate: None,
            weekend_pricing_enabled: false,
            weekend_multiplier: None,
            weekend_days: Vec::new(),
        }
    }

    #[test]
    fn create_rate_plan_requires_capability() {
        let repo = MockRatePlanRepository::new();

        let result = create_rate_plan(&repo, &user(Role::Supervisor), add_form());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_rate_plan_passes_property_scope() {
        let mut repo = MockRatePlanRepository::new();
        repo.expect_create_rate_plan()
            .withf(|new_plan| new_plan.property_id == 1 && new_plan.base_rate == dec!(100))
            .returning(|_| Err(RepositoryError::NotFound));

        // The repository error is mapped, proving the write was attempted.
        let result = create_rate_plan(&repo, &user(Role::Admin), add_form());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_rate_plan_maps_missing_to_not_found() {
        let mut repo = MockRatePlanRepository::new();
        repo.expect_get_rate_plan_by_id()
            .with(eq(7), eq(1))
            .returning(|_, _| Ok(None));

        let result = load_rate_plan(&repo, &user(Role::Admin), 7);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn malformed_form_is_a_form_error() {
        let repo = MockRatePlanRepository::new();
        let mut form = add_form();
        form.base_rate = "not-a-number".to_string();

        let result = create_rate_plan(&repo, &user(Role::Admin), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
