use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::automation::AutomationSettings;
use crate::domain::rate_plan::RatePlan;
use crate::forms::automation::AutomationSettingsForm;
use crate::repository::{AutomationReader, AutomationWriter, RatePlanReader};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the automation settings template.
pub struct AutomationPageData {
    /// The owning plan.
    pub plan: RatePlan,
    /// Saved settings, if the plan has any.
    pub settings: Option<AutomationSettings>,
}

/// Loads a plan together with its automation settings.
pub fn load_automation_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
) -> ServiceResult<AutomationPageData>
where
    R: RatePlanReader + AutomationReader + ?Sized,
{
    if !user.can(Capability::ManageAutomation) {
        return Err(ServiceError::Unauthorized);
    }

    let plan = repo
        .get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let settings = repo
        .get_automation_settings(rate_plan_id)
        .map_err(ServiceError::from)?;

    Ok(AutomationPageData { plan, settings })
}

/// Saves the automation page, replacing the plan's settings wholesale.
pub fn save_automation_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rate_plan_id: i32,
    form: AutomationSettingsForm,
) -> ServiceResult<AutomationSettings>
where
    R: RatePlanReader + AutomationWriter + ?Sized,
{
    if !user.can(Capability::ManageAutomation) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_rate_plan_by_id(rate_plan_id, user.property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form
        .into_update_automation_settings()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.upsert_automation_settings(rate_plan_id, &updates)
        .map_err(ServiceError::from)
}
