use diesel::prelude::*;

use crate::{
    domain::automation::{
        AutomationSettings as DomainAutomationSettings,
        UpdateAutomationSettings as DomainUpdateAutomationSettings,
    },
    models::automation::{
        AutomationSettings as DbAutomationSettings, UpsertAutomationSettings as DbUpsert,
    },
    repository::errors::RepositoryResult,
    repository::{AutomationReader, AutomationWriter, DieselRepository},
};

impl AutomationReader for DieselRepository {
    fn get_automation_settings(
        &self,
        rate_plan_id: i32,
    ) -> RepositoryResult<Option<DomainAutomationSettings>> {
        use crate::schema::automation_settings;

        let mut conn = self.conn()?;
        let settings = automation_settings::table
            .filter(automation_settings::rate_plan_id.eq(rate_plan_id))
            .first::<DbAutomationSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }
}

impl AutomationWriter for DieselRepository {
    fn upsert_automation_settings(
        &self,
        rate_plan_id: i32,
        updates: &DomainUpdateAutomationSettings,
    ) -> RepositoryResult<DomainAutomationSettings> {
        use crate::schema::automation_settings;

        let mut conn = self.conn()?;
        let db_upsert = DbUpsert::from_domain(rate_plan_id, updates);

        // One settings record per plan, replaced wholesale on save.
        let saved = diesel::insert_into(automation_settings::table)
            .values(&db_upsert)
            .on_conflict(automation_settings::rate_plan_id)
            .do_update()
            .set(&db_upsert)
            .get_result::<DbAutomationSettings>(&mut conn)?;

        Ok(saved.into())
    }
}
