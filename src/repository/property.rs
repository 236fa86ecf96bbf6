use diesel::prelude::*;

use crate::{
    domain::property::{
        NewProperty as DomainNewProperty, Property as DomainProperty, PropertyListQuery,
        UpdateProperty as DomainUpdateProperty,
    },
    models::property::{
        NewProperty as DbNewProperty, Property as DbProperty, UpdateProperty as DbUpdateProperty,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, PropertyReader, PropertyWriter},
};

impl PropertyReader for DieselRepository {
    fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProperty>> {
        use crate::schema::properties;

        let mut conn = self.conn()?;
        let property = properties::table
            .filter(properties::id.eq(id))
            .first::<DbProperty>(&mut conn)
            .optional()?;

        Ok(property.map(Into::into))
    }

    fn list_properties(
        &self,
        query: PropertyListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProperty>)> {
        use crate::schema::properties;

        let mut conn = self.conn()?;

        let mut count_query = properties::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                properties::name
                    .like(pattern.clone())
                    .or(properties::address.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = properties::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                properties::name
                    .like(pattern.clone())
                    .or(properties::address.like(pattern)),
            );
        }

        items = items.order((properties::name.asc(), properties::created_at.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_properties = items.load::<DbProperty>(&mut conn)?;

        Ok((total, db_properties.into_iter().map(Into::into).collect()))
    }
}

impl PropertyWriter for DieselRepository {
    fn create_property(&self, new_property: &DomainNewProperty) -> RepositoryResult<DomainProperty> {
        use crate::schema::properties;

        let mut conn = self.conn()?;
        let db_new = DbNewProperty::from(new_property);

        let created = diesel::insert_into(properties::table)
            .values(&db_new)
            .get_result::<DbProperty>(&mut conn)?;

        Ok(created.into())
    }

    fn update_property(
        &self,
        property_id: i32,
        updates: &DomainUpdateProperty,
    ) -> RepositoryResult<DomainProperty> {
        use crate::schema::properties;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProperty::from(updates);

        let target = properties::table.filter(properties::id.eq(property_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProperty>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_property(&self, property_id: i32) -> RepositoryResult<()> {
        use crate::schema::properties;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(properties::table.filter(properties::id.eq(property_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
