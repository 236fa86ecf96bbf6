use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::property::{
    NewProperty as DomainNewProperty, Property as DomainProperty,
    UpdateProperty as DomainUpdateProperty,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::properties)]
pub struct Property {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub total_rooms: i32,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::properties)]
pub struct NewProperty<'a> {
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub total_rooms: i32,
    pub currency: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::properties)]
pub struct UpdateProperty<'a> {
    pub name: Option<&'a str>,
    pub address: Option<Option<&'a str>>,
    pub total_rooms: Option<i32>,
    pub currency: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Property> for DomainProperty {
    fn from(value: Property) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            total_rooms: value.total_rooms,
            currency: value.currency,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProperty> for NewProperty<'a> {
    fn from(value: &'a DomainNewProperty) -> Self {
        Self {
            name: value.name.as_str(),
            address: value.address.as_deref(),
            total_rooms: value.total_rooms,
            currency: value.currency.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProperty> for UpdateProperty<'a> {
    fn from(value: &'a DomainUpdateProperty) -> Self {
        Self {
            name: value.name.as_deref(),
            address: value.address.as_ref().map(|address| address.as_deref()),
            total_rooms: value.total_rooms,
            currency: value.currency.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
