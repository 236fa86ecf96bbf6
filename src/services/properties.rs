use serde::Deserialize;

use crate::auth::{AuthenticatedUser, Capability};
use crate::domain::property::{Property, PropertyListQuery};
use crate::forms::properties::{AddPropertyForm, EditPropertyForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PropertyReader, PropertyWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the properties index page.
#[derive(Debug, Default, Deserialize)]
pub struct PropertiesQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the properties index template.
pub struct PropertiesPageData {
    /// Paginated list of properties to show in the table.
    pub properties: Paginated<Property>,
    /// Search query echoed back to the template when present.
    pub search: Option<String>,
}

/// Loads the properties list for the index page.
pub fn load_properties<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PropertiesQuery,
) -> ServiceResult<PropertiesPageData>
where
    R: PropertyReader + ?Sized,
{
    if !user.can(Capability::ManageProperties) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1);
    let mut list_query = PropertyListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = query.search.as_ref() {
        list_query = list_query.search(value);
    }

    let (total, properties) = repo.list_properties(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let properties = Paginated::new(properties, page, total_pages);

    Ok(PropertiesPageData {
        properties,
        search: query.search,
    })
}

/// Creates a new property.
pub fn create_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddPropertyForm,
) -> ServiceResult<Property>
where
    R: PropertyWriter + ?Sized,
{
    if !user.can(Capability::ManageProperties) {
        return Err(ServiceError::Unauthorized);
    }

    let new_property = form
        .into_new_property()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_property(&new_property).map_err(ServiceError::from)
}

/// Updates an existing property.
pub fn modify_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    property_id: i32,
    form: EditPropertyForm,
) -> ServiceResult<Property>
where
    R: PropertyWriter + ?Sized,
{
    if !user.can(Capability::ManageProperties) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_property()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_property(property_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a property.
pub fn remove_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    property_id: i32,
) -> ServiceResult<()>
where
    R: PropertyWriter + ?Sized,
{
    if !user.can(Capability::ManageProperties) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_property(property_id).map_err(ServiceError::from)
}
