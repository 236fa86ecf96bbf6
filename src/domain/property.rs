use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a managed property.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property {
    /// Unique identifier of the property.
    pub id: i32,
    /// Human-readable name of the property.
    pub name: String,
    /// Optional street address.
    pub address: Option<String>,
    /// Total number of physical rooms shared across all channels.
    pub total_rooms: i32,
    /// Default ISO 4217 currency code for the property.
    pub currency: String,
    /// Timestamp for when the property record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the property record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new property.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    /// Human-readable name of the property.
    pub name: String,
    /// Optional street address.
    pub address: Option<String>,
    /// Total number of physical rooms.
    pub total_rooms: i32,
    /// Default ISO 4217 currency code.
    pub currency: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProperty {
    /// Build a new property payload with a trimmed name.
    pub fn new(name: impl Into<String>, total_rooms: i32, currency: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into().trim().to_string(),
            address: None,
            total_rooms,
            currency: currency.into(),
            updated_at: now,
        }
    }

    /// Attach an address to the payload.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Patch data applied when updating an existing property.
#[derive(Debug, Clone)]
pub struct UpdateProperty {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional address update, using inner `None` to clear the value.
    pub address: Option<Option<String>>,
    /// Optional room count update.
    pub total_rooms: Option<i32>,
    /// Optional currency update.
    pub currency: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProperty {
    /// Create a patch with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            address: None,
            total_rooms: None,
            currency: None,
            updated_at: now,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: Option<impl Into<String>>) -> Self {
        self.address = Some(address.map(|value| value.into()));
        self
    }

    pub fn total_rooms(mut self, total_rooms: i32) -> Self {
        self.total_rooms = Some(total_rooms);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Query definition used to list properties.
#[derive(Debug, Clone)]
pub struct PropertyListQuery {
    /// Optional case-insensitive substring search on name or address.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for PropertyListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyListQuery {
    /// Construct a query that targets all properties.
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to name or address.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
