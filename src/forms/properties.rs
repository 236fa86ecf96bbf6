use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::property::{NewProperty, UpdateProperty};
use crate::forms::{sanitize_currency, sanitize_inline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a property name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the property form helpers.
pub type PropertyFormResult<T> = Result<T, PropertyFormError>;

/// Errors that can occur while processing property forms.
#[derive(Debug, Error)]
pub enum PropertyFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("property name cannot be empty")]
    EmptyName,
    /// The provided currency code is invalid.
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
}

/// Form payload emitted when submitting the "Add property" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPropertyForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional street address.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    /// Total number of physical rooms.
    #[validate(range(min = 1))]
    pub total_rooms: i32,
    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,
}

impl AddPropertyForm {
    /// Validates and sanitizes the payload into a domain `NewProperty`.
    pub fn into_new_property(self) -> PropertyFormResult<NewProperty> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(PropertyFormError::EmptyName);
        }

        let currency =
            sanitize_currency(&self.currency).ok_or_else(|| PropertyFormError::InvalidCurrency {
                value: self.currency.clone(),
            })?;

        let mut new_property = NewProperty::new(name, self.total_rooms, currency);

        if let Some(address) = self
            .address
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
        {
            new_property = new_property.with_address(address);
        }

        Ok(new_property)
    }
}

/// Form payload emitted when submitting the "Edit property" form.
#[derive(Debug, Deserialize, Validate)]
pub struct EditPropertyForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional street address; an empty value clears it.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    /// Total number of physical rooms.
    #[validate(range(min = 1))]
    pub total_rooms: i32,
    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,
}

impl EditPropertyForm {
    /// Validates and sanitizes the payload into a domain `UpdateProperty`.
    pub fn into_update_property(self) -> PropertyFormResult<UpdateProperty> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(PropertyFormError::EmptyName);
        }

        let currency =
            sanitize_currency(&self.currency).ok_or_else(|| PropertyFormError::InvalidCurrency {
                value: self.currency.clone(),
            })?;

        let address = self
            .address
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        Ok(UpdateProperty::new()
            .name(name)
            .address(address)
            .total_rooms(self.total_rooms)
            .currency(currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_property_form_converts() {
        let form = AddPropertyForm {
            name: "  Sea View  Hotel ".to_string(),
            address: Some("1 Beach Rd".to_string()),
            total_rooms: 24,
            currency: "eur".to_string(),
        };

        let property = form.into_new_property().expect("expected success");

        assert_eq!(property.name, "Sea View Hotel");
        assert_eq!(property.address.as_deref(), Some("1 Beach Rd"));
        assert_eq!(property.total_rooms, 24);
        assert_eq!(property.currency, "EUR");
    }

    #[test]
    fn add_property_form_rejects_zero_rooms() {
        let form = AddPropertyForm {
            name: "Annex".to_string(),
            address: None,
            total_rooms: 0,
            currency: "EUR".to_string(),
        };

        let result = form.into_new_property();

        assert!(matches!(result, Err(PropertyFormError::Validation(_))));
    }
}
