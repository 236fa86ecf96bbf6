use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a modifier adds a percentage or a fixed amount.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Signed percentage of either the base rate or the running total.
    Percentage,
    /// Signed amount added directly to the running total.
    Fixed,
}

impl ModifierKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl From<&str> for ModifierKind {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Percentage)
    }
}

impl From<ModifierKind> for &'static str {
    fn from(value: ModifierKind) -> Self {
        value.as_str()
    }
}

/// One pricing adjustment owned by a pricing rule.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateModifier {
    /// Unique identifier of the modifier.
    pub id: i32,
    /// Owning rule identifier.
    pub rule_id: i32,
    /// Percentage or fixed adjustment.
    pub kind: ModifierKind,
    /// Signed value: percent for percentage modifiers, an amount otherwise.
    pub value: Decimal,
    /// Percentage modifiers only: take the percentage of the base rate
    /// instead of the running total.
    pub apply_to_base_rate: bool,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Application order inside the rule.
    pub position: i32,
    /// Timestamp for when the modifier record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the modifier record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRateModifier {
    /// Percentage or fixed adjustment.
    pub kind: ModifierKind,
    /// Signed value: percent for percentage modifiers, an amount otherwise.
    pub value: Decimal,
    /// Percentage modifiers only: use the base rate as the basis.
    pub apply_to_base_rate: bool,
    /// Optional human-readable description.
    pub description: Option<String>,
}

impl NewRateModifier {
    /// A percentage modifier applied to the running total.
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: ModifierKind::Percentage,
            value,
            apply_to_base_rate: false,
            description: None,
        }
    }

    /// A percentage modifier applied to the original base rate.
    pub fn percentage_of_base(value: Decimal) -> Self {
        Self {
            kind: ModifierKind::Percentage,
            value,
            apply_to_base_rate: true,
            description: None,
        }
    }

    /// A fixed amount added to the running total.
    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: ModifierKind::Fixed,
            value,
            apply_to_base_rate: false,
            description: None,
        }
    }

    /// Attach a description to the payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
