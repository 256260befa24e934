//! Booking session model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Form fields of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingField {
    Name,
    Phone,
    Service,
    Date,
    Time,
    Address,
    Location,
}

impl BookingField {
    /// Every field, in the order forms present them
    pub const ALL: [BookingField; 7] = [
        BookingField::Name,
        BookingField::Phone,
        BookingField::Service,
        BookingField::Date,
        BookingField::Time,
        BookingField::Address,
        BookingField::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Phone => "phone",
            BookingField::Service => "service",
            BookingField::Date => "date",
            BookingField::Time => "time",
            BookingField::Address => "address",
            BookingField::Location => "location",
        }
    }

    /// Location is the only optional field
    pub fn is_required(&self) -> bool {
        !matches!(self, BookingField::Location)
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(BookingField::Name),
            "phone" => Ok(BookingField::Phone),
            "service" => Ok(BookingField::Service),
            "date" => Ok(BookingField::Date),
            "time" => Ok(BookingField::Time),
            "address" => Ok(BookingField::Address),
            "location" => Ok(BookingField::Location),
            _ => Err(format!("Invalid booking field: {}", s)),
        }
    }
}

/// Stage of one booking attempt
///
/// `empty → validating → {invalid | valid} → payment_pending → confirmed`.
/// Any edit re-enters `validating`; `confirmed` is optimistic since the
/// handoff is never acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    Empty,
    Validating,
    Invalid,
    Valid,
    PaymentPending,
    Confirmed,
}

impl BookingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStage::Empty => "empty",
            BookingStage::Validating => "validating",
            BookingStage::Invalid => "invalid",
            BookingStage::Valid => "valid",
            BookingStage::PaymentPending => "payment_pending",
            BookingStage::Confirmed => "confirmed",
        }
    }

    /// Fields may be edited at every stage before the handoff fires
    pub fn is_editable(&self) -> bool {
        !matches!(self, BookingStage::Confirmed)
    }

    /// Stage reached after an edit pass, given whole-form validity
    pub fn after_validation(form_valid: bool) -> Self {
        if form_valid {
            BookingStage::Valid
        } else {
            BookingStage::Invalid
        }
    }
}

impl std::fmt::Display for BookingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw form input, populated field-by-field as the customer types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
}

impl BookingDraft {
    pub fn get(&self, field: BookingField) -> Option<&str> {
        match field {
            BookingField::Name => self.name.as_deref(),
            BookingField::Phone => self.phone.as_deref(),
            BookingField::Service => self.service.as_deref(),
            BookingField::Date => self.date.as_deref(),
            BookingField::Time => self.time.as_deref(),
            BookingField::Address => self.address.as_deref(),
            BookingField::Location => self.location.as_deref(),
        }
    }

    /// Store a trimmed value; a blank value clears the field
    pub fn set(&mut self, field: BookingField, value: &str) {
        let trimmed = value.trim();
        let stored = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        match field {
            BookingField::Name => self.name = stored,
            BookingField::Phone => self.phone = stored,
            BookingField::Service => self.service = stored,
            BookingField::Date => self.date = stored,
            BookingField::Time => self.time = stored,
            BookingField::Address => self.address = stored,
            BookingField::Location => self.location = stored,
        }
    }

    pub fn is_empty(&self) -> bool {
        BookingField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// A fully validated booking, ready for message composition
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingRecord {
    pub name: String,
    pub phone: String,
    /// Display name of the chosen catalog service
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    /// Optional map URL supplied by the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Service price in whole rupees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

/// Advance/remaining split for a service price. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaymentQuote {
    pub total: u32,
    pub advance: u32,
    pub remaining: u32,
}

/// One in-memory booking attempt, owned by the session store
#[derive(Debug, Clone)]
pub struct BookingSession {
    pub id: Uuid,
    pub draft: BookingDraft,
    pub stage: BookingStage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            draft: BookingDraft::default(),
            stage: BookingStage::Empty,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_set_trims_and_clears() {
        let mut draft = BookingDraft::default();
        draft.set(BookingField::Name, "  Jane Doe  ");
        assert_eq!(draft.get(BookingField::Name), Some("Jane Doe"));

        draft.set(BookingField::Name, "   ");
        assert_eq!(draft.get(BookingField::Name), None);
        assert!(draft.is_empty());
    }

    #[test]
    fn stage_transitions() {
        assert_eq!(BookingStage::after_validation(true), BookingStage::Valid);
        assert_eq!(BookingStage::after_validation(false), BookingStage::Invalid);
        assert!(BookingStage::PaymentPending.is_editable());
        assert!(!BookingStage::Confirmed.is_editable());
    }

    #[test]
    fn field_round_trips_through_str() {
        for field in BookingField::ALL {
            assert_eq!(field.as_str().parse::<BookingField>().unwrap(), field);
        }
    }
}
