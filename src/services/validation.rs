//! Field validation for booking forms
//!
//! Each rule returns a human-readable error for one field. Whole-form
//! validation applies every rule without short-circuiting so all invalid
//! fields are reported at once. Rules are pure; re-validating an
//! unchanged value always yields the same verdict.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult, FieldIssue},
    models::booking::{BookingDraft, BookingField, BookingRecord},
    services::catalog::CatalogService,
};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const MIN_NAME_LEN: usize = 2;
const MIN_ADDRESS_LEN: usize = 10;

fn name_error(value: &str) -> Option<String> {
    if value.is_empty() {
        Some("Full name is required".to_string())
    } else if value.chars().count() < MIN_NAME_LEN {
        Some("Name must be at least 2 characters long".to_string())
    } else if !NAME_RE.is_match(value) {
        Some("Name should only contain letters and spaces".to_string())
    } else {
        None
    }
}

fn phone_error(value: &str) -> Option<String> {
    if value.is_empty() {
        Some("Phone number is required".to_string())
    } else if !PHONE_RE.is_match(value) {
        Some("Please enter a valid 10-digit phone number".to_string())
    } else {
        None
    }
}

fn date_error(value: &str, today: NaiveDate) -> Option<String> {
    if value.is_empty() {
        return Some("Please select a date".to_string());
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Err(_) => Some("Please select a valid date".to_string()),
        // Strictly-before comparison: today itself is bookable
        Ok(date) if date < today => Some("Please select a future date".to_string()),
        Ok(_) => None,
    }
}

fn time_error(value: &str) -> Option<String> {
    if value.is_empty() {
        Some("Please select a time".to_string())
    } else {
        None
    }
}

fn address_error(value: &str) -> Option<String> {
    if value.is_empty() {
        Some("Address is required".to_string())
    } else if value.chars().count() < MIN_ADDRESS_LEN {
        Some("Please enter a complete address".to_string())
    } else {
        None
    }
}

#[derive(Clone)]
pub struct ValidationService {
    catalog: CatalogService,
}

impl ValidationService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    fn service_error(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            Some("Please select a service".to_string())
        } else if !self.catalog.contains(value) {
            Some("Please select a service from our catalog".to_string())
        } else {
            None
        }
    }

    /// Validate one field value against its rule, with an explicit date floor
    pub fn check_value(&self, field: BookingField, value: &str, today: NaiveDate) -> Option<String> {
        match field {
            BookingField::Name => name_error(value),
            BookingField::Phone => phone_error(value),
            BookingField::Service => self.service_error(value),
            BookingField::Date => date_error(value, today),
            BookingField::Time => time_error(value),
            BookingField::Address => address_error(value),
            // Any map link the customer pastes is accepted as-is
            BookingField::Location => None,
        }
    }

    /// Current verdict for a field of a draft, unset fields included
    pub fn field_error(&self, draft: &BookingDraft, field: BookingField) -> Option<String> {
        let today = Self::today();
        match draft.get(field) {
            Some(value) => self.check_value(field, value, today),
            None if field.is_required() => self.check_value(field, "", today),
            None => None,
        }
    }

    /// Whole-form validation: every rule runs, every failure is reported
    pub fn check_draft(&self, draft: &BookingDraft) -> Vec<FieldIssue> {
        BookingField::ALL
            .iter()
            .filter_map(|field| {
                self.field_error(draft, *field).map(|message| FieldIssue {
                    field: field.as_str().to_string(),
                    message,
                })
            })
            .collect()
    }

    pub fn is_form_valid(&self, draft: &BookingDraft) -> bool {
        self.check_draft(draft).is_empty()
    }

    /// Convert a draft into a validated record, resolving the catalog service
    pub fn materialize(&self, draft: &BookingDraft) -> AppResult<BookingRecord> {
        let issues = self.check_draft(draft);
        if !issues.is_empty() {
            return Err(AppError::FormValidation(issues));
        }

        let offering = self.catalog.get(draft.service.as_deref().unwrap_or_default())?;
        let date = NaiveDate::parse_from_str(draft.date.as_deref().unwrap_or_default(), "%Y-%m-%d")
            .map_err(|e| AppError::Internal(format!("Validated date failed to parse: {}", e)))?;

        Ok(BookingRecord {
            name: draft.name.clone().unwrap_or_default(),
            phone: draft.phone.clone().unwrap_or_default(),
            service: offering.name.clone(),
            date,
            time: draft.time.clone().unwrap_or_default(),
            address: draft.address.clone().unwrap_or_default(),
            location: draft.location.clone(),
            price: Some(offering.price),
        })
    }

    /// Earliest bookable calendar date
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
