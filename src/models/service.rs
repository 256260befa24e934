//! Service catalog model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bookable service from the fixed catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceOffering {
    /// Stable identifier used by booking forms
    pub slug: String,
    /// Display name shown to customers and used in messages
    pub name: String,
    /// Price in whole rupees
    pub price: u32,
    pub duration_minutes: u32,
    pub description: String,
}

impl ServiceOffering {
    pub fn new(slug: &str, name: &str, price: u32, duration_minutes: u32, description: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            price,
            duration_minutes,
            description: description.to_string(),
        }
    }
}
