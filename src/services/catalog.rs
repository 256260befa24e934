//! Service catalog lookups
//!
//! The catalog is fixed at startup from configuration; there is no
//! admin surface for editing it at runtime.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::service::ServiceOffering,
};

#[derive(Clone)]
pub struct CatalogService {
    offerings: Arc<Vec<ServiceOffering>>,
}

impl CatalogService {
    pub fn new(offerings: Vec<ServiceOffering>) -> Self {
        Self {
            offerings: Arc::new(offerings),
        }
    }

    pub fn list(&self) -> Vec<ServiceOffering> {
        self.offerings.as_ref().clone()
    }

    pub fn find(&self, slug: &str) -> Option<ServiceOffering> {
        self.offerings.iter().find(|o| o.slug == slug).cloned()
    }

    pub fn get(&self, slug: &str) -> AppResult<ServiceOffering> {
        self.find(slug)
            .ok_or_else(|| AppError::NotFound(format!("Service '{}' not found", slug)))
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.offerings.iter().any(|o| o.slug == slug)
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogService {
        CatalogService::new(vec![
            ServiceOffering::new("haircut", "Haircut & Styling", 499, 45, "Cut and style"),
            ServiceOffering::new("facial", "Classic Facial", 899, 60, "Deep cleansing"),
        ])
    }

    #[test]
    fn finds_by_slug() {
        let catalog = catalog();
        assert_eq!(catalog.find("haircut").unwrap().price, 499);
        assert!(catalog.find("massage").is_none());
        assert!(catalog.contains("facial"));
    }

    #[test]
    fn get_unknown_is_not_found() {
        assert!(matches!(
            catalog().get("massage"),
            Err(AppError::NotFound(_))
        ));
    }
}
