//! Business logic services

pub mod bookings;
pub mod catalog;
pub mod location;
pub mod pricing;
pub mod validation;
pub mod whatsapp;

use crate::{config::AppConfig, store::Store};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub validation: validation::ValidationService,
    pub pricing: pricing::PricingService,
    pub whatsapp: whatsapp::WhatsappService,
    pub location: location::LocationService,
    pub bookings: bookings::BookingsService,
}

impl Services {
    /// Create all services with the given store
    pub fn new(config: &AppConfig, store: Store) -> Self {
        let catalog = catalog::CatalogService::new(config.catalog.clone());
        let validation = validation::ValidationService::new(catalog.clone());
        let pricing = pricing::PricingService::new(config.booking.advance_percent);
        let whatsapp =
            whatsapp::WhatsappService::new(config.whatsapp.clone(), config.booking.clone());
        let location = location::LocationService::new(config.geolocation.clone());
        let bookings = bookings::BookingsService::new(
            store.sessions,
            validation.clone(),
            pricing.clone(),
            whatsapp.clone(),
        );

        Self {
            catalog,
            validation,
            pricing,
            whatsapp,
            location,
            bookings,
        }
    }
}
