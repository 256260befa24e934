//! Configuration management for the GlowOnCall server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::service::ServiceOffering;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Percentage of the service price collected up front
    pub advance_percent: u8,
    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WhatsappConfig {
    pub base_url: String,
    /// Destination phone token, country code included, no '+'
    pub destination: String,
    pub business_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    pub provider_url: String,
    pub timeout_ms: u64,
    pub max_cache_age_secs: u64,
    pub high_accuracy: bool,
    /// Map URL opened when the device position cannot be resolved
    pub fallback_map_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReferralConfig {
    pub code: String,
    pub site_url: String,
    pub credit_amount: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub whatsapp: WhatsappConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub referral: ReferralConfig,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<ServiceOffering>,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix GLOWONCALL_)
            .add_source(
                Environment::with_prefix("GLOWONCALL")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override WhatsApp destination from WHATSAPP_DESTINATION env var if present
            .set_override_option(
                "whatsapp.destination",
                env::var("WHATSAPP_DESTINATION").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            advance_percent: 40,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Default for WhatsappConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            destination: "917892783668".to_string(),
            business_name: "GlowOnCall".to_string(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            provider_url: "https://ipapi.co/json/".to_string(),
            timeout_ms: 10_000,
            max_cache_age_secs: 60,
            high_accuracy: true,
            fallback_map_url: "https://www.google.com/maps/search/beauty+services+near+me"
                .to_string(),
        }
    }
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            code: "GLOW2025".to_string(),
            site_url: "https://glowoncall.com".to_string(),
            credit_amount: 200,
        }
    }
}

/// Catalog used when none is configured
fn default_catalog() -> Vec<ServiceOffering> {
    vec![
        ServiceOffering::new("haircut", "Haircut & Styling", 499, 45, "Cut, wash and blow-dry"),
        ServiceOffering::new("facial", "Classic Facial", 899, 60, "Deep cleansing facial"),
        ServiceOffering::new("manicure", "Manicure", 399, 40, "Nail shaping and polish"),
        ServiceOffering::new("pedicure", "Pedicure", 499, 50, "Foot soak, scrub and polish"),
        ServiceOffering::new("waxing", "Full Body Waxing", 1199, 90, "Full body waxing service"),
        ServiceOffering::new("bridal", "Bridal Makeup", 4999, 180, "Complete bridal package"),
    ]
}
