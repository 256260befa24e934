//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, catalog, contact, health, location, referral};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GlowOnCall API",
        version = "1.0.0",
        description = "Home beauty service booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "GlowOnCall Team", email = "dev@glowoncall.com")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::list_services,
        catalog::get_service,
        catalog::quote_service,
        // Bookings
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_field,
        bookings::submit_booking,
        bookings::confirm_booking,
        bookings::discard_booking,
        // Location
        location::map_url,
        // Contact
        contact::send_message,
        // Referral
        referral::get_referral,
    ),
    components(
        schemas(
            // Catalog
            crate::models::service::ServiceOffering,
            catalog::QuoteResponse,
            // Bookings
            crate::models::booking::BookingField,
            crate::models::booking::BookingStage,
            crate::models::booking::BookingRecord,
            crate::models::booking::PaymentQuote,
            crate::services::bookings::FieldStatus,
            crate::services::whatsapp::DeliveryStatus,
            bookings::CreateBookingResponse,
            bookings::SessionResponse,
            bookings::UpdateFieldRequest,
            bookings::UpdateFieldResponse,
            bookings::SubmitResponse,
            bookings::ConfirmResponse,
            // Location
            crate::services::location::MapSource,
            crate::services::location::ResolvedMap,
            location::MapUrlRequest,
            // Contact
            contact::ContactRequest,
            contact::ContactResponse,
            // Referral
            referral::ReferralResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::FieldIssue,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Service catalog and price quotes"),
        (name = "bookings", description = "Booking sessions and the payment flow"),
        (name = "location", description = "Geolocation map URLs"),
        (name = "contact", description = "Contact form"),
        (name = "referral", description = "Refer & Earn")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
