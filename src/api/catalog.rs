//! Service catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{booking::PaymentQuote, service::ServiceOffering},
};

/// Price preview for one service
#[derive(Serialize, ToSchema)]
pub struct QuoteResponse {
    pub service: ServiceOffering,
    pub quote: PaymentQuote,
    pub advance_percent: u8,
    pub currency_symbol: String,
}

/// List the service catalog
#[utoipa::path(
    get,
    path = "/services",
    tag = "catalog",
    responses(
        (status = 200, description = "All bookable services", body = Vec<ServiceOffering>)
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
) -> Json<Vec<ServiceOffering>> {
    Json(state.services.catalog.list())
}

/// Get one service by slug
#[utoipa::path(
    get,
    path = "/services/{slug}",
    tag = "catalog",
    params(
        ("slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Service details", body = ServiceOffering),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ServiceOffering>> {
    let service = state.services.catalog.get(&slug)?;
    Ok(Json(service))
}

/// Preview the advance/remaining split for a service
#[utoipa::path(
    get,
    path = "/services/{slug}/quote",
    tag = "catalog",
    params(
        ("slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Advance payment quote", body = QuoteResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn quote_service(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<QuoteResponse>> {
    let service = state.services.catalog.get(&slug)?;
    let quote = state.services.pricing.quote(service.price);

    Ok(Json(QuoteResponse {
        service,
        quote,
        advance_percent: state.services.pricing.advance_percent(),
        currency_symbol: state.config.booking.currency_symbol.clone(),
    }))
}
