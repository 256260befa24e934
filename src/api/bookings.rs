//! Booking session endpoints
//!
//! A session mirrors one visit to the booking form: fields are set one
//! at a time with inline validation, `submit` runs whole-form validation
//! and opens the advance-payment stage, `confirm` fires the WhatsApp
//! handoff and discards the session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::booking::{BookingField, BookingRecord, BookingStage, PaymentQuote},
    services::{bookings::FieldStatus, whatsapp::DeliveryStatus},
};

/// New booking session
#[derive(Serialize, ToSchema)]
pub struct CreateBookingResponse {
    pub id: Uuid,
    pub stage: BookingStage,
    /// Earliest bookable date; forms should use it as their date floor
    pub min_date: NaiveDate,
}

/// Session snapshot with per-field verdicts
#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub stage: BookingStage,
    pub min_date: NaiveDate,
    pub fields: Vec<FieldStatus>,
}

/// Set one field of the booking form
#[derive(Deserialize, ToSchema)]
pub struct UpdateFieldRequest {
    pub value: String,
}

/// Inline validation result for the updated field
#[derive(Serialize, ToSchema)]
pub struct UpdateFieldResponse {
    pub stage: BookingStage,
    pub field: FieldStatus,
}

/// Successful submission: the booking now awaits the advance payment
#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    pub stage: BookingStage,
    pub booking: BookingRecord,
    pub quote: PaymentQuote,
    /// Static QR affordance; payment is never verified server-side
    pub payment_note: String,
}

/// Confirmed booking: message composed, handoff URL ready
#[derive(Serialize, ToSchema)]
pub struct ConfirmResponse {
    pub booking: BookingRecord,
    pub quote: PaymentQuote,
    pub message: String,
    pub handoff_url: String,
    pub delivery: DeliveryStatus,
}

/// Start a booking session
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 201, description = "Session created", body = CreateBookingResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
) -> (StatusCode, Json<CreateBookingResponse>) {
    let session = state.services.bookings.create().await;
    (
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            id: session.id,
            stage: session.stage,
            min_date: state.services.bookings.min_date(),
        }),
    )
}

/// Get the current state of a booking session
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking session ID")
    ),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let (session, fields) = state.services.bookings.get(id).await?;
    Ok(Json(SessionResponse {
        id: session.id,
        stage: session.stage,
        min_date: state.services.bookings.min_date(),
        fields,
    }))
}

/// Set one form field and validate it
#[utoipa::path(
    put,
    path = "/bookings/{id}/fields/{field}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking session ID"),
        ("field" = String, Path, description = "Field name: name, phone, service, date, time, address or location")
    ),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Field stored with its verdict", body = UpdateFieldResponse),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session already confirmed")
    )
)]
pub async fn update_field(
    State(state): State<crate::AppState>,
    Path((id, field)): Path<(Uuid, BookingField)>,
    Json(request): Json<UpdateFieldRequest>,
) -> AppResult<Json<UpdateFieldResponse>> {
    let (stage, status) = state
        .services
        .bookings
        .update_field(id, field, &request.value)
        .await?;
    Ok(Json(UpdateFieldResponse {
        stage,
        field: status,
    }))
}

/// Submit the form; every invalid field is reported at once
#[utoipa::path(
    post,
    path = "/bookings/{id}/submit",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking session ID")
    ),
    responses(
        (status = 200, description = "Booking awaits the advance payment", body = SubmitResponse),
        (status = 404, description = "Session not found"),
        (status = 422, description = "One or more fields are invalid")
    )
)]
pub async fn submit_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmitResponse>> {
    let outcome = state.services.bookings.submit(id).await?;
    let payment_note = format!(
        "Scan the {} UPI QR and pay the advance of {}{} to secure your slot.",
        state.config.whatsapp.business_name,
        state.config.booking.currency_symbol,
        outcome.quote.advance,
    );
    Ok(Json(SubmitResponse {
        stage: outcome.stage,
        booking: outcome.record,
        quote: outcome.quote,
        payment_note,
    }))
}

/// Confirm after paying the advance: composes the WhatsApp message and
/// returns the handoff URL. Delivery is never verified.
#[utoipa::path(
    post,
    path = "/bookings/{id}/confirm",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking session ID")
    ),
    responses(
        (status = 200, description = "Handoff URL ready, session discarded", body = ConfirmResponse),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Booking is not awaiting payment confirmation"),
        (status = 422, description = "A required field was cleared after submission")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ConfirmResponse>> {
    let outcome = state.services.bookings.confirm(id).await?;
    Ok(Json(ConfirmResponse {
        booking: outcome.record,
        quote: outcome.quote,
        message: outcome.ticket.message,
        handoff_url: outcome.ticket.handoff_url,
        delivery: outcome.ticket.delivery,
    }))
}

/// Discard a booking session
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking session ID")
    ),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn discard_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.bookings.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
