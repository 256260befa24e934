//! Contact form endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Contact form payload
#[derive(Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    pub status: String,
    pub note: String,
}

/// Receive a contact message
#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message received", body = ContactResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn send_message(
    State(_state): State<crate::AppState>,
    Json(request): Json<ContactRequest>,
) -> AppResult<Json<ContactResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::info!(name = %request.name, email = %request.email, "Contact message received");

    Ok(Json(ContactResponse {
        status: "received".to_string(),
        note: "Thank you for your message! We will get back to you soon.".to_string(),
    }))
}
