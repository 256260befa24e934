//! Refer & Earn endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ReferralResponse {
    pub code: String,
    pub share_text: String,
    pub share_url: String,
    pub credit_amount: u32,
}

/// Referral code and ready-to-share text
#[utoipa::path(
    get,
    path = "/referral",
    tag = "referral",
    responses(
        (status = 200, description = "Referral share material", body = ReferralResponse)
    )
)]
pub async fn get_referral(State(state): State<crate::AppState>) -> Json<ReferralResponse> {
    let referral = &state.config.referral;
    let currency = &state.config.booking.currency_symbol;
    let business = &state.config.whatsapp.business_name;

    let share_text = format!(
        "Join {} for premium beauty services at home! Use my referral code {} and we both get {}{} credit. Download now: {}",
        business, referral.code, currency, referral.credit_amount, referral.site_url,
    );

    Json(ReferralResponse {
        code: referral.code.clone(),
        share_text,
        share_url: referral.site_url.clone(),
        credit_amount: referral.credit_amount,
    })
}
