//! Booking flow orchestration
//!
//! Owns the session lifecycle: field-by-field edits with inline
//! validation, whole-form submission into the advance-payment stage, and
//! the confirm step that composes the WhatsApp message and discards the
//! session. Advance amounts are recomputed at every step, never stored.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingField, BookingRecord, BookingSession, BookingStage, PaymentQuote},
    services::{
        pricing::PricingService,
        validation::ValidationService,
        whatsapp::{HandoffTicket, WhatsappService},
    },
    store::SessionStore,
};

/// Inline verdict for one form field
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldStatus {
    pub field: BookingField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub stage: BookingStage,
    pub record: BookingRecord,
    pub quote: PaymentQuote,
}

/// Result of a confirmed booking, after the session is discarded
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub record: BookingRecord,
    pub quote: PaymentQuote,
    pub ticket: HandoffTicket,
}

#[derive(Clone)]
pub struct BookingsService {
    store: SessionStore,
    validation: ValidationService,
    pricing: PricingService,
    whatsapp: WhatsappService,
}

impl BookingsService {
    pub fn new(
        store: SessionStore,
        validation: ValidationService,
        pricing: PricingService,
        whatsapp: WhatsappService,
    ) -> Self {
        Self {
            store,
            validation,
            pricing,
            whatsapp,
        }
    }

    /// Earliest bookable date, surfaced so forms can set their date floor
    pub fn min_date(&self) -> NaiveDate {
        ValidationService::today()
    }

    pub async fn create(&self) -> BookingSession {
        let session = self.store.create().await;
        tracing::debug!(session = %session.id, "Booking session created");
        session
    }

    pub async fn get(&self, id: Uuid) -> AppResult<(BookingSession, Vec<FieldStatus>)> {
        let session = self.store.get(id).await?;
        let fields = self.field_statuses(&session);
        Ok((session, fields))
    }

    /// Set one field and validate it, the way forms validate on blur
    pub async fn update_field(
        &self,
        id: Uuid,
        field: BookingField,
        value: &str,
    ) -> AppResult<(BookingStage, FieldStatus)> {
        let validation = self.validation.clone();
        self.store
            .with_session(id, move |session| {
                if !session.stage.is_editable() {
                    return Err(AppError::Conflict(
                        "Booking is already confirmed".to_string(),
                    ));
                }

                session.draft.set(field, value);

                let error = validation.field_error(&session.draft, field);
                let status = FieldStatus {
                    field,
                    value: session.draft.get(field).map(str::to_string),
                    valid: error.is_none(),
                    error,
                };

                session.stage = if session.draft.is_empty() {
                    BookingStage::Empty
                } else {
                    BookingStage::after_validation(validation.is_form_valid(&session.draft))
                };

                Ok((session.stage, status))
            })
            .await
    }

    /// Whole-form validation; on success the booking enters the
    /// advance-payment stage and a quote is derived from the catalog price
    pub async fn submit(&self, id: Uuid) -> AppResult<SubmitOutcome> {
        let validation = self.validation.clone();
        let pricing = self.pricing.clone();
        self.store
            .with_session(id, move |session| {
                if !session.stage.is_editable() {
                    return Err(AppError::Conflict(
                        "Booking is already confirmed".to_string(),
                    ));
                }

                session.stage = BookingStage::Validating;
                let record = match validation.materialize(&session.draft) {
                    Ok(record) => record,
                    Err(e) => {
                        session.stage = BookingStage::Invalid;
                        return Err(e);
                    }
                };
                session.stage = BookingStage::Valid;

                let price = record
                    .price
                    .ok_or_else(|| AppError::Internal("Validated booking has no price".to_string()))?;
                let quote = pricing.quote(price);

                session.stage = BookingStage::PaymentPending;
                tracing::info!(session = %session.id, advance = quote.advance, "Booking awaiting advance payment");

                Ok(SubmitOutcome {
                    stage: session.stage,
                    record,
                    quote,
                })
            })
            .await
    }

    /// Confirm after the (unverified) advance payment: compose the
    /// message, build the handoff URL and discard the session
    pub async fn confirm(&self, id: Uuid) -> AppResult<ConfirmOutcome> {
        let validation = self.validation.clone();
        let pricing = self.pricing.clone();
        let whatsapp = self.whatsapp.clone();

        let outcome = self
            .store
            .with_session(id, move |session| {
                if session.stage != BookingStage::PaymentPending {
                    return Err(AppError::Conflict(
                        "Booking is not awaiting payment confirmation".to_string(),
                    ));
                }

                // The draft was valid at submit time; re-materialize so any
                // field cleared since then surfaces as a validation error
                let record = validation.materialize(&session.draft)?;
                let price = record
                    .price
                    .ok_or_else(|| AppError::Internal("Validated booking has no price".to_string()))?;
                let quote = pricing.quote(price);
                let ticket = whatsapp.handoff(&record, Some(&quote))?;

                session.stage = BookingStage::Confirmed;

                Ok(ConfirmOutcome {
                    record,
                    quote,
                    ticket,
                })
            })
            .await?;

        // One visit, one booking: the record does not outlive the handoff
        self.store.remove(id).await?;
        tracing::info!(session = %id, "Booking confirmed and session discarded");
        Ok(outcome)
    }

    /// Reset: throw the draft away
    pub async fn discard(&self, id: Uuid) -> AppResult<()> {
        self.store.remove(id).await?;
        tracing::debug!(session = %id, "Booking session discarded");
        Ok(())
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }

    fn field_statuses(&self, session: &BookingSession) -> Vec<FieldStatus> {
        BookingField::ALL
            .iter()
            .map(|field| {
                let error = self.validation.field_error(&session.draft, *field);
                FieldStatus {
                    field: *field,
                    value: session.draft.get(*field).map(str::to_string),
                    valid: error.is_none(),
                    error,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BookingConfig, WhatsappConfig};
    use crate::models::service::ServiceOffering;
    use crate::services::catalog::CatalogService;
    use crate::services::whatsapp::DeliveryStatus;
    use crate::store::Store;
    use chrono::Duration;

    fn service() -> BookingsService {
        let catalog = CatalogService::new(vec![ServiceOffering::new(
            "haircut",
            "Haircut",
            499,
            45,
            "Cut and style",
        )]);
        BookingsService::new(
            Store::new().sessions,
            ValidationService::new(catalog),
            PricingService::new(40),
            WhatsappService::new(WhatsappConfig::default(), BookingConfig::default()),
        )
    }

    fn future_date() -> String {
        (ValidationService::today() + Duration::days(7))
            .format("%Y-%m-%d")
            .to_string()
    }

    async fn fill_valid(svc: &BookingsService, id: Uuid) {
        let values = [
            (BookingField::Name, "Jane Doe".to_string()),
            (BookingField::Phone, "9876543210".to_string()),
            (BookingField::Service, "haircut".to_string()),
            (BookingField::Date, future_date()),
            (BookingField::Time, "10:00".to_string()),
            (BookingField::Address, "123 Main Street".to_string()),
        ];
        for (field, value) in values {
            svc.update_field(id, field, &value).await.unwrap();
        }
    }

    #[tokio::test]
    async fn session_starts_empty() {
        let svc = service();
        let session = svc.create().await;
        assert_eq!(session.stage, BookingStage::Empty);

        let (_, fields) = svc.get(session.id).await.unwrap();
        assert_eq!(fields.len(), BookingField::ALL.len());
        // Optional location is valid while unset; required fields are not
        assert!(fields.iter().find(|f| f.field == BookingField::Location).unwrap().valid);
        assert!(!fields.iter().find(|f| f.field == BookingField::Name).unwrap().valid);
    }

    #[tokio::test]
    async fn partial_form_is_invalid_but_field_can_be_valid() {
        let svc = service();
        let session = svc.create().await;

        let (stage, status) = svc
            .update_field(session.id, BookingField::Name, "Jane Doe")
            .await
            .unwrap();
        assert_eq!(stage, BookingStage::Invalid);
        assert!(status.valid);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn full_walk_to_confirmed() {
        let svc = service();
        let session = svc.create().await;
        fill_valid(&svc, session.id).await;

        let (session_after, _) = svc.get(session.id).await.unwrap();
        assert_eq!(session_after.stage, BookingStage::Valid);

        let submitted = svc.submit(session.id).await.unwrap();
        assert_eq!(submitted.stage, BookingStage::PaymentPending);
        assert_eq!(submitted.quote.total, 499);
        assert_eq!(submitted.quote.advance, 200);
        assert_eq!(submitted.quote.remaining, 299);

        let outcome = svc.confirm(session.id).await.unwrap();
        assert_eq!(outcome.ticket.delivery, DeliveryStatus::Unverified);
        assert!(outcome.ticket.message.contains("Name: Jane Doe"));
        assert!(outcome.ticket.message.contains("Advance (40%): ₹200"));

        // Session is gone once the handoff fires
        assert!(svc.get(session.id).await.is_err());
    }

    #[tokio::test]
    async fn submit_reports_every_invalid_field() {
        let svc = service();
        let session = svc.create().await;
        svc.update_field(session.id, BookingField::Phone, "98765")
            .await
            .unwrap();

        let err = svc.submit(session.id).await.unwrap_err();
        match err {
            AppError::FormValidation(issues) => {
                assert_eq!(issues.len(), 6);
                assert!(issues.iter().any(|i| i.field == "phone"));
            }
            other => panic!("Expected form validation error, got {:?}", other),
        }

        let (session_after, _) = svc.get(session.id).await.unwrap();
        assert_eq!(session_after.stage, BookingStage::Invalid);
    }

    #[tokio::test]
    async fn editing_after_submit_demotes_the_stage() {
        let svc = service();
        let session = svc.create().await;
        fill_valid(&svc, session.id).await;
        svc.submit(session.id).await.unwrap();

        let (stage, _) = svc
            .update_field(session.id, BookingField::Time, "11:30")
            .await
            .unwrap();
        assert_eq!(stage, BookingStage::Valid);

        // The quote is stale; confirmation now requires a fresh submit
        assert!(matches!(
            svc.confirm(session.id).await,
            Err(AppError::Conflict(_))
        ));

        svc.submit(session.id).await.unwrap();
        assert!(svc.confirm(session.id).await.is_ok());
    }

    #[tokio::test]
    async fn confirm_requires_payment_pending() {
        let svc = service();
        let session = svc.create().await;
        assert!(matches!(
            svc.confirm(session.id).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn discard_drops_the_session() {
        let svc = service();
        let session = svc.create().await;
        svc.discard(session.id).await.unwrap();
        assert!(svc.get(session.id).await.is_err());
        assert!(svc.discard(session.id).await.is_err());
    }
}
