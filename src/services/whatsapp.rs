//! WhatsApp message composition and handoff
//!
//! Delivery is a one-way deeplink: the composed text is percent-encoded
//! into a `wa.me` URL which the customer's device opens. Nothing is
//! awaited and nothing confirms delivery, so every ticket carries an
//! explicit `unverified` status.

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::{
    config::{BookingConfig, WhatsappConfig},
    error::{AppError, AppResult},
    models::booking::{BookingRecord, PaymentQuote},
};

/// Delivery state of a handoff. The external system never acknowledges,
/// so `unverified` is the only reachable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Unverified,
}

/// Outcome of a handoff: the message and the URL that carries it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HandoffTicket {
    pub message: String,
    pub handoff_url: String,
    pub delivery: DeliveryStatus,
}

#[derive(Clone)]
pub struct WhatsappService {
    config: WhatsappConfig,
    booking: BookingConfig,
}

impl WhatsappService {
    pub fn new(config: WhatsappConfig, booking: BookingConfig) -> Self {
        Self { config, booking }
    }

    /// Render the booking as one fixed-order text block.
    ///
    /// Field order never changes: Name, Phone, Service, Date, Time,
    /// Address. The maps line appears only when a location was shared;
    /// the advance/balance lines only when a quote accompanies the
    /// booking.
    pub fn compose(&self, record: &BookingRecord, quote: Option<&PaymentQuote>) -> String {
        let mut message = format!(
            "Hello! I'd like to book a {} service.\n\n\
             Name: {}\n\
             Phone: {}\n\
             Service: {}\n\
             Date: {}\n\
             Time: {}\n\
             Address: {}",
            self.config.business_name,
            record.name,
            record.phone,
            record.service,
            record.date.format("%d-%m-%Y"),
            record.time,
            record.address,
        );

        if let Some(location) = &record.location {
            message.push_str(&format!("\nGoogle Maps: {}", location));
        }

        if let Some(quote) = quote {
            message.push_str(&format!(
                "\nAdvance ({}%): {}{}\nBalance due: {}{}",
                self.booking.advance_percent,
                self.booking.currency_symbol,
                quote.advance,
                self.booking.currency_symbol,
                quote.remaining,
            ));
        }

        message.push_str("\n\nPlease confirm my appointment. Thank you!");
        message
    }

    /// Build the deeplink carrying the message as a query component
    pub fn handoff_url(&self, message: &str) -> AppResult<Url> {
        let base = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.destination
        );
        let mut url = Url::parse(&base)
            .map_err(|e| AppError::Internal(format!("Invalid WhatsApp base URL: {}", e)))?;
        url.query_pairs_mut().append_pair("text", message);
        Ok(url)
    }

    /// Compose and hand off in one step; fire-and-forget by design
    pub fn handoff(
        &self,
        record: &BookingRecord,
        quote: Option<&PaymentQuote>,
    ) -> AppResult<HandoffTicket> {
        let message = self.compose(record, quote);
        let url = self.handoff_url(&message)?;
        tracing::info!(destination = %self.config.destination, "Booking handed off to WhatsApp");
        Ok(HandoffTicket {
            message,
            handoff_url: url.into(),
            delivery: DeliveryStatus::Unverified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn service() -> WhatsappService {
        WhatsappService::new(WhatsappConfig::default(), BookingConfig::default())
    }

    fn record() -> BookingRecord {
        BookingRecord {
            name: "Jane Doe".to_string(),
            phone: "9876543210".to_string(),
            service: "Haircut".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            time: "10:00".to_string(),
            address: "123 Main Street".to_string(),
            location: None,
            price: Some(499),
        }
    }

    #[test]
    fn message_fields_in_fixed_order() {
        let message = service().compose(&record(), None);
        let positions: Vec<usize> = [
            "Name: Jane Doe",
            "Phone: 9876543210",
            "Service: Haircut",
            "Date: 24-12-2025",
            "Time: 10:00",
            "Address: 123 Main Street",
        ]
        .iter()
        .map(|needle| message.find(needle).expect(needle))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!message.contains("Google Maps"));
        assert!(!message.contains("Advance"));
    }

    #[test]
    fn optional_lines_appear_when_present() {
        let mut record = record();
        record.location = Some("https://maps.google.com/?q=12.9,77.6".to_string());
        let quote = PaymentQuote {
            total: 499,
            advance: 200,
            remaining: 299,
        };

        let message = service().compose(&record, Some(&quote));
        assert!(message.contains("Google Maps: https://maps.google.com/?q=12.9,77.6"));
        assert!(message.contains("Advance (40%): ₹200"));
        assert!(message.contains("Balance due: ₹299"));
    }

    #[test]
    fn handoff_url_round_trips_message() {
        let svc = service();
        let message = svc.compose(&record(), None);
        let url = svc.handoff_url(&message).unwrap();

        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/917892783668");
        let (_, decoded) = url.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn ticket_is_always_unverified() {
        let ticket = service().handoff(&record(), None).unwrap();
        assert_eq!(ticket.delivery, DeliveryStatus::Unverified);
        assert!(ticket.handoff_url.starts_with("https://wa.me/917892783668?text="));
    }
}
