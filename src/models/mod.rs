//! Data models for GlowOnCall

pub mod booking;
pub mod service;

// Re-export commonly used types
pub use booking::{BookingDraft, BookingField, BookingRecord, BookingSession, BookingStage, PaymentQuote};
pub use service::ServiceOffering;
