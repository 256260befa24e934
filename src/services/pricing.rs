//! Advance/remaining pricing
//!
//! The advance fraction is a configurable percentage of the service
//! price, rounded half-up in integer arithmetic. Amounts are derived on
//! demand and never stored on a booking.

use crate::models::booking::PaymentQuote;

#[derive(Clone)]
pub struct PricingService {
    advance_percent: u8,
}

impl PricingService {
    pub fn new(advance_percent: u8) -> Self {
        Self {
            advance_percent: advance_percent.min(100),
        }
    }

    pub fn advance_percent(&self) -> u8 {
        self.advance_percent
    }

    /// Split a total into (advance, remaining); advance + remaining == total
    pub fn quote(&self, total: u32) -> PaymentQuote {
        let advance = ((u64::from(total) * u64::from(self.advance_percent) + 50) / 100) as u32;
        PaymentQuote {
            total,
            advance,
            remaining: total - advance,
        }
    }
}
