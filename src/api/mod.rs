//! API handlers for GlowOnCall REST endpoints

pub mod bookings;
pub mod catalog;
pub mod contact;
pub mod health;
pub mod location;
pub mod openapi;
pub mod referral;
