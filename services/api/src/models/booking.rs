//! Booking model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Declined,
}

impl BookingStatus {
    /// Wire representation, used for exact-match status filtering
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Declined => "declined",
        }
    }
}

/// Booking request entity
///
/// Requests are never deleted; only their status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub apartment_id: i64,
    pub status: BookingStatus,
    pub request_date: DateTime<Utc>,
}

/// New booking creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub apartment_id: i64,
}

/// Filters for booking listings
///
/// The status filter only applies to the admin view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    pub status: Option<String>,
}
