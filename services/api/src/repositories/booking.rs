//! Booking repository for occupancy request storage

use chrono::Utc;
use common::{
    error::{StoreError, StoreResult},
    store::Table,
};
use tracing::info;

use crate::models::{Booking, BookingStatus};

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    bookings: Table<Booking>,
}

impl BookingRepository {
    /// Create a new booking repository
    pub fn new() -> Self {
        Self {
            bookings: Table::new(),
        }
    }

    /// List all bookings, optionally filtered by exact status match
    ///
    /// The filter compares the raw query value against the wire form of the
    /// status; an unknown value matches nothing.
    pub async fn list_all(&self, status: Option<&str>) -> Vec<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| status.is_none_or(|s| b.status.as_str() == s))
            .cloned()
            .collect()
    }

    /// List bookings created by the given user
    pub async fn list_by_user(&self, user_id: i64) -> Vec<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Create a new pending booking for a user
    ///
    /// The target apartment must already have been resolved against the
    /// catalog by the caller. Ids are assigned as the current maximum plus
    /// one, starting at 1 for an empty ledger.
    pub async fn create(&self, user_id: i64, apartment_id: i64) -> Booking {
        let mut bookings = self.bookings.write().await;

        let id = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let booking = Booking {
            id,
            user_id,
            apartment_id,
            status: BookingStatus::Pending,
            request_date: Utc::now(),
        };

        info!("Creating booking {} for user {}", booking.id, user_id);
        bookings.push(booking.clone());

        booking
    }

    /// Overwrite the status of a booking
    ///
    /// The transition is unguarded: any current status may be overwritten
    /// with any target status, so repeated approve or decline calls are
    /// idempotent-by-overwrite.
    pub async fn set_status(&self, id: i64, status: BookingStatus) -> StoreResult<Booking> {
        let mut bookings = self.bookings.write().await;

        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;

        booking.status = status;
        info!("Booking {} set to {}", id, status.as_str());

        Ok(booking.clone())
    }

    /// Copy of the full ledger at this instant
    pub async fn snapshot(&self) -> Vec<Booking> {
        self.bookings.snapshot().await
    }

    /// Number of bookings in the ledger
    pub async fn count(&self) -> usize {
        self.bookings.len().await
    }
}
