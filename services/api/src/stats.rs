//! Occupancy and revenue statistics

use serde::Serialize;

use crate::models::BookingStatus;
use crate::repositories::{ApartmentRepository, BookingRepository};

/// Aggregate dashboard statistics
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_units: usize,
    pub occupied_units: usize,
    pub occupancy_rate: f64,
    pub pending_bookings: usize,
    pub total_revenue: f64,
    pub total_bookings: usize,
}

/// Read-side projection over the apartment catalog and the booking ledger
///
/// Statistics are recomputed from fresh snapshots on every call, never
/// cached.
#[derive(Clone)]
pub struct StatsService {
    apartments: ApartmentRepository,
    bookings: BookingRepository,
}

impl StatsService {
    /// Create a new stats service
    pub fn new(apartments: ApartmentRepository, bookings: BookingRepository) -> Self {
        Self {
            apartments,
            bookings,
        }
    }

    /// Compute the current statistics
    pub async fn compute(&self) -> DashboardStats {
        let apartments = self.apartments.snapshot().await;
        let bookings = self.bookings.snapshot().await;

        let total_units = apartments.len();
        let occupied_units = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved)
            .count();
        let pending_bookings = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count();

        // An approved booking whose apartment is missing contributes nothing
        let total_revenue: f64 = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved)
            .map(|b| {
                apartments
                    .iter()
                    .find(|a| a.id == b.apartment_id)
                    .map(|a| a.price)
                    .unwrap_or(0.0)
            })
            .sum();

        let occupancy_rate = if total_units > 0 {
            occupied_units as f64 / total_units as f64 * 100.0
        } else {
            0.0
        };

        DashboardStats {
            total_units,
            occupied_units,
            occupancy_rate,
            pending_bookings,
            total_revenue,
            total_bookings: bookings.len(),
        }
    }
}
