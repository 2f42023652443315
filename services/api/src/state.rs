//! Application state shared across handlers

use crate::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::repositories::{ApartmentRepository, BookingRepository, UserRepository};
use crate::session::SessionManager;
use crate::stats::StatsService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub apartment_repository: ApartmentRepository,
    pub booking_repository: BookingRepository,
    pub session_manager: SessionManager,
    pub stats_service: StatsService,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Construct a fresh state over empty collections
    ///
    /// Every call yields independent collections, so each test can build
    /// its own isolated instance.
    pub fn new() -> Self {
        let user_repository = UserRepository::new();
        let apartment_repository = ApartmentRepository::new();
        let booking_repository = BookingRepository::new();
        let stats_service =
            StatsService::new(apartment_repository.clone(), booking_repository.clone());

        Self {
            user_repository,
            apartment_repository,
            booking_repository,
            session_manager: SessionManager::new(),
            stats_service,
            rate_limiter: RateLimiter::new(RateLimiterConfig::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
