//! ResidentialHub service models

pub mod apartment;
pub mod booking;
pub mod session;
pub mod user;

// Re-export for convenience
pub use apartment::{Apartment, ApartmentQuery, ApartmentStatus, NewApartment};
pub use booking::{Booking, BookingQuery, BookingStatus, NewBooking};
pub use session::Session;
pub use user::{LoginCredentials, NewUser, Role, User, UserResponse};
