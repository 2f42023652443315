//! Repositories for store operations

pub mod apartment;
pub mod booking;
pub mod user;

pub use apartment::ApartmentRepository;
pub use booking::BookingRepository;
pub use user::UserRepository;
