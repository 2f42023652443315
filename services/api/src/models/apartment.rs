//! Apartment model and related functionality

use serde::{Deserialize, Serialize};

/// Occupancy status of an apartment
///
/// Booking approval does not transition a unit's status; `available` is the
/// only value ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentStatus {
    Available,
}

/// Apartment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    pub id: i64,
    pub tower: String,
    pub unit: String,
    pub floor: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub status: ApartmentStatus,
}

/// New apartment creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewApartment {
    pub tower: String,
    pub unit: String,
    pub floor: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
}

/// Filters for apartment listings
///
/// `bedrooms` arrives as a raw query string; a value that does not parse
/// as an integer is treated as if the filter were absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApartmentQuery {
    pub tower: Option<String>,
    pub bedrooms: Option<String>,
}
