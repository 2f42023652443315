//! Apartment repository for inventory storage

use common::store::Table;
use tracing::info;

use crate::models::{Apartment, ApartmentQuery, ApartmentStatus, NewApartment};

/// Apartment repository
#[derive(Clone)]
pub struct ApartmentRepository {
    apartments: Table<Apartment>,
}

impl ApartmentRepository {
    /// Create a new apartment repository
    pub fn new() -> Self {
        Self {
            apartments: Table::new(),
        }
    }

    /// List apartments matching the given filters
    ///
    /// The tower filter is an exact string match. The bedrooms filter is
    /// parsed leniently: a value that is not an integer is treated as
    /// absent, not rejected.
    pub async fn list(&self, query: &ApartmentQuery) -> Vec<Apartment> {
        let bedrooms = query.bedrooms.as_deref().and_then(|b| b.parse::<i32>().ok());

        self.apartments
            .read()
            .await
            .iter()
            .filter(|a| query.tower.as_deref().is_none_or(|t| a.tower == t))
            .filter(|a| bedrooms.is_none_or(|b| a.bedrooms == b))
            .cloned()
            .collect()
    }

    /// Find an apartment by id
    pub async fn find_by_id(&self, id: i64) -> Option<Apartment> {
        self.apartments
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Create a new apartment
    ///
    /// Ids are assigned as the current maximum plus one, starting at 1 for
    /// an empty catalog. Status is always `available` on creation.
    pub async fn create(&self, new_apartment: &NewApartment) -> Apartment {
        let mut apartments = self.apartments.write().await;

        let id = apartments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let apartment = Apartment {
            id,
            tower: new_apartment.tower.clone(),
            unit: new_apartment.unit.clone(),
            floor: new_apartment.floor,
            bedrooms: new_apartment.bedrooms,
            bathrooms: new_apartment.bathrooms,
            price: new_apartment.price,
            status: ApartmentStatus::Available,
        };

        info!("Creating apartment {} in {}", apartment.unit, apartment.tower);
        apartments.push(apartment.clone());

        apartment
    }

    /// Copy of the full catalog at this instant
    pub async fn snapshot(&self) -> Vec<Apartment> {
        self.apartments.snapshot().await
    }

    /// Number of apartments in the catalog
    pub async fn count(&self) -> usize {
        self.apartments.len().await
    }
}
