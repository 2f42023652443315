//! Demo seed data for local development

use anyhow::Result;
use tracing::info;

use crate::models::{BookingStatus, NewApartment, NewUser, Role};
use crate::state::AppState;

/// Seed the store with the demo accounts, apartments, and booking history
///
/// Only runs against an empty identity store. State is not persisted, so a
/// restart seeds again.
pub async fn seed_demo_data(state: &AppState) -> Result<()> {
    if state.user_repository.count().await > 0 {
        return Ok(());
    }

    let resident = state
        .user_repository
        .create(
            &NewUser {
                email: "resident@example.com".to_string(),
                password: "password123".to_string(),
                name: "John Resident".to_string(),
            },
            Role::Resident,
        )
        .await?;

    state
        .user_repository
        .create(
            &NewUser {
                email: "admin@example.com".to_string(),
                password: "admin123".to_string(),
                name: "Jane Admin".to_string(),
            },
            Role::Admin,
        )
        .await?;

    let units = [
        ("Tower A", "A-501", 5, 3, 2, 2500.0),
        ("Tower B", "B-302", 3, 2, 1, 1800.0),
        ("Tower A", "A-801", 8, 3, 2, 3200.0),
        ("Tower C", "C-601", 6, 4, 3, 4000.0),
        ("Tower B", "B-201", 2, 2, 1, 1600.0),
        ("Tower C", "C-702", 7, 3, 2, 2900.0),
    ];

    for (tower, unit, floor, bedrooms, bathrooms, price) in units {
        state
            .apartment_repository
            .create(&NewApartment {
                tower: tower.to_string(),
                unit: unit.to_string(),
                floor,
                bedrooms,
                bathrooms,
                price,
            })
            .await;
    }

    // Booking history for the demo resident
    let approved = state.booking_repository.create(resident.id, 1).await;
    state
        .booking_repository
        .set_status(approved.id, BookingStatus::Approved)
        .await?;

    state.booking_repository.create(resident.id, 2).await;

    let declined = state.booking_repository.create(resident.id, 4).await;
    state
        .booking_repository
        .set_status(declined.id, BookingStatus::Declined)
        .await?;

    info!(
        "Seeded demo data: {} users, {} apartments, {} bookings",
        state.user_repository.count().await,
        state.apartment_repository.count().await,
        state.booking_repository.count().await
    );

    Ok(())
}
