//! ResidentialHub service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    middleware,
    routing::{get, post, put},
};
use common::error::StoreError;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{admin_middleware, auth_middleware, bearer_token},
    models::{
        Apartment, ApartmentQuery, Booking, BookingQuery, BookingStatus, LoginCredentials,
        NewApartment, NewBooking, NewUser, Role, Session, UserResponse,
    },
    state::AppState,
    stats::DashboardStats,
    validation::{validate_email, validate_name, validate_password},
};

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response for a successful registration
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Create the router for the ResidentialHub service
pub fn create_router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/apartments", post(create_apartment))
        .route("/bookings/:id/approve", put(approve_booking))
        .route("/bookings/:id/decline", put(decline_booking))
        .route("/admin/stats", get(get_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/register", post(register))
        .route("/apartments", get(list_apartments))
        .route("/apartments/:id", get(get_apartment));

    Router::new()
        .nest(
            "/api",
            public_routes.merge(authenticated_routes).merge(admin_routes),
        )
        .fallback(fallback)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "residential-hub"
    }))
}

/// Login endpoint for residents and admins
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> ApiResult<Json<LoginResponse>> {
    info!("Login attempt for {}", payload.email);

    if !state.rate_limiter.check(&payload.email).await {
        return Err(ApiError::TooManyAttempts);
    }

    let Some(user) = state.user_repository.find_by_email(&payload.email).await else {
        state.rate_limiter.record_failure(&payload.email).await;
        return Err(ApiError::InvalidCredentials);
    };

    let verified = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !verified {
        state.rate_limiter.record_failure(&payload.email).await;
        return Err(ApiError::InvalidCredentials);
    }

    state.rate_limiter.record_success(&payload.email).await;
    let session = state.session_manager.create_session(&user).await;

    Ok(Json(LoginResponse {
        token: session.token,
        user: UserResponse::from(&user),
    }))
}

/// Logout endpoint
///
/// Revoking an unknown or already-revoked token is a no-op; logout never
/// fails.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.session_manager.delete_session(token).await;
    }

    Json(json!({"message": "Logged out successfully"}))
}

/// Register endpoint for new residents
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;
    validate_name(&payload.name).map_err(ApiError::BadRequest)?;

    let user = state
        .user_repository
        .create(&payload, Role::Resident)
        .await
        .map_err(|e| match e {
            StoreError::DuplicateKey(_) => ApiError::EmailAlreadyRegistered,
            other => {
                error!("Failed to create user: {}", other);
                ApiError::from(other)
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Get all apartments, optionally filtered by tower and bedroom count
pub async fn list_apartments(
    State(state): State<AppState>,
    Query(query): Query<ApartmentQuery>,
) -> Json<Vec<Apartment>> {
    Json(state.apartment_repository.list(&query).await)
}

/// Get specific apartment details
pub async fn get_apartment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Apartment>> {
    let apartment = state
        .apartment_repository
        .find_by_id(id)
        .await
        .ok_or(ApiError::NotFound("Apartment"))?;

    Ok(Json(apartment))
}

/// Create new apartment (admin only)
pub async fn create_apartment(
    State(state): State<AppState>,
    Json(payload): Json<NewApartment>,
) -> (StatusCode, Json<Apartment>) {
    let apartment = state.apartment_repository.create(&payload).await;

    (StatusCode::CREATED, Json(apartment))
}

/// Get bookings for the current user, or all bookings for an admin
///
/// Residents only ever see their own requests; the scoped view is not a
/// permission failure. The status filter applies to the admin view only.
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<BookingQuery>,
) -> Json<Vec<Booking>> {
    let bookings = if session.role == Role::Admin {
        state
            .booking_repository
            .list_all(query.status.as_deref())
            .await
    } else {
        state.booking_repository.list_by_user(session.user_id).await
    };

    Json(bookings)
}

/// Create new booking request
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<NewBooking>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    // The target unit must exist; nothing is appended otherwise
    state
        .apartment_repository
        .find_by_id(payload.apartment_id)
        .await
        .ok_or(ApiError::NotFound("Apartment"))?;

    let booking = state
        .booking_repository
        .create(session.user_id, payload.apartment_id)
        .await;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve booking (admin only)
pub async fn approve_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Booking>> {
    transition_booking(&state, id, BookingStatus::Approved).await
}

/// Decline booking (admin only)
pub async fn decline_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Booking>> {
    transition_booking(&state, id, BookingStatus::Declined).await
}

/// Overwrite a booking's status
async fn transition_booking(
    state: &AppState,
    id: i64,
    status: BookingStatus,
) -> ApiResult<Json<Booking>> {
    let booking = state
        .booking_repository
        .set_status(id, status)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Booking"),
            other => ApiError::from(other),
        })?;

    Ok(Json(booking))
}

/// Get dashboard statistics (admin only)
pub async fn get_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.stats_service.compute().await)
}

/// Fallback for unmatched routes
pub async fn fallback() -> ApiError {
    ApiError::NotFound("Resource")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::require_role;

    fn credentials(email: &str, password: &str) -> Json<LoginCredentials> {
        Json(LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn registration(email: &str, password: &str, name: &str) -> Json<NewUser> {
        Json(NewUser {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        })
    }

    async fn state_with_catalog() -> AppState {
        let state = AppState::new();
        for (tower, unit, price) in [("Tower A", "A-501", 2500.0), ("Tower B", "B-302", 1800.0)] {
            state
                .apartment_repository
                .create(&NewApartment {
                    tower: tower.to_string(),
                    unit: unit.to_string(),
                    floor: 3,
                    bedrooms: 2,
                    bathrooms: 1,
                    price,
                })
                .await;
        }
        state
    }

    async fn admin_session(state: &AppState) -> Session {
        let admin = state
            .user_repository
            .create(
                &NewUser {
                    email: "admin@example.com".to_string(),
                    password: "admin123".to_string(),
                    name: "Jane Admin".to_string(),
                },
                Role::Admin,
            )
            .await
            .unwrap();
        state.session_manager.create_session(&admin).await
    }

    #[tokio::test]
    async fn register_login_book_approve_stats_flow() {
        let state = state_with_catalog().await;

        // Register and log in as a resident
        let (status, Json(registered)) = register(
            State(state.clone()),
            registration("alice@x.com", "pw1secret", "Alice"),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(login_response) = login(State(state.clone()), credentials("alice@x.com", "pw1secret"))
            .await
            .unwrap();
        assert_eq!(login_response.user.id, registered.user_id);
        assert_eq!(login_response.user.role, Role::Resident);

        let session = state
            .session_manager
            .get_session(&login_response.token)
            .await
            .unwrap();
        assert_eq!(session.user_id, registered.user_id);

        // Request unit 2
        let (status, Json(booking)) = create_booking(
            State(state.clone()),
            Extension(session.clone()),
            Json(NewBooking { apartment_id: 2 }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.user_id, registered.user_id);

        // Admin sees the pending request
        let admin = admin_session(&state).await;
        let Json(pending) = list_bookings(
            State(state.clone()),
            Extension(admin.clone()),
            Query(BookingQuery {
                status: Some("pending".to_string()),
            }),
        )
        .await;
        assert!(pending.iter().any(|b| b.id == booking.id));

        // Approve it and watch the stats move
        let Json(before) = get_stats(State(state.clone())).await;
        let Json(approved) = approve_booking(State(state.clone()), Path(booking.id))
            .await
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let Json(after) = get_stats(State(state.clone())).await;
        assert_eq!(after.occupied_units, before.occupied_units + 1);
        assert_eq!(after.total_revenue, before.total_revenue + 1800.0);
    }

    #[tokio::test]
    async fn login_with_an_unregistered_email_creates_no_session() {
        let state = AppState::new();

        let result = login(State(state.clone()), credentials("ghost@x.com", "pw")).await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
        assert_eq!(state.session_manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn login_with_a_wrong_password_is_rejected() {
        let state = AppState::new();
        register(
            State(state.clone()),
            registration("alice@x.com", "pw1secret", "Alice"),
        )
        .await
        .unwrap();

        let result = login(State(state.clone()), credentials("alice@x.com", "nope")).await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn register_rejects_a_taken_email() {
        let state = AppState::new();
        register(
            State(state.clone()),
            registration("alice@x.com", "pw1secret", "Alice"),
        )
        .await
        .unwrap();

        let result = register(
            State(state.clone()),
            registration("alice@x.com", "other", "Impostor"),
        )
        .await;

        assert!(matches!(result, Err(ApiError::EmailAlreadyRegistered)));
        assert_eq!(state.user_repository.count().await, 1);
    }

    #[tokio::test]
    async fn a_resident_session_never_passes_the_admin_gate() {
        let state = AppState::new();
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
            .await
            .unwrap();
        let session = state.session_manager.create_session(&resident).await;

        let result = require_role(&session, Role::Admin);

        assert!(matches!(result, Err(ApiError::Forbidden)));
        assert_eq!(state.apartment_repository.count().await, 0);
    }

    #[tokio::test]
    async fn residents_see_only_their_own_bookings() {
        let state = state_with_catalog().await;
        let alice = state
            .user_repository
            .create(
                &NewUser {
                    email: "alice@x.com".to_string(),
                    password: "pw1secret".to_string(),
                    name: "Alice".to_string(),
                },
                Role::Resident,
            )
            .await
            .unwrap();
        let bob = state
            .user_repository
            .create(
                &NewUser {
                    email: "bob@x.com".to_string(),
                    password: "pw2secret".to_string(),
                    name: "Bob".to_string(),
                },
                Role::Resident,
            )
            .await
            .unwrap();

        state.booking_repository.create(alice.id, 1).await;
        state.booking_repository.create(bob.id, 2).await;

        let alice_session = state.session_manager.create_session(&alice).await;
        let Json(bookings) = list_bookings(
            State(state.clone()),
            Extension(alice_session),
            Query(BookingQuery::default()),
        )
        .await;

        assert_eq!(bookings.len(), 1);
        assert!(bookings.iter().all(|b| b.user_id == alice.id));

        let admin = admin_session(&state).await;
        let Json(all) = list_bookings(
            State(state.clone()),
            Extension(admin),
            Query(BookingQuery::default()),
        )
        .await;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn booking_an_unknown_unit_fails_and_appends_nothing() {
        let state = state_with_catalog().await;
        let admin = admin_session(&state).await;

        let result = create_booking(
            State(state.clone()),
            Extension(admin),
            Json(NewBooking { apartment_id: 99 }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::NotFound("Apartment"))));
        assert_eq!(state.booking_repository.count().await, 0);
    }

    #[tokio::test]
    async fn transitioning_an_unknown_booking_fails() {
        let state = AppState::new();

        let result = approve_booking(State(state.clone()), Path(42)).await;

        assert!(matches!(result, Err(ApiError::NotFound("Booking"))));
    }

    #[tokio::test]
    async fn logout_revokes_the_session_and_never_fails() {
        let state = state_with_catalog().await;
        let admin = admin_session(&state).await;

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", admin.token).parse().unwrap(),
        );

        logout(State(state.clone()), headers.clone()).await;
        assert!(state.session_manager.get_session(&admin.token).await.is_none());

        // Second logout with the now-revoked token is a quiet no-op
        logout(State(state.clone()), headers).await;
        // And so is a logout without any token at all
        logout(State(state.clone()), HeaderMap::new()).await;
    }
}
