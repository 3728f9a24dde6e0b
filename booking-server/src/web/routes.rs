//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{BookingError, BookingId, InvalidTier, Tier, Transport};
use crate::engine::{ReservationRequest, SeatChoice, add_on_fees, allocate, select_manual};
use crate::search::SearchError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trips/search", get(search_trips))
        .route("/transports/:id", get(get_transport))
        .route("/transports/:id/seats", get(seat_map))
        .route("/transports/:id/allocation", post(preview_allocation))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/:id", get(get_booking).delete(cancel_booking))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search trips between two cities on a date.
async fn search_trips(
    State(state): State<AppState>,
    query: Result<Query<SearchTripsRequest>, QueryRejection>,
) -> Result<Json<SearchTripsResponse>, AppError> {
    let Query(req) = query?;
    let date =
        NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d").map_err(|_| AppError::BadRequest {
            message: format!("Invalid date: {} (expected YYYY-MM-DD)", req.date),
        })?;

    let result = state.searcher.search(&req.from, &req.to, date).await?;

    Ok(Json(SearchTripsResponse {
        trips: result
            .trips
            .iter()
            .map(|t| TripSummary::from_transport(t))
            .collect(),
        widened_by_days: result.widened_by_days,
    }))
}

/// Summary of one transport.
async fn get_transport(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripSummary>, AppError> {
    let transport = find_transport(&state, &id)?;
    Ok(Json(TripSummary::from_transport(&transport)))
}

/// Seat map of one transport.
async fn seat_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<SeatMapRequest>, QueryRejection>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let Query(req) = query?;
    let transport = find_transport(&state, &id)?;
    let tier = req.tier.as_deref().map(Tier::parse).transpose()?;
    Ok(Json(SeatMapResponse::from_transport(&transport, tier)))
}

/// Seats the allocator would assign right now. Nothing is reserved.
async fn preview_allocation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AllocationRequest>, JsonRejection>,
) -> Result<Json<AllocationResponse>, AppError> {
    let Json(req) = body?;
    let transport = find_transport(&state, &id)?;
    let tier = Tier::parse(&req.tier)?;

    let seats = allocate(&transport, req.count, tier)?
        .into_iter()
        .filter_map(|i| transport.seat(i))
        .map(|s| s.code().to_string())
        .collect();

    Ok(Json(AllocationResponse {
        transport_id: transport.id().to_string(),
        tier: tier.as_str().to_string(),
        seats,
    }))
}

/// Book seats, either chosen by the passenger or assigned automatically.
async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let transport = find_transport(&state, &req.transport_id)?;
    let tier = Tier::parse(&req.tier)?;
    state
        .engine
        .check_party(&req.passenger_name, req.passenger_count)?;

    let (seats, choice) = match &req.seats {
        Some(codes) => (
            select_manual(&transport, codes.as_slice(), tier)?,
            SeatChoice::Manual,
        ),
        None => (
            allocate(&transport, req.passenger_count, tier)?,
            SeatChoice::Auto,
        ),
    };
    let fees = add_on_fees(transport.variant(), tier, choice, req.passenger_count);

    let request = ReservationRequest::new(
        transport,
        seats,
        req.passenger_name,
        req.passenger_count,
        tier,
    )
    .with_add_on_fees(fees);

    let booking = state.engine.reserve(request)?;
    let view = BookingView::from_booking(&booking);
    state.ledger.insert(booking).await;

    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// Active bookings, oldest first.
async fn list_bookings(State(state): State<AppState>) -> Json<BookingListResponse> {
    let bookings = state
        .ledger
        .list()
        .await
        .iter()
        .map(BookingView::from_booking)
        .collect();
    Json(BookingListResponse { bookings })
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingView>, AppError> {
    let id = BookingId::from_string(id);
    let booking = state
        .ledger
        .get(&id)
        .await
        .ok_or_else(|| BookingError::BookingNotFound(id.clone()))?;
    Ok(Json(BookingView::from_booking(&booking)))
}

/// Cancel a booking and release its seats.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingView>, AppError> {
    let id = BookingId::from_string(id);
    let booking = state.ledger.cancel(&id, &state.engine).await?;
    info!(booking = %id, "booking cancelled via api");
    Ok(Json(BookingView::from_booking(&booking)))
}

fn find_transport(state: &AppState, id: &str) -> Result<Arc<Transport>, AppError> {
    state.inventory.get(id).ok_or_else(|| AppError::NotFound {
        message: format!("Transport not found: {id}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        let message = e.to_string();
        match e {
            BookingError::InvalidInput(_) => AppError::BadRequest { message },
            BookingError::InsufficientSeats { .. } | BookingError::SeatsNoLongerAvailable { .. } => {
                AppError::Conflict { message }
            }
            BookingError::BookingNotFound(_) => AppError::NotFound { message },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::InvalidRequest(_) => AppError::BadRequest { message },
            SearchError::NoTripsFound { .. } => AppError::NotFound { message },
            SearchError::WorkerFailed(_) => AppError::Internal { message },
        }
    }
}

impl From<InvalidTier> for AppError {
    fn from(e: InvalidTier) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::Variant;
    use crate::engine::BookingConfig;
    use crate::inventory::Inventory;
    use crate::search::SearchConfig;
    use crate::test_support::{details, fill};

    fn state() -> AppState {
        let inventory = Inventory::new(vec![
            Transport::new(
                Variant::Train,
                details("ICE-1", "Berlin", "Munich", "2025-12-21", "08:00"),
            ),
            Transport::new(
                Variant::Bus,
                details("BUS-1", "Berlin", "Munich", "2025-12-21", "06:30"),
            ),
            Transport::new(
                Variant::Flight,
                details("LH-1", "Hamburg", "Munich", "2025-12-24", "10:00"),
            ),
        ]);
        AppState::new(inventory, SearchConfig::default(), BookingConfig::default())
    }

    fn app() -> Router {
        create_router(state())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    fn ids(trips: &Value) -> Vec<&str> {
        trips
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn search_returns_sorted_trips() {
        let app = app();
        let (status, body) = get(&app, "/trips/search?from=berlin&to=MUNICH&date=2025-12-21").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["trips"]), vec!["BUS-1", "ICE-1"]);
        assert_eq!(body["widened_by_days"], Value::Null);
        assert_eq!(body["trips"][1]["variant"], "TRAIN");
        assert_eq!(body["trips"][1]["premium_available"], 30);
    }

    #[tokio::test]
    async fn search_widens_to_nearby_date() {
        let app = app();
        let (status, body) = get(&app, "/trips/search?from=Hamburg&to=Munich&date=2025-12-21").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["trips"]), vec!["LH-1"]);
        assert_eq!(body["widened_by_days"], 3);
    }

    #[tokio::test]
    async fn search_errors() {
        let app = app();

        let (status, body) = get(&app, "/trips/search?from=Berlin&to=Munich&date=21.12.2025").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid date"));

        let (status, _) = get(&app, "/trips/search?from=%20&to=Munich&date=2025-12-21").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(&app, "/trips/search?from=Berlin&to=Paris&date=2025-12-21").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "no trips found from Berlin to Paris on or near 2025-12-21"
        );
    }

    #[tokio::test]
    async fn transport_lookup() {
        let app = app();

        let (status, body) = get(&app, "/transports/LH-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_seats"], 180);
        assert_eq!(body["standard_price"], "€40.00");

        let (status, _) = get(&app, "/transports/lh-1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn seat_map_by_tier() {
        let app = app();

        let (status, body) = get(&app, "/transports/BUS-1/seats?tier=PREMIUM").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().unwrap().len(), 3);
        assert_eq!(body["rows"][0]["seats"][0]["code"], "1A");
        assert_eq!(body["rows"][0]["seats"][0]["occupied"], false);

        let (status, _) = get(&app, "/transports/BUS-1/seats?tier=economy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn allocation_preview_reserves_nothing() {
        let app = app();

        let (status, body) = post(
            &app,
            "/transports/ICE-1/allocation",
            json!({ "count": 2, "tier": "premium" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seats"], json!(["1A", "1C"]));

        let (_, summary) = get(&app, "/transports/ICE-1").await;
        assert_eq!(summary["premium_available"], 30);

        let (status, _) = post(
            &app,
            "/transports/BUS-1/allocation",
            json!({ "count": 13, "tier": "premium" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn auto_booking_lifecycle() {
        let app = app();

        let (status, booking) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "BUS-1",
                "passenger_name": "Ada",
                "passenger_count": 2,
                "tier": "standard",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["seats"].as_array().unwrap().len(), 2);
        assert_eq!(booking["add_on_fees"], "€0.00");
        assert_eq!(booking["total_price"], "€80.00");
        let id = booking["id"].as_str().unwrap().to_string();

        let (_, list) = get(&app, "/bookings").await;
        assert_eq!(list["bookings"].as_array().unwrap().len(), 1);

        let (status, found) = get(&app, &format!("/bookings/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["seats"], booking["seats"]);

        let (status, _) = send(&app, Method::DELETE, &format!("/bookings/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, summary) = get(&app, "/transports/BUS-1").await;
        assert_eq!(summary["standard_available"], 38);

        let (status, body) = send(&app, Method::DELETE, &format!("/bookings/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], format!("booking {id} not found"));

        let (_, list) = get(&app, "/bookings").await;
        assert_eq!(list["bookings"], json!([]));
    }

    #[tokio::test]
    async fn manual_booking_charges_selection_fee() {
        let app = app();

        let (status, booking) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "ICE-1",
                "passenger_name": "Ada",
                "passenger_count": 2,
                "tier": "standard",
                "seats": ["6a", "6B"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["seats"], json!(["6A", "6B"]));
        assert_eq!(booking["add_on_fees"], "€10.00");
        assert_eq!(booking["total_price"], "€90.00");

        let (status, body) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "ICE-1",
                "passenger_name": "Grace",
                "passenger_count": 1,
                "tier": "standard",
                "seats": ["6B"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "seats no longer available: 6B");
    }

    #[tokio::test]
    async fn manual_premium_booking_is_free_to_choose() {
        let app = app();

        let (status, booking) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "ICE-1",
                "passenger_name": "Ada",
                "passenger_count": 1,
                "tier": "premium",
                "seats": ["2D"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["add_on_fees"], "€0.00");
        assert_eq!(booking["total_price"], "€75.00");
    }

    #[tokio::test]
    async fn booking_rejections() {
        let app = app();
        let request = |transport: &str, name: &str, count: usize, tier: &str| {
            json!({
                "transport_id": transport,
                "passenger_name": name,
                "passenger_count": count,
                "tier": tier,
            })
        };

        let (status, _) = post(&app, "/bookings", request("NOPE", "Ada", 1, "standard")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post(&app, "/bookings", request("BUS-1", "Ada", 0, "standard")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(&app, "/bookings", request("BUS-1", "  ", 1, "standard")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(&app, "/bookings", request("BUS-1", "Ada", 1, "business")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post(&app, "/bookings", request("BUS-1", "Ada", 13, "premium")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "invalid input: at most 10 passengers per booking, got 13"
        );

        let (_, list) = get(&app, "/bookings").await;
        assert_eq!(list["bookings"], json!([]));
    }

    #[tokio::test]
    async fn party_larger_than_limit_is_rejected() {
        let app = app();

        let (status, body) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "BUS-1",
                "passenger_name": "School trip",
                "passenger_count": 38,
                "tier": "standard",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "invalid input: at most 10 passengers per booking, got 38"
        );

        let (_, summary) = get(&app, "/transports/BUS-1").await;
        assert_eq!(summary["standard_available"], 38);
    }

    #[tokio::test]
    async fn input_checked_before_seat_availability() {
        let state = state();
        fill(&state.inventory.get("BUS-1").unwrap());
        let app = create_router(state);

        let (status, body) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "BUS-1",
                "passenger_name": " ",
                "passenger_count": 1,
                "tier": "standard",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid input: passenger name is empty");

        let (status, body) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "BUS-1",
                "passenger_name": "Ada",
                "passenger_count": 1,
                "tier": "standard",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "not enough standard seats: requested 1, available 0"
        );
    }

    #[tokio::test]
    async fn malformed_bodies_get_json_errors() {
        let app = app();

        let (status, body) = post(
            &app,
            "/bookings",
            json!({
                "transport_id": "BUS-1",
                "passenger_name": "Ada",
                "passenger_count": -1,
                "tier": "standard",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = post(&app, "/transports/BUS-1/allocation", json!({ "tier": "standard" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("count"));

        let (status, body) = get(&app, "/trips/search?from=Berlin&to=Munich").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("date"));
    }

    #[tokio::test]
    async fn unknown_booking_id() {
        let (status, _) = get(&app(), "/bookings/BK-MISSING").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
