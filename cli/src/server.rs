use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use pantry_core::models::{
    NewPantryItem, PantryItem, UpdatePantryItem, validate_expiry_date, validate_item_name,
};
use pantry_core::service::PantryService;

const BODY_LIMIT: usize = 1024 * 1024; // 1 MB

#[derive(Clone)]
struct AppState {
    service: Arc<Mutex<PantryService>>,
}

// --- Request / Response types ---

#[derive(Deserialize)]
struct ListQuery {
    search: Option<String>,
}

#[derive(Deserialize)]
struct CreateItemRequest {
    name: String,
    quantity: i64,
    unit: String,
    expiry_date: String,
}

#[derive(Deserialize)]
struct UpdateItemRequest {
    name: Option<String>,
    quantity: Option<i64>,
    unit: Option<String>,
    expiry_dates: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Error handling ---

enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(err) => {
                eprintln!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

// --- Handlers ---

async fn list_pantry(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PantryItem>>, ApiError> {
    let service = state
        .service
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let items = service
        .list_items(query.search.as_deref())
        .context("failed to list pantry items")?;
    Ok(Json(items))
}

async fn create_pantry_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<PantryItem>), ApiError> {
    validate_item_name(&req.name).map_err(|e| ApiError::BadRequest(format!("{e}")))?;
    validate_expiry_date(&req.expiry_date).map_err(|e| ApiError::BadRequest(format!("{e}")))?;

    let service = state
        .service
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let item = service
        .add_item(&NewPantryItem {
            name: req.name,
            quantity: req.quantity,
            unit: req.unit,
            expiry_date: req.expiry_date,
        })
        .context("failed to add pantry item")?;

    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_pantry_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<PantryItem>, ApiError> {
    if let Some(dates) = &req.expiry_dates {
        for date in dates {
            validate_expiry_date(date).map_err(|e| ApiError::BadRequest(format!("{e}")))?;
        }
    }

    let update = UpdatePantryItem {
        name: req.name,
        quantity: req.quantity,
        unit: req.unit,
        expiry_dates: req.expiry_dates,
    };

    let service = state
        .service
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let item = service
        .update_item(id, &update)
        .context("failed to update pantry item")?
        .ok_or_else(|| ApiError::NotFound(format!("Pantry item {id} not found")))?;

    Ok(Json(item))
}

// --- Router builder ---

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/pantry", get(list_pantry).post(create_pantry_item))
        .route("/pantry/{id}", put(update_pantry_item))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(service: PantryService, port: u16, bind: &str) -> anyhow::Result<()> {
    let state = AppState {
        service: Arc::new(Mutex::new(service)),
    };

    let app = build_router(state);

    if bind != "127.0.0.1" && bind != "localhost" {
        eprintln!(
            "Warning: Listening on {bind}. Any device on your network can access this API."
        );
    }

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    eprintln!("Listening on http://{bind}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
