use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::get,
};
use domain::Operation;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::CallerRole;
use crate::dto;
use crate::error::ApiError;
use crate::state::AppState;

/// Collection path; also the prefix of the `Location` header on create
pub const DEVICE_TYPE_PATH: &str = "/type";

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(
            DEVICE_TYPE_PATH,
            get(list_device_types).post(create_device_type),
        )
        .route(
            &format!("{DEVICE_TYPE_PATH}/{{param}}"),
            get(get_device_type)
                .patch(update_device_type)
                .delete(delete_device_type),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn create_device_type(
    State(state): State<Arc<AppState>>,
    CallerRole(role): CallerRole,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Role check runs before body validation
    state.service.authorize(role, Operation::Create)?;
    let Json(body) = payload?;
    let attributes = dto::create_attributes(body)?;

    let record = state.service.create(role, attributes).await?;
    let location = format!("{DEVICE_TYPE_PATH}/{}", record.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

async fn list_device_types(
    State(state): State<Arc<AppState>>,
    CallerRole(role): CallerRole,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.service.list_all(role).await?;
    Ok(Json(records))
}

async fn get_device_type(
    Path(param): Path<String>,
    State(state): State<Arc<AppState>>,
    CallerRole(role): CallerRole,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.read_one(role, &param).await?;
    Ok(Json(record))
}

async fn update_device_type(
    Path(param): Path<String>,
    State(state): State<Arc<AppState>>,
    CallerRole(role): CallerRole,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.authorize(role, Operation::Update)?;
    let Json(body) = payload?;
    let patch = dto::update_patch(body)?;

    let record = state.service.update(role, &param, patch).await?;
    Ok(Json(record))
}

async fn delete_device_type(
    Path(param): Path<String>,
    State(state): State<Arc<AppState>>,
    CallerRole(role): CallerRole,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(role, &param).await?;
    Ok(StatusCode::NO_CONTENT)
}
