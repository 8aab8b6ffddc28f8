use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use shared::{CreateOwnerRequest, UpdateOwnerRequest};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::OwnerMapper;
use crate::io::rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/owners", get(list_owners).post(create_owner))
        .route("/owners/:id", get(get_owner).put(update_owner).delete(delete_owner))
}

/// GET /api/owners
pub async fn list_owners(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/owners");

    let owners = state.owner_service.list_owners().await?;
    let dtos: Vec<shared::Owner> = owners.into_iter().map(OwnerMapper::to_dto).collect();
    Ok(Json(dtos))
}

/// POST /api/owners
pub async fn create_owner(
    State(state): State<AppState>,
    payload: Result<Json<CreateOwnerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    info!("POST /api/owners - request: {:?}", request);

    let owner = state
        .owner_service
        .create_owner(OwnerMapper::to_create_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(OwnerMapper::to_dto(owner))))
}

/// GET /api/owners/:id
pub async fn get_owner(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    info!("GET /api/owners/{}", id);

    let owner = state.owner_service.get_owner(id).await?;
    Ok(Json(OwnerMapper::to_dto(owner)))
}

/// PUT /api/owners/:id
pub async fn update_owner(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateOwnerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    info!("PUT /api/owners/{} - request: {:?}", id, request);

    let owner = state
        .owner_service
        .update_owner(id, OwnerMapper::to_update_command(request))
        .await?;
    Ok(Json(OwnerMapper::to_dto(owner)))
}

/// DELETE /api/owners/:id
pub async fn delete_owner(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    info!("DELETE /api/owners/{}", id);

    state.owner_service.delete_owner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
