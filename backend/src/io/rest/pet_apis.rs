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
use chrono::{Local, NaiveDate};
use shared::{CreatePetRequest, UpdatePetRequest};
use tracing::info;

use crate::domain::models::Pet;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::PetMapper;
use crate::io::rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/owner/:owner_id", get(list_pets_by_owner))
        .route("/pets/:id", get(get_pet).put(update_pet).delete(delete_pet))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn to_dtos(pets: Vec<Pet>) -> Vec<shared::Pet> {
    let today = today();
    pets.into_iter().map(|pet| PetMapper::to_dto(pet, today)).collect()
}

/// GET /api/pets
pub async fn list_pets(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/pets");

    let pets = state.pet_service.list_pets().await?;
    Ok(Json(to_dtos(pets)))
}

/// GET /api/pets/owner/:owner_id
pub async fn list_pets_by_owner(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(owner_id) = path?;
    info!("GET /api/pets/owner/{}", owner_id);

    let pets = state.pet_service.list_pets_by_owner(owner_id).await?;
    Ok(Json(to_dtos(pets)))
}

/// POST /api/pets
pub async fn create_pet(
    State(state): State<AppState>,
    payload: Result<Json<CreatePetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    info!("POST /api/pets - request: {:?}", request);

    let pet = state.pet_service.create_pet(PetMapper::to_create_command(request)).await?;
    Ok((StatusCode::CREATED, Json(PetMapper::to_dto(pet, today()))))
}

/// GET /api/pets/:id
pub async fn get_pet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    info!("GET /api/pets/{}", id);

    let pet = state.pet_service.get_pet(id).await?;
    Ok(Json(PetMapper::to_dto(pet, today())))
}

/// PUT /api/pets/:id
pub async fn update_pet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    info!("PUT /api/pets/{} - request: {:?}", id, request);

    let pet = state
        .pet_service
        .update_pet(id, PetMapper::to_update_command(request))
        .await?;
    Ok(Json(PetMapper::to_dto(pet, today())))
}

/// DELETE /api/pets/:id
pub async fn delete_pet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    info!("DELETE /api/pets/{}", id);

    state.pet_service.delete_pet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::owner::OwnerDraft;
    use crate::storage::DbConnection;

    async fn setup_test_handlers() -> (AppState, i64) {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let state = AppState::new(db);
        let owner = state
            .owner_service
            .create_owner(OwnerDraft {
                first_name: "Juan".to_string(),
                last_name: "Pérez".to_string(),
                phone: "999888777".to_string(),
                email: "juan@mail.com".to_string(),
            })
            .await
            .expect("Failed to create owner");
        (state, owner.id)
    }

    fn max(owner_id: i64) -> CreatePetRequest {
        CreatePetRequest {
            name: "Max".to_string(),
            species: "Dog".to_string(),
            breed: "Labrador".to_string(),
            birth_date: "2020-01-01".to_string(),
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_create_pet_handler() {
        let (state, owner_id) = setup_test_handlers().await;

        let response = create_pet(State(state), Ok(Json(max(owner_id)))).await.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_pet_for_missing_owner_handler() {
        let (state, owner_id) = setup_test_handlers().await;

        let response = create_pet(State(state), Ok(Json(max(owner_id + 1)))).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_pets_by_missing_owner_handler() {
        let (state, owner_id) = setup_test_handlers().await;

        let response = list_pets_by_owner(State(state.clone()), Ok(Path(owner_id))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = list_pets_by_owner(State(state), Ok(Path(owner_id + 1))).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_pet_owner_change_rejected() {
        let (state, owner_id) = setup_test_handlers().await;
        let pet = state.pet_service.create_pet(PetMapper::to_create_command(max(owner_id))).await.unwrap();

        let request = UpdatePetRequest {
            name: "Max".to_string(),
            species: "Dog".to_string(),
            breed: "Labrador".to_string(),
            birth_date: "2020-01-01".to_string(),
            owner_id: Some(owner_id + 1),
        };
        let response = update_pet(State(state), Ok(Path(pet.id)), Ok(Json(request))).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
