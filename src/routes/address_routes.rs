use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::address_controller::AddressController;
use crate::dto::address_dto::{
    AddressResponse, CreateAddressRequest, ListAddressesQuery, NearbyAddressResponse, NearbyQuery,
    SearchAddressRequest, UpdateAddressRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_address_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_address).get(list_addresses))
        .route("/nearby", get(addresses_nearby))
        .route("/search", post(search_addresses))
        .route(
            "/:id",
            get(get_address).patch(update_address).delete(delete_address),
        )
}

async fn create_address(
    State(state): State<AppState>,
    request: Result<Json<CreateAddressRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddressResponse>), AppError> {
    let Json(request) = request?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_addresses(
    State(state): State<AppState>,
    query: Result<Query<ListAddressesQuery>, QueryRejection>,
) -> Result<Json<Vec<AddressResponse>>, AppError> {
    let Query(query) = query?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_address(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AddressResponse>, AppError> {
    let Path(id) = id?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_address(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateAddressRequest>, JsonRejection>,
) -> Result<Json<AddressResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_address(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let controller = AddressController::new(state.repository.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn addresses_nearby(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<Vec<NearbyAddressResponse>>, AppError> {
    let Query(query) = query?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.nearby(query).await?;
    Ok(Json(response))
}

async fn search_addresses(
    State(state): State<AppState>,
    request: Result<Json<SearchAddressRequest>, JsonRejection>,
) -> Result<Json<Vec<NearbyAddressResponse>>, AppError> {
    let Json(request) = request?;
    let controller = AddressController::new(state.repository.clone());
    let response = controller.search(request).await?;
    Ok(Json(response))
}
