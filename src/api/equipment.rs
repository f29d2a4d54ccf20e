//! Equipment API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::equipment::{Equipment, EquipmentListing},
};

use super::{AppJson, AppPath};

/// List all equipment with type, brand and status labels
#[utoipa::path(
    get,
    path = "/equipos/GetAll",
    tag = "equipos",
    responses(
        (
            status = 200,
            description = "Equipment ordered by status, brand and type (desc)",
            body = Vec<EquipmentListing>
        ),
        (status = 404, description = "No equipment registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentListing>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipos/GetById/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Find the first equipment whose description contains the filter
#[utoipa::path(
    get,
    path = "/equipos/Find/{filtro}",
    tag = "equipos",
    params(("filtro" = String, Path, description = "Substring of the description")),
    responses(
        (status = 200, description = "Matching equipment", body = Equipment),
        (status = 404, description = "No description matches", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_equipment(
    State(state): State<crate::AppState>,
    AppPath(filtro): AppPath<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.find_by_description(&filtro).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipos/Add",
    tag = "equipos",
    request_body = Equipment,
    responses(
        (status = 200, description = "Equipment created", body = Equipment),
        (
            status = 400,
            description = "Invalid payload or unknown lookup reference",
            body = crate::error::ErrorResponse
        ),
        (status = 409, description = "Equipment already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<Equipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok(Json(equipment))
}

/// Update equipment; status fields are not modified
#[utoipa::path(
    put,
    path = "/equipos/actualizar/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = Equipment,
    responses(
        (status = 200, description = "Submitted payload", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(data): AppJson<Equipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, data).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipos/eliminar/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Deleted equipment", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.delete(id).await?;
    Ok(Json(equipment))
}
