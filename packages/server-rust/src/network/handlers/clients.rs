//! `/api/clients` REST handlers.
//!
//! Thin translation between HTTP and [`ClientService`](crate::service::ClientService):
//! each handler makes exactly one service call.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientrisk_core::{Client, ClientDto, ClientId};
use tracing::debug;

use super::AppState;
use crate::service::ServiceError;

/// Treats an unreadable body as a DTO with no risk profile, so it fails
/// validation like any other missing value.
fn dto_or_default(payload: Result<Json<ClientDto>, JsonRejection>) -> ClientDto {
    match payload {
        Ok(Json(dto)) => dto,
        Err(rejection) => {
            debug!(%rejection, "unreadable client payload");
            ClientDto::default()
        }
    }
}

/// Lists every client.
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "clients",
    responses((status = 200, description = "All clients", body = [Client]))
)]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ServiceError> {
    Ok(Json(state.service.find_all().await?))
}

/// Lists every client with its risk profile replaced by the dominant one.
///
/// Read-only: stored profiles are left untouched.
#[utoipa::path(
    get,
    path = "/api/clients/merge",
    tag = "clients",
    responses((status = 200, description = "All clients after merge", body = [Client]))
)]
pub async fn merge_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Client>>, ServiceError> {
    Ok(Json(state.service.merge().await?))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "clients",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client", body = Client),
        (status = 404, description = "Client not found!")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ServiceError> {
    Ok(Json(state.service.get_client(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "clients",
    request_body = ClientDto,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid risk profile!")
    )
)]
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), ServiceError> {
    let dto = dto_or_default(payload);
    let client = state.service.create_client(&dto).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "clients",
    params(("id" = i64, Path, description = "Client id")),
    request_body = ClientDto,
    responses(
        (status = 200, description = "Client updated"),
        (status = 400, description = "Invalid risk profile!"),
        (status = 404, description = "Client not found!")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    payload: Result<Json<ClientDto>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let dto = dto_or_default(payload);
    state.service.update_client(id, &dto).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "clients",
    params(("id" = i64, Path, description = "Client id")),
    responses((status = 200, description = "Client deleted or already absent"))
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ServiceError> {
    state.service.delete_client_by_id(id).await?;
    Ok(StatusCode::OK)
}
