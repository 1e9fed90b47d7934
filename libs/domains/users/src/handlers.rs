use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{RegisterUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::RegistrationService;

/// OpenAPI documentation for the registration API
#[derive(OpenApi)]
#[openapi(
    paths(register_user, list_users, update_user, delete_user),
    components(schemas(
        RegisterUser,
        UpdateUser,
        UserResponse,
        MessageResponse,
        UpdatedUserResponse,
        ErrorResponse
    )),
    tags(
        (name = "Registration", description = "User registration endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Confirmation body for create/delete operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Confirmation body for updates, carrying the updated record.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedUserResponse {
    pub message: String,
    #[serde(rename = "updatedUser")]
    pub updated_user: UserResponse,
}

/// Create the registration router with all HTTP endpoints.
///
/// The caller nests this under its route prefix (e.g. `/register`).
pub fn router<R: UserRepository + 'static>(service: RegistrationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/{id}", put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Registration",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Validation failure or duplicate email/phone", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn register_user<R: UserRepository>(
    State(service): State<Arc<RegistrationService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Account created successfully!")),
    ))
}

/// List all registered users
#[utoipa::path(
    get,
    path = "",
    tag = "Registration",
    responses(
        (status = 200, description = "All users, without password material", body = Vec<UserResponse>),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<RegistrationService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Update a user by ID
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Registration",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UpdatedUserResponse),
        (status = 400, description = "Invalid ID, validation failure, or duplicate phone", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<RegistrationService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UpdatedUserResponse>> {
    let updated_user = service.update_user(id, input).await?;
    Ok(Json(UpdatedUserResponse {
        message: "User updated successfully".to_string(),
        updated_user,
    }))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Registration",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<RegistrationService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
