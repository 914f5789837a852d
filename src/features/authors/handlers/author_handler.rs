use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::authors::dtos::{
    AuthorResponseDto, CreateAuthorDto, DeleteAuthorResponseDto, UpdateAuthorDto,
};
use crate::features::authors::services::AuthorService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Create an author profile for an existing user
#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = ApiResponse<AuthorResponseDto>),
        (status = 400, description = "Validation error or unknown user"),
        (status = 409, description = "User already has an author profile")
    ),
    tag = "authors"
)]
pub async fn create_author(
    State(service): State<Arc<AuthorService>>,
    AppJson(dto): AppJson<CreateAuthorDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthorResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let author = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(author), None, None)),
    ))
}

/// List authors, newest first
#[utoipa::path(
    get,
    path = "/api/authors",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of authors", body = ApiResponse<Vec<AuthorResponseDto>>),
    ),
    tag = "authors"
)]
pub async fn list_authors(
    State(service): State<Arc<AuthorService>>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AuthorResponseDto>>>> {
    let (authors, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::paginated(authors, total)))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author found", body = ApiResponse<AuthorResponseDto>),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn get_author(
    State(service): State<Arc<AuthorService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AuthorResponseDto>>> {
    let author = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(author), None, None)))
}

/// Update an author profile
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    request_body = UpdateAuthorDto,
    responses(
        (status = 200, description = "Author updated", body = ApiResponse<AuthorResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn update_author(
    State(service): State<Arc<AuthorService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAuthorDto>,
) -> Result<Json<ApiResponse<AuthorResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let author = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(author), None, None)))
}

/// Delete an author and all of their courses
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author and their courses deleted", body = ApiResponse<DeleteAuthorResponseDto>),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn delete_author(
    State(service): State<Arc<AuthorService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteAuthorResponseDto>>> {
    let deleted = service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}
