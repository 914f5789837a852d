use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::courses::dtos::{
    CourseQueryParams, CourseResponseDto, CourseStatsDto, CreateCourseDto,
    DeleteCourseResponseDto, RecordReviewDto, UpdateCourseDto,
};
use crate::features::courses::services::CourseService;
use crate::shared::types::ApiResponse;

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseResponseDto>),
        (status = 400, description = "Validation error, unknown author or unknown category"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(service): State<Arc<CourseService>>,
    AppJson(dto): AppJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let course = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(course), None, None)),
    ))
}

/// List courses
///
/// Filters combine with AND. Default order is newest first.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses", body = ApiResponse<Vec<CourseResponseDto>>),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(service): State<Arc<CourseService>>,
    AppQuery(params): AppQuery<CourseQueryParams>,
) -> Result<Json<ApiResponse<Vec<CourseResponseDto>>>> {
    let (courses, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::paginated(courses, total)))
}

/// Get course by slug
#[utoipa::path(
    get,
    path = "/api/courses/{slug}",
    params(
        ("slug" = String, Path, description = "Course slug")
    ),
    responses(
        (status = 200, description = "Course found", body = ApiResponse<CourseResponseDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(service): State<Arc<CourseService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    let course = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(course), None, None)))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{slug}",
    params(
        ("slug" = String, Path, description = "Course slug")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(service): State<Arc<CourseService>>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<UpdateCourseDto>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let course = service.update(&slug, dto).await?;
    Ok(Json(ApiResponse::success(Some(course), None, None)))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{slug}",
    params(
        ("slug" = String, Path, description = "Course slug")
    ),
    responses(
        (status = 200, description = "Course deleted", body = ApiResponse<DeleteCourseResponseDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(service): State<Arc<CourseService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<DeleteCourseResponseDto>>> {
    let deleted = service.delete(&slug).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}

/// Record a review score
#[utoipa::path(
    post,
    path = "/api/courses/{slug}/reviews",
    params(
        ("slug" = String, Path, description = "Course slug")
    ),
    request_body = RecordReviewDto,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<CourseStatsDto>),
        (status = 400, description = "Score outside 1-5"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn record_review(
    State(service): State<Arc<CourseService>>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<RecordReviewDto>,
) -> Result<Json<ApiResponse<CourseStatsDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stats = service.record_review(&slug, dto.score).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Record an enrollment
#[utoipa::path(
    post,
    path = "/api/courses/{slug}/enrollments",
    params(
        ("slug" = String, Path, description = "Course slug")
    ),
    responses(
        (status = 200, description = "Student count updated", body = ApiResponse<CourseStatsDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn record_enrollment(
    State(service): State<Arc<CourseService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CourseStatsDto>>> {
    let stats = service.record_enrollment(&slug).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
