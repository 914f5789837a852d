use utoipa::{Modify, OpenApi};

use crate::features::authors::{dtos as authors_dtos, handlers as authors_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::courses::{
    dtos as courses_dtos, handlers as courses_handlers, models as courses_models,
};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        health_handlers::test_probe,
        // Authors
        authors_handlers::create_author,
        authors_handlers::list_authors,
        authors_handlers::get_author,
        authors_handlers::update_author,
        authors_handlers::delete_author,
        // Categories
        categories_handlers::create_category,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Courses
        courses_handlers::create_course,
        courses_handlers::list_courses,
        courses_handlers::get_course,
        courses_handlers::update_course,
        courses_handlers::delete_course,
        courses_handlers::record_review,
        courses_handlers::record_enrollment,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Health
            health_dtos::HealthResponseDto,
            health_dtos::ProbeResponseDto,
            // Authors
            authors_dtos::CreateAuthorDto,
            authors_dtos::UpdateAuthorDto,
            authors_dtos::AuthorResponseDto,
            authors_dtos::DeleteAuthorResponseDto,
            ApiResponse<authors_dtos::AuthorResponseDto>,
            ApiResponse<Vec<authors_dtos::AuthorResponseDto>>,
            ApiResponse<authors_dtos::DeleteAuthorResponseDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::DeleteCategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::DeleteCategoryResponseDto>,
            // Courses
            courses_models::CourseLevel,
            courses_dtos::CourseSortBy,
            courses_dtos::SortDirection,
            courses_dtos::CreateCourseDto,
            courses_dtos::UpdateCourseDto,
            courses_dtos::RecordReviewDto,
            courses_dtos::CourseResponseDto,
            courses_dtos::CourseStatsDto,
            courses_dtos::DeleteCourseResponseDto,
            ApiResponse<courses_dtos::CourseResponseDto>,
            ApiResponse<Vec<courses_dtos::CourseResponseDto>>,
            ApiResponse<courses_dtos::CourseStatsDto>,
            ApiResponse<courses_dtos::DeleteCourseResponseDto>,
        )
    ),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "authors", description = "Author profiles"),
        (name = "categories", description = "Course categories"),
        (name = "courses", description = "Courses, reviews and enrollments"),
    ),
    info(
        title = "Course Market API",
        version = "1.0",
        description = "API documentation for the course marketplace",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
