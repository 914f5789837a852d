use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::courses::dtos::{
    CourseQueryParams, CourseResponseDto, CourseStatsDto, CreateCourseDto,
    DeleteCourseResponseDto, UpdateCourseDto,
};
use crate::features::courses::models::Course;

/// Course columns plus author and category labels.
/// Expects the course row aliased `c` and [`COURSE_JOINS`] in scope.
const COURSE_COLUMNS: &str = r#"
    c.id, c.title, c.slug, c.description, c.short_description,
    c.price, c.discount_price, c.author_id, c.category_id, c.level,
    c.duration_hours, c.language, c.cover_image, c.preview_video,
    c.is_published, c.is_featured, c.students_count, c.rating, c.reviews_count,
    c.created_at, c.updated_at,
    u.username AS author_username,
    u.first_name AS author_first_name,
    u.last_name AS author_last_name,
    cat.name AS category_name,
    cat.slug AS category_slug
"#;

const COURSE_JOINS: &str = r#"
    JOIN authors a ON a.id = c.author_id
    JOIN users u ON u.id = a.user_id
    LEFT JOIN categories cat ON cat.id = c.category_id
"#;

const STATS_COLUMNS: &str = "id, slug, students_count, rating, reviews_count";

/// Escape LIKE wildcards so a search term matches literally
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append the WHERE clause for the listing filters
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &CourseQueryParams) {
    builder.push(" WHERE TRUE");

    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        builder
            .push(" AND (c.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.short_description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(category) = &params.category {
        builder.push(" AND cat.slug = ").push_bind(category.clone());
    }
    if let Some(author_id) = params.author_id {
        builder.push(" AND c.author_id = ").push_bind(author_id);
    }
    if let Some(level) = params.level {
        builder.push(" AND c.level = ").push_bind(level);
    }
    if let Some(is_published) = params.is_published {
        builder.push(" AND c.is_published = ").push_bind(is_published);
    }
    if let Some(is_featured) = params.is_featured {
        builder.push(" AND c.is_featured = ").push_bind(is_featured);
    }
}

/// Service for course operations
pub struct CourseService {
    pool: PgPool,
}

impl CourseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a course
    pub async fn create(&self, dto: CreateCourseDto) -> Result<CourseResponseDto> {
        let slug = dto.resolved_slug()?;

        let query = format!(
            r#"
            WITH c AS (
                INSERT INTO courses (
                    title, slug, description, short_description, price, discount_price,
                    author_id, category_id, level, duration_hours, language,
                    cover_image, preview_video, is_published, is_featured
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                        NULLIF($12, ''), NULLIF($13, ''), $14, $15)
                RETURNING *
            )
            SELECT {COURSE_COLUMNS}
            FROM c
            {COURSE_JOINS}
            "#
        );

        let course: Course = sqlx::query_as(&query)
            .bind(&dto.title)
            .bind(&slug)
            .bind(&dto.description)
            .bind(&dto.short_description)
            .bind(dto.price)
            .bind(dto.discount_price)
            .bind(dto.author_id)
            .bind(dto.category_id)
            .bind(dto.level)
            .bind(dto.duration_hours)
            .bind(&dto.language)
            .bind(&dto.cover_image)
            .bind(&dto.preview_video)
            .bind(dto.is_published)
            .bind(dto.is_featured)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        tracing::info!(
            "Course created: id={}, slug={}, author_id={}",
            course.id,
            course.slug,
            course.author_id
        );

        Ok(course.into())
    }

    /// List courses matching the filters, newest first unless sorted otherwise
    pub async fn list(&self, params: &CourseQueryParams) -> Result<(Vec<CourseResponseDto>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM courses c {COURSE_JOINS}"
        ));
        push_filters(&mut count, params);

        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count courses: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COURSE_COLUMNS} FROM courses c {COURSE_JOINS}"
        ));
        push_filters(&mut query, params);
        query
            .push(format!(
                " ORDER BY {} {}, c.id",
                params.sort_by.as_sql(),
                params.sort.as_sql()
            ))
            .push(" LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let courses: Vec<Course> = query
            .build_query_as::<Course>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list courses: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((courses.into_iter().map(Into::into).collect(), total))
    }

    /// Get course by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CourseResponseDto> {
        let query = format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses c
            {COURSE_JOINS}
            WHERE c.slug = $1
            "#
        );

        let course: Option<Course> = sqlx::query_as(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get course by slug: {:?}", e);
                AppError::Database(e)
            })?;

        course
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", slug)))
    }

    /// Partially update a course.
    ///
    /// `discount_price` and `category_id` are only written when present in
    /// the request, so an explicit null clears them. `updated_at` is refreshed
    /// by the table trigger.
    pub async fn update(&self, slug: &str, dto: UpdateCourseDto) -> Result<CourseResponseDto> {
        let query = format!(
            r#"
            WITH c AS (
                UPDATE courses
                SET title = COALESCE($1, title),
                    slug = COALESCE($2, slug),
                    description = COALESCE($3, description),
                    short_description = COALESCE($4, short_description),
                    price = COALESCE($5, price),
                    discount_price = CASE WHEN $6 THEN $7 ELSE discount_price END,
                    category_id = CASE WHEN $8 THEN $9 ELSE category_id END,
                    level = COALESCE($10, level),
                    duration_hours = COALESCE($11, duration_hours),
                    language = COALESCE($12, language),
                    cover_image = CASE WHEN $13::text IS NULL THEN cover_image
                                       ELSE NULLIF($13::text, '') END,
                    preview_video = CASE WHEN $14::text IS NULL THEN preview_video
                                         ELSE NULLIF($14::text, '') END,
                    is_published = COALESCE($15, is_published),
                    is_featured = COALESCE($16, is_featured)
                WHERE slug = $17
                RETURNING *
            )
            SELECT {COURSE_COLUMNS}
            FROM c
            {COURSE_JOINS}
            "#
        );

        let course: Option<Course> = sqlx::query_as(&query)
            .bind(&dto.title)
            .bind(&dto.slug)
            .bind(&dto.description)
            .bind(&dto.short_description)
            .bind(dto.price)
            .bind(dto.discount_price.is_some())
            .bind(dto.discount_price.flatten())
            .bind(dto.category_id.is_some())
            .bind(dto.category_id.flatten())
            .bind(dto.level)
            .bind(dto.duration_hours)
            .bind(&dto.language)
            .bind(&dto.cover_image)
            .bind(&dto.preview_video)
            .bind(dto.is_published)
            .bind(dto.is_featured)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        let course =
            course.ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", slug)))?;

        tracing::info!("Course updated: id={}, slug={}", course.id, course.slug);

        Ok(course.into())
    }

    /// Delete a course
    pub async fn delete(&self, slug: &str) -> Result<DeleteCourseResponseDto> {
        let id: Option<uuid::Uuid> =
            sqlx::query_scalar("DELETE FROM courses WHERE slug = $1 RETURNING id")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_db)?;

        let id = id.ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", slug)))?;

        tracing::info!("Course deleted: id={}, slug={}", id, slug);

        Ok(DeleteCourseResponseDto {
            id,
            slug: slug.to_string(),
        })
    }

    /// Fold one review score into the running average.
    ///
    /// Read and write happen in one UPDATE; concurrent reviews serialize on
    /// the row lock.
    pub async fn record_review(&self, slug: &str, score: i32) -> Result<CourseStatsDto> {
        let query = format!(
            r#"
            UPDATE courses
            SET rating = (rating * reviews_count + $1) / (reviews_count + 1),
                reviews_count = reviews_count + 1
            WHERE slug = $2
            RETURNING {STATS_COLUMNS}
            "#
        );

        let stats: Option<CourseStatsDto> = sqlx::query_as(&query)
            .bind(score)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        let stats =
            stats.ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", slug)))?;

        tracing::info!(
            "Review recorded: slug={}, score={}, rating={:.2}, reviews_count={}",
            slug,
            score,
            stats.rating,
            stats.reviews_count
        );

        Ok(stats)
    }

    /// Count one more enrolled student
    pub async fn record_enrollment(&self, slug: &str) -> Result<CourseStatsDto> {
        let query = format!(
            r#"
            UPDATE courses
            SET students_count = students_count + 1
            WHERE slug = $1
            RETURNING {STATS_COLUMNS}
            "#
        );

        let stats: Option<CourseStatsDto> = sqlx::query_as(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        stats.ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::courses::dtos::{CourseSortBy, SortDirection};
    use crate::features::courses::models::CourseLevel;
    use crate::shared::test_helpers::{insert_author, insert_category, insert_course, insert_user};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn create_dto(author_id: Uuid, title: &str) -> CreateCourseDto {
        CreateCourseDto {
            title: title.to_string(),
            slug: None,
            description: "Full description".to_string(),
            short_description: "Short description".to_string(),
            price: Decimal::from(2990),
            discount_price: None,
            author_id,
            category_id: None,
            level: CourseLevel::default(),
            duration_hours: 10,
            language: "English".to_string(),
            cover_image: None,
            preview_video: None,
            is_published: false,
            is_featured: false,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_push_filters_without_params() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM courses c");
        push_filters(&mut builder, &CourseQueryParams::default());

        assert_eq!(builder.sql(), "SELECT 1 FROM courses c WHERE TRUE");
    }

    #[test]
    fn test_push_filters_numbers_every_bind() {
        let params = CourseQueryParams {
            search: Some("react".to_string()),
            category: Some("programming".to_string()),
            level: Some(CourseLevel::Advanced),
            is_published: Some(true),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM courses c");
        push_filters(&mut builder, &params);

        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM courses c WHERE TRUE \
             AND (c.title ILIKE $1 OR c.short_description ILIKE $2) \
             AND cat.slug = $3 AND c.level = $4 AND c.is_published = $5"
        );
    }

    #[test]
    fn test_push_filters_ignores_blank_search() {
        let params = CourseQueryParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM courses c");
        push_filters(&mut builder, &params);

        assert_eq!(builder.sql(), "SELECT 1 FROM courses c WHERE TRUE");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_create_course_applies_defaults(pool: PgPool) {
        let user_id = insert_user(&pool, "ivan", "Ivan", "Ivanov").await;
        let author_id: Uuid = sqlx::query_scalar(
            "INSERT INTO authors (user_id, specialization) VALUES ($1, 'Mobile') RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        let service = CourseService::new(pool);

        let course = service
            .create(create_dto(author_id, "React Native from zero to PRO"))
            .await
            .unwrap();

        assert_eq!(course.slug, "react-native-from-zero-to-pro");
        assert_eq!(course.level, CourseLevel::Beginner);
        assert_eq!(course.language, "English");
        assert_eq!(course.students_count, 0);
        assert_eq!(course.rating, 0.0);
        assert_eq!(course.reviews_count, 0);
        assert_eq!(course.author_name, "Ivan Ivanov");
        assert_eq!(course.category_name, None);
        assert_eq!(course.effective_price, Decimal::from(2990));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_course_slug_is_unique(pool: PgPool) {
        let author_id = insert_author(&pool, "anna").await;
        let service = CourseService::new(pool);

        service.create(create_dto(author_id, "Figma basics")).await.unwrap();
        let duplicate = service.create(create_dto(author_id, "Figma basics")).await;

        assert!(
            matches!(duplicate, Err(AppError::Conflict(msg)) if msg == "A course with this slug already exists")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_create_course_for_unknown_author(pool: PgPool) {
        let service = CourseService::new(pool);

        let result = service.create(create_dto(Uuid::new_v4(), "Orphan")).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Author does not exist"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_list_newest_first_with_filters(pool: PgPool) {
        let author_id = insert_author(&pool, "petr").await;
        let category_id = insert_category(&pool, "programming").await;
        insert_course(&pool, author_id, Some(category_id), "first").await;
        insert_course(&pool, author_id, None, "second").await;
        insert_course(&pool, author_id, Some(category_id), "third").await;
        let service = CourseService::new(pool);

        let (courses, total) = service.list(&CourseQueryParams::default()).await.unwrap();
        let slugs: Vec<_> = courses.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(total, 3);
        assert_eq!(slugs, ["third", "second", "first"]);

        let params = CourseQueryParams {
            category: Some("programming".to_string()),
            sort: SortDirection::Asc,
            ..Default::default()
        };
        let (courses, total) = service.list(&params).await.unwrap();
        let slugs: Vec<_> = courses.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(total, 2);
        assert_eq!(slugs, ["first", "third"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_list_search_and_sort_by_price(pool: PgPool) {
        let author_id = insert_author(&pool, "olga").await;
        let service = CourseService::new(pool);
        let mut cheap = create_dto(author_id, "SEO for shops");
        cheap.price = Decimal::from(990);
        service.create(cheap).await.unwrap();
        service.create(create_dto(author_id, "SEO advanced")).await.unwrap();
        service.create(create_dto(author_id, "Excel")).await.unwrap();

        let params = CourseQueryParams {
            search: Some("seo".to_string()),
            sort_by: CourseSortBy::Price,
            sort: SortDirection::Asc,
            page: 1,
            page_size: 10,
            ..Default::default()
        };
        let (courses, total) = service.list(&params).await.unwrap();

        assert_eq!(total, 2);
        assert_eq!(courses[0].slug, "seo-for-shops");
        assert_eq!(courses[1].slug, "seo-advanced");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_update_clears_discount_and_category(pool: PgPool) {
        let author_id = insert_author(&pool, "maria").await;
        let category_id = insert_category(&pool, "design").await;
        let service = CourseService::new(pool);
        let mut dto = create_dto(author_id, "Brand identity");
        dto.discount_price = Some(Decimal::from(1990));
        dto.category_id = Some(category_id);
        let created = service.create(dto).await.unwrap();
        assert_eq!(created.category_slug.as_deref(), Some("design"));

        let untouched = service
            .update("brand-identity", UpdateCourseDto::default())
            .await
            .unwrap();
        assert_eq!(untouched.discount_price, Some(Decimal::from(1990)));
        assert!(untouched.updated_at >= created.updated_at);

        let cleared = service
            .update(
                "brand-identity",
                UpdateCourseDto {
                    discount_price: Some(None),
                    category_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.discount_price, None);
        assert_eq!(cleared.category_id, None);
        assert_eq!(cleared.effective_price, Decimal::from(2990));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_update_discount_checked_against_stored_price(pool: PgPool) {
        let author_id = insert_author(&pool, "egor").await;
        insert_course(&pool, author_id, None, "python").await;
        let service = CourseService::new(pool);

        let result = service
            .update(
                "python",
                UpdateCourseDto {
                    discount_price: Some(Some(Decimal::from(50))),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_record_review_keeps_running_mean(pool: PgPool) {
        let author_id = insert_author(&pool, "nina").await;
        insert_course(&pool, author_id, None, "go-basics").await;
        let service = CourseService::new(pool);

        service.record_review("go-basics", 5).await.unwrap();
        service.record_review("go-basics", 4).await.unwrap();
        let stats = service.record_review("go-basics", 3).await.unwrap();

        assert_eq!(stats.reviews_count, 3);
        assert!((stats.rating - 4.0).abs() < f64::EPSILON);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_record_enrollment(pool: PgPool) {
        let author_id = insert_author(&pool, "lev").await;
        insert_course(&pool, author_id, None, "sql").await;
        let service = CourseService::new(pool);

        service.record_enrollment("sql").await.unwrap();
        let stats = service.record_enrollment("sql").await.unwrap();

        assert_eq!(stats.students_count, 2);
        assert!(matches!(
            service.record_enrollment("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_delete_course(pool: PgPool) {
        let author_id = insert_author(&pool, "vera").await;
        let id = insert_course(&pool, author_id, None, "ml").await;
        let service = CourseService::new(pool);

        let deleted = service.delete("ml").await.unwrap();

        assert_eq!(deleted.id, id);
        assert!(matches!(
            service.get_by_slug("ml").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete("ml").await, Err(AppError::NotFound(_))));
    }
}
