use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, DeleteCategoryResponseDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::relations::COURSE_CATEGORY;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = dto.resolved_slug()?;

        let category: Category = sqlx::query_as(
            r#"
            INSERT INTO categories (name, slug, description, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, description, image, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_db)?;

        tracing::info!(
            "Category created: id={}, slug={}",
            category.id,
            category.slug
        );

        Ok(category.into())
    }

    /// List all categories (flat list, by name)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories: Vec<Category> = sqlx::query_as(
            r#"
            SELECT id, name, slug, description, image, created_at
            FROM categories
            ORDER BY name, slug
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category: Option<Category> = sqlx::query_as(
            r#"
            SELECT id, name, slug, description, image, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Partially update a category; an empty image clears it
    pub async fn update(&self, slug: &str, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category: Option<Category> = sqlx::query_as(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                description = COALESCE($3, description),
                image = CASE WHEN $4::text IS NULL THEN image ELSE NULLIF($4::text, '') END
            WHERE slug = $5
            RETURNING id, name, slug, description, image, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(&dto.description)
        .bind(&dto.image)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Delete a category; its courses stay, uncategorised
    pub async fn delete(&self, slug: &str) -> Result<DeleteCategoryResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let id: Option<uuid::Uuid> =
            sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1 FOR UPDATE")
                .bind(slug)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        let id = id.ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

        let courses_detached = sqlx::query(&COURSE_CATEGORY.dependents_statement())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?
            .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Category deleted: slug={}, courses_detached={}",
            slug,
            courses_detached
        );

        Ok(DeleteCategoryResponseDto {
            id,
            slug: slug.to_string(),
            courses_detached,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_author, insert_course};

    fn create_dto(name: &str, slug: Option<&str>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            slug: slug.map(str::to_string),
            description: String::new(),
            image: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_slug_is_unique(pool: PgPool) {
        let service = CategoryService::new(pool);

        service.create(create_dto("Design", Some("design"))).await.unwrap();
        let duplicate = service.create(create_dto("Graphic design", Some("design"))).await;

        assert!(
            matches!(duplicate, Err(AppError::Conflict(msg)) if msg == "A category with this slug already exists")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_create_derives_slug(pool: PgPool) {
        let service = CategoryService::new(pool);

        let category = service.create(create_dto("Data Science", None)).await.unwrap();

        assert_eq!(category.slug, "data-science");
        assert_eq!(service.get_by_slug("data-science").await.unwrap().id, category.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_delete_category_keeps_courses(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let category = service.create(create_dto("Business", None)).await.unwrap();
        let author_id = insert_author(&pool, "maria").await;
        let course_id = insert_course(&pool, author_id, Some(category.id), "excel").await;

        let deleted = service.delete("business").await.unwrap();

        assert_eq!(deleted.courses_detached, 1);
        let category_id: Option<uuid::Uuid> =
            sqlx::query_scalar("SELECT category_id FROM courses WHERE id = $1")
                .bind(course_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(category_id, None);
        assert!(matches!(
            service.get_by_slug("business").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires PostgreSQL; run with --features db-tests")]
    async fn test_delete_missing_category(pool: PgPool) {
        let service = CategoryService::new(pool);

        assert!(matches!(
            service.delete("nope").await,
            Err(AppError::NotFound(_))
        ));
    }
}
