use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::authors::dtos::{
    AuthorResponseDto, CreateAuthorDto, DeleteAuthorResponseDto, UpdateAuthorDto,
};
use crate::features::authors::models::Author;
use crate::shared::relations::COURSE_AUTHOR;
use crate::shared::types::PaginationQuery;

/// Author columns joined with the owning user's name fields.
/// Expects the author row aliased `a` and the user row aliased `u`.
const AUTHOR_COLUMNS: &str = r#"
    a.id, a.user_id, a.bio, a.specialization, a.avatar, a.created_at,
    u.username, u.first_name, u.last_name
"#;

/// Service for author profile operations
pub struct AuthorService {
    pool: PgPool,
}

impl AuthorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an author profile for an existing user
    pub async fn create(&self, dto: CreateAuthorDto) -> Result<AuthorResponseDto> {
        let query = format!(
            r#"
            WITH a AS (
                INSERT INTO authors (user_id, bio, specialization, avatar)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {AUTHOR_COLUMNS}
            FROM a
            JOIN users u ON u.id = a.user_id
            "#
        );

        let author: Author = sqlx::query_as(&query)
            .bind(dto.user_id)
            .bind(&dto.bio)
            .bind(&dto.specialization)
            .bind(&dto.avatar)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        tracing::info!(
            "Author created: id={}, user_id={}",
            author.id,
            author.user_id
        );

        Ok(author.into())
    }

    /// List authors, newest first
    pub async fn list(&self, params: &PaginationQuery) -> Result<(Vec<AuthorResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count authors: {:?}", e);
                AppError::Database(e)
            })?;

        let query = format!(
            r#"
            SELECT {AUTHOR_COLUMNS}
            FROM authors a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let authors: Vec<Author> = sqlx::query_as(&query)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list authors: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((authors.into_iter().map(Into::into).collect(), total))
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<AuthorResponseDto> {
        let query = format!(
            r#"
            SELECT {AUTHOR_COLUMNS}
            FROM authors a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#
        );

        let author: Option<Author> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get author: {:?}", e);
                AppError::Database(e)
            })?;

        author
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Partially update an author; an empty avatar clears it
    pub async fn update(&self, id: Uuid, dto: UpdateAuthorDto) -> Result<AuthorResponseDto> {
        let query = format!(
            r#"
            WITH a AS (
                UPDATE authors
                SET bio = COALESCE($1, bio),
                    specialization = COALESCE($2, specialization),
                    avatar = CASE WHEN $3::text IS NULL THEN avatar ELSE NULLIF($3::text, '') END
                WHERE id = $4
                RETURNING *
            )
            SELECT {AUTHOR_COLUMNS}
            FROM a
            JOIN users u ON u.id = a.user_id
            "#
        );

        let author: Option<Author> = sqlx::query_as(&query)
            .bind(&dto.bio)
            .bind(&dto.specialization)
            .bind(&dto.avatar)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        author
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author together with every course they own
    pub async fn delete(&self, id: Uuid) -> Result<DeleteAuthorResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let courses_deleted = sqlx::query(&COURSE_AUTHOR.dependents_statement())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?
            .rows_affected();

        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Author deleted: id={}, courses_deleted={}",
            id,
            courses_deleted
        );

        Ok(DeleteAuthorResponseDto {
            id,
            courses_deleted,
        })
    }
}
