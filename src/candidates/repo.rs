use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::candidates::dto::CandidateFields;
use crate::error::ApiError;
use crate::pagination::{check_page_bounds, like_pattern, offset, Page, PAGE_SIZE};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub status: String,
}

const SEARCH_PREDICATE: &str = "($1::text IS NULL OR name ILIKE $1 OR position ILIKE $1)";

/// One page of the candidate set, filtered over name and position. Page
/// bounds are enforced the same way as for employees.
pub async fn list_page(
    db: &PgPool,
    filter: Option<&str>,
    page: i64,
) -> Result<Page<Candidate>, ApiError> {
    let pattern = filter.map(like_pattern);

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM candidates WHERE {SEARCH_PREDICATE}"
    ))
    .bind(pattern.as_deref())
    .fetch_one(db)
    .await?;

    check_page_bounds(page, total)?;

    let items = sqlx::query_as::<_, Candidate>(&format!(
        r#"
        SELECT id, name, position, status
        FROM candidates
        WHERE {SEARCH_PREDICATE}
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(pattern.as_deref())
    .bind(PAGE_SIZE)
    .bind(offset(page))
    .fetch_all(db)
    .await?;

    Ok(Page {
        items,
        page,
        page_size: PAGE_SIZE,
        total,
        total_pages: crate::pagination::total_pages(total),
    })
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Candidate>> {
    sqlx::query_as::<_, Candidate>(
        r#"
        SELECT id, name, position, status
        FROM candidates
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn get(db: &PgPool, id: i64) -> sqlx::Result<Option<Candidate>> {
    sqlx::query_as::<_, Candidate>(
        r#"
        SELECT id, name, position, status
        FROM candidates
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, fields: &CandidateFields) -> sqlx::Result<Candidate> {
    sqlx::query_as::<_, Candidate>(
        r#"
        INSERT INTO candidates (name, position, status)
        VALUES ($1, $2, $3)
        RETURNING id, name, position, status
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.position)
    .bind(&fields.status)
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &PgPool,
    id: i64,
    fields: &CandidateFields,
) -> sqlx::Result<Option<Candidate>> {
    sqlx::query_as::<_, Candidate>(
        r#"
        UPDATE candidates
        SET name = $2, position = $3, status = $4
        WHERE id = $1
        RETURNING id, name, position, status
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.position)
    .bind(&fields.status)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(db)
        .await
}
