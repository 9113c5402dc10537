use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;

use crate::employees::dto::EmployeeFields;
use crate::error::ApiError;
use crate::pagination::{check_page_bounds, like_pattern, offset, Page, PAGE_SIZE};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub hire_date: Date,
    pub status: String,
}

const SEARCH_PREDICATE: &str =
    "($1::text IS NULL OR first_name ILIKE $1 OR last_name ILIKE $1 OR position ILIKE $1)";

/// One page of the employee set, optionally narrowed by a case-insensitive
/// substring filter over first name, last name and position.
pub async fn list_page(
    db: &PgPool,
    filter: Option<&str>,
    page: i64,
) -> Result<Page<Employee>, ApiError> {
    let pattern = filter.map(like_pattern);

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM employees WHERE {SEARCH_PREDICATE}"
    ))
    .bind(pattern.as_deref())
    .fetch_one(db)
    .await?;

    check_page_bounds(page, total)?;

    let items = sqlx::query_as::<_, Employee>(&format!(
        r#"
        SELECT id, first_name, last_name, position, hire_date, status
        FROM employees
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

/// Full unfiltered set in insertion order, for export.
pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Employee>> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, position, hire_date, status
        FROM employees
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn get(db: &PgPool, id: i64) -> sqlx::Result<Option<Employee>> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, position, hire_date, status
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, fields: &EmployeeFields) -> sqlx::Result<Employee> {
    sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (first_name, last_name, position, hire_date, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, first_name, last_name, position, hire_date, status
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.position)
    .bind(fields.hire_date)
    .bind(&fields.status)
    .fetch_one(db)
    .await
}

/// Full replace of the mutable fields; the id never changes.
pub async fn update(
    db: &PgPool,
    id: i64,
    fields: &EmployeeFields,
) -> sqlx::Result<Option<Employee>> {
    sqlx::query_as::<_, Employee>(
        r#"
        UPDATE employees
        SET first_name = $2, last_name = $3, position = $4, hire_date = $5, status = $6
        WHERE id = $1
        RETURNING id, first_name, last_name, position, hire_date, status
        "#,
    )
    .bind(id)
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.position)
    .bind(fields.hire_date)
    .bind(&fields.status)
    .fetch_optional(db)
    .await
}

/// Permanent removal; deleting the same id twice reports absence the second
/// time.
pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ana() -> EmployeeFields {
        EmployeeFields {
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            position: "Engineer".into(),
            hire_date: date!(2024 - 01 - 10),
            status: "Active".into(),
        }
    }

    #[sqlx::test]
    async fn insert_then_get_roundtrip(pool: PgPool) {
        let created = insert(&pool, &ana()).await.expect("insert");

        let fetched = get(&pool, created.id)
            .await
            .expect("get")
            .expect("inserted employee is visible");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.first_name, "Ana");
        assert_eq!(fetched.last_name, "Ruiz");
        assert_eq!(fetched.position, "Engineer");
        assert_eq!(fetched.hire_date, date!(2024 - 01 - 10));
        assert_eq!(fetched.status, "Active");
    }

    #[sqlx::test]
    async fn delete_is_terminal(pool: PgPool) {
        let created = insert(&pool, &ana()).await.expect("insert");

        assert!(delete(&pool, created.id).await.expect("first delete"));
        assert!(get(&pool, created.id).await.expect("get").is_none());
        // The second delete of the same id reports absence.
        assert!(!delete(&pool, created.id).await.expect("second delete"));
    }

    #[sqlx::test]
    async fn filter_returns_only_matching_records(pool: PgPool) {
        insert(&pool, &ana()).await.expect("insert ana");
        let other = EmployeeFields {
            first_name: "Luis".into(),
            last_name: "Soto".into(),
            position: "Clerk".into(),
            hire_date: date!(2023 - 06 - 01),
            status: "Active".into(),
        };
        insert(&pool, &other).await.expect("insert luis");

        let page = list_page(&pool, Some("ana"), 1).await.expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "Ana");

        let empty = list_page(&pool, Some("xyz"), 1).await.expect("list");
        assert_eq!(empty.total, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }
}
