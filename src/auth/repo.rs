use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::config::SeedAdminConfig;
use crate::error::{unique_violation, ApiError};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by exact username match.
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with an already hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}

/// Maps a rejected user insert to the conflict matching the violated
/// constraint: duplicate username and duplicate email each get their own
/// message, anything else stays a generic database error.
pub fn user_conflict(e: sqlx::Error) -> ApiError {
    match unique_violation(&e) {
        Some("users_username_key") => ApiError::UsernameTaken,
        Some("users_email_key") => ApiError::EmailTaken,
        _ => ApiError::Database(e),
    }
}

/// Idempotent bootstrap: seed the reserved admin user if absent so that
/// first login is always possible. Invoked once at process start, after
/// migrations.
pub async fn ensure_seed_admin(db: &PgPool, seed: &SeedAdminConfig) -> anyhow::Result<()> {
    if User::find_by_username(db, &seed.username).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(&seed.password)?;
    let user = User::create(db, &seed.username, &seed.email, &hash).await?;
    info!(user_id = %user.id, username = %user.username, "seeded admin user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;

    async fn user_count(db: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .expect("count users")
    }

    #[sqlx::test]
    async fn seed_admin_is_idempotent(pool: PgPool) {
        let seed = SeedAdminConfig {
            username: "adm".into(),
            email: "admin@correo.com".into(),
            password: "admin123".into(),
        };
        ensure_seed_admin(&pool, &seed).await.expect("first seed");
        ensure_seed_admin(&pool, &seed).await.expect("second seed");

        assert_eq!(user_count(&pool).await, 1);
        let admin = User::find_by_username(&pool, "adm")
            .await
            .expect("lookup")
            .expect("seeded admin present");
        assert!(verify_password("admin123", &admin.password_hash).expect("verify"));
    }

    #[sqlx::test]
    async fn duplicate_username_is_a_conflict_and_leaves_users_unchanged(pool: PgPool) {
        User::create(&pool, "ana", "ana@example.com", "hash")
            .await
            .expect("first create");

        let err = User::create(&pool, "ana", "other@example.com", "hash")
            .await
            .expect_err("duplicate username must be rejected");
        assert!(matches!(user_conflict(err), ApiError::UsernameTaken));
        assert_eq!(user_count(&pool).await, 1);
    }

    #[sqlx::test]
    async fn duplicate_email_is_a_distinct_conflict(pool: PgPool) {
        User::create(&pool, "ana", "ana@example.com", "hash")
            .await
            .expect("first create");

        let err = User::create(&pool, "luis", "ana@example.com", "hash")
            .await
            .expect_err("duplicate email must be rejected");
        let conflict = user_conflict(err);
        assert!(matches!(conflict, ApiError::EmailTaken));
        assert_eq!(conflict.to_string(), "Email already registered");
    }
}
