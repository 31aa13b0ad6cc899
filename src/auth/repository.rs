// Database repository for user records

use crate::auth::{
    error::AuthError,
    models::{DatabaseSummary, User},
};
use sqlx::PgPool;

/// User repository for database operations
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Unique constraint on email
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::UserAlreadyExists;
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Ok(user)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Check if an email exists
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists.0)
    }

    /// Replace a user's password hash
    pub async fn update_password(
        &self,
        user_id: i32,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }

    /// Databases linked to a user, with the user's role on each.
    /// Carried in the login response only.
    pub async fn find_databases_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<DatabaseSummary>, AuthError> {
        let databases = sqlx::query_as::<_, DatabaseSummary>(
            "SELECT d.id, d.name, ud.role FROM databases d \
             JOIN user_databases ud ON ud.database_id = d.id \
             WHERE ud.user_id = $1 \
             ORDER BY d.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(databases)
    }
}
