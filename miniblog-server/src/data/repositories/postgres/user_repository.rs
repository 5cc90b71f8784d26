use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role: String,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role
            "#,
        )
        .bind(input.username)
        .bind(input.email)
        .bind(input.password_hash)
        .bind(input.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        User::new(row.id, row.username, row.email, Role::from_db(&row.role))
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, email, role, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        if let Some(r) = row {
            let user = User::new(r.id, r.username, r.email, Role::from_db(&r.role))
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;

            Ok(Some(UserCredentials {
                user,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key") => "username",
            Some("users_email_key") => "email",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
