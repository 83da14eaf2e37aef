use crate::models::user::{NewUser, User, VerificationFlag};
use crate::utils::errors::{map_unique_violation, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, email, password_hash, full_name, gender, mobile_no,
                signup_type, is_email_verified, is_mobile_verified, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, FALSE, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.full_name)
        .bind(&new_user.gender)
        .bind(&new_user.mobile_no)
        .bind(&new_user.signup_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    /// Actualizar exactamente un flag de verificación.
    ///
    /// Monotónico en este contrato: el workflow solo escribe true.
    pub async fn set_verification_flag(
        &self,
        user_id: Uuid,
        flag: VerificationFlag,
        value: bool,
    ) -> Result<Option<User>, AppError> {
        // flag.column() es un nombre de columna estático, no input del cliente
        let query = format!(
            "UPDATE users SET {} = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
            flag.column()
        );

        let result = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }
}
