use crate::models::otp::MobileOtp;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct OtpRepository {
    pool: PgPool,
}

impl OtpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Emitir un código para el usuario reemplazando el anterior.
    ///
    /// mobile_otps tiene user_id único: un solo código activo por usuario.
    pub async fn replace_for_user(
        &self,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<MobileOtp, AppError> {
        let result = sqlx::query_as::<_, MobileOtp>(
            r#"
            INSERT INTO mobile_otps (id, user_id, code, attempts, expires_at, created_at)
            VALUES ($1, $2, $3, 0, $4, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET code = EXCLUDED.code,
                attempts = 0,
                expires_at = EXCLUDED.expires_at,
                created_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(code)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<MobileOtp>, AppError> {
        let result = sqlx::query_as::<_, MobileOtp>(
            "SELECT * FROM mobile_otps WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn increment_attempts(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE mobile_otps SET attempts = attempts + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    /// Consumir el código activo del usuario
    pub async fn delete_for_user(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM mobile_otps WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
