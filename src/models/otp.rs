//! Modelo de código OTP de verificación móvil
//!
//! Un solo código activo por usuario; emitir uno nuevo reemplaza al
//! anterior.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Vigencia de un código emitido
pub const OTP_TTL_SECS: i64 = 600;

/// Intentos permitidos por código antes de invalidarlo
pub const OTP_MAX_ATTEMPTS: i32 = 5;

/// Tiempo mínimo entre emisiones para el mismo usuario
pub const OTP_REISSUE_SECS: i64 = 60;

/// Código OTP activo - mapea exactamente a la tabla mobile_otps
#[derive(Debug, Clone, FromRow)]
pub struct MobileOtp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub attempts: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl MobileOtp {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= OTP_MAX_ATTEMPTS
    }

    /// Throttle de re-emisión: un código nuevo solo después de
    /// OTP_REISSUE_SECS desde la emisión anterior
    pub fn can_reissue(&self) -> bool {
        Utc::now() >= self.created_at + chrono::Duration::seconds(OTP_REISSUE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp(created_secs_ago: i64, ttl: i64, attempts: i32) -> MobileOtp {
        let created = Utc::now() - chrono::Duration::seconds(created_secs_ago);
        MobileOtp {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            code: "123456".to_string(),
            attempts,
            expires_at: created + chrono::Duration::seconds(ttl),
            created_at: created,
        }
    }

    #[test]
    fn test_is_expired() {
        assert!(!otp(0, OTP_TTL_SECS, 0).is_expired());
        assert!(otp(700, OTP_TTL_SECS, 0).is_expired());
    }

    #[test]
    fn test_attempts_exhausted() {
        assert!(!otp(0, OTP_TTL_SECS, OTP_MAX_ATTEMPTS - 1).attempts_exhausted());
        assert!(otp(0, OTP_TTL_SECS, OTP_MAX_ATTEMPTS).attempts_exhausted());
    }

    #[test]
    fn test_can_reissue() {
        assert!(!otp(10, OTP_TTL_SECS, 0).can_reissue());
        assert!(otp(OTP_REISSUE_SECS + 1, OTP_TTL_SECS, 0).can_reissue());
    }
}
