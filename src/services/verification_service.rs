//! Workflow de verificación de cuenta
//!
//! Estados por usuario: Unverified → PartiallyVerified → Verified,
//! derivados de los dos flags. Las transiciones son monotónicas: un flag
//! verificado nunca se resetea.
//!
//! La verificación móvil emite y coteja códigos reales: 6 dígitos,
//! vigencia corta, intentos limitados y throttle de re-emisión.

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::clients::sms_client::SmsClient;
use crate::models::otp::{MobileOtp, OTP_TTL_SECS};
use crate::models::user::VerificationFlag;
use crate::repositories::otp_repository::OtpRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct VerificationService {
    users: UserRepository,
    otps: OtpRepository,
    sms: SmsClient,
    dev_mode: bool,
}

/// Generar un código OTP de 6 dígitos
fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

impl VerificationService {
    pub fn new(pool: PgPool, sms: SmsClient, dev_mode: bool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            otps: OtpRepository::new(pool),
            sms,
            dev_mode,
        }
    }

    /// Emitir un código OTP y despacharlo al móvil del usuario.
    ///
    /// El despacho es best-effort: un fallo del proveedor de SMS se
    /// loggea y no falla la emisión.
    pub async fn request_otp(&self, user_id: Uuid) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        if user.is_mobile_verified {
            return Ok("El número de móvil ya está verificado".to_string());
        }

        // Throttle de re-emisión por usuario
        if let Some(existing) = self.otps.find_by_user(user_id).await? {
            if !existing.is_expired() && !existing.can_reissue() {
                return Err(AppError::RateLimitExceeded);
            }
        }

        let code = generate_code();
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(OTP_TTL_SECS);
        self.otps.replace_for_user(user_id, &code, expires_at).await?;

        match self.sms.send_otp(&user.mobile_no, &code).await {
            Ok(()) => log::info!("📱 Código OTP enviado a usuario {}", user_id),
            Err(e) => {
                log::warn!("No se pudo despachar el OTP para {}: {}", user_id, e);
                if self.dev_mode {
                    log::debug!("OTP de desarrollo para {}: {}", user_id, code);
                }
            }
        }

        Ok("Código de verificación enviado".to_string())
    }

    /// Cotejar el código enviado y marcar el móvil como verificado
    pub async fn verify_mobile(&self, user_id: Uuid, submitted: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        // Re-verificar un usuario ya verificado es un no-op exitoso
        if user.is_mobile_verified {
            return Ok("El número de móvil ya está verificado".to_string());
        }

        let otp = self
            .otps
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("No hay código activo, solicita uno nuevo".to_string())
            })?;

        self.check_submission(&otp, submitted).await?;

        self.otps.delete_for_user(user_id).await?;
        let updated = self
            .users
            .set_verification_flag(user_id, VerificationFlag::Mobile, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        log::info!(
            "✅ Móvil verificado para usuario {} (estado: {:?})",
            user_id,
            updated.verification_status()
        );
        Ok("Número de móvil verificado exitosamente".to_string())
    }

    async fn check_submission(&self, otp: &MobileOtp, submitted: &str) -> Result<(), AppError> {
        if otp.is_expired() {
            self.otps.delete_for_user(otp.user_id).await?;
            return Err(AppError::BadRequest(
                "El código expiró, solicita uno nuevo".to_string(),
            ));
        }

        if otp.attempts_exhausted() {
            return Err(AppError::BadRequest(
                "Demasiados intentos fallidos, solicita un código nuevo".to_string(),
            ));
        }

        if otp.code != submitted {
            self.otps.increment_attempts(otp.id).await?;
            return Err(AppError::BadRequest("Código incorrecto".to_string()));
        }

        Ok(())
    }

    /// Marcar el email como verificado. Idempotente: re-verificar es
    /// un no-op exitoso.
    pub async fn verify_email(&self, user_id: Uuid) -> Result<String, AppError> {
        let updated = self
            .users
            .set_verification_flag(user_id, VerificationFlag::Email, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        log::info!(
            "✅ Email verificado para usuario {} (estado: {:?})",
            user_id,
            updated.verification_status()
        );
        Ok("Email verificado exitosamente".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_format() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
