//! DTOs de autenticación y verificación

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

/// Request de registro de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_password")]
    pub password: String,

    #[validate(length(min = 2, max = 255, message = "El nombre debe tener entre 2 y 255 caracteres"))]
    pub full_name: String,

    #[validate(custom = "crate::utils::validation::validate_gender")]
    pub gender: String,

    #[validate(custom = "crate::utils::validation::validate_mobile_no")]
    pub mobile_no: String,
}

/// Datos devueltos al registrar (nunca incluye el hash)
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

/// Usuario dentro de la response de login
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub gender: String,
    pub mobile_no: String,
    pub is_mobile_verified: bool,
    pub is_email_verified: bool,
}

impl From<User> for LoginUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            gender: user.gender,
            mobile_no: user.mobile_no,
            is_mobile_verified: user.is_mobile_verified,
            is_email_verified: user.is_email_verified,
        }
    }
}

/// Payload de la response de login
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub user: LoginUser,
}

/// Request para emitir un código OTP de verificación móvil
#[derive(Debug, Deserialize)]
pub struct RequestOtpRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Request de verificación móvil
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyMobileRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    #[validate(length(equal = 6, message = "El código debe tener 6 dígitos"))]
    pub otp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            email: "a@b.com".to_string(),
            password: "Passw0rd!".to_string(),
            full_name: "A B".to_string(),
            gender: "m".to_string(),
            mobile_no: "+15550000000".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_fields() {
        let request = RegisterRequest {
            email: "no-es-email".to_string(),
            password: "corta".to_string(),
            full_name: "A".to_string(),
            gender: "x".to_string(),
            mobile_no: "123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("gender"));
        assert!(fields.contains_key("mobile_no"));
    }

    #[test]
    fn test_verify_mobile_request_field_names() {
        let request: VerifyMobileRequest =
            serde_json::from_value(serde_json::json!({
                "userId": "550e8400-e29b-41d4-a716-446655440000",
                "otp": "123456"
            }))
            .unwrap();
        assert_eq!(request.otp, "123456");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_user_never_exposes_hash() {
        // El tipo LoginUser no tiene campo de hash; la serialización
        // tampoco puede filtrarlo
        let body = serde_json::to_value(LoginUser {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            full_name: "A B".to_string(),
            gender: "m".to_string(),
            mobile_no: "+15550000000".to_string(),
            is_mobile_verified: false,
            is_email_verified: false,
        })
        .unwrap();
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }
}
