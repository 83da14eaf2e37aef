//! Modelo de User
//!
//! Mapea exactamente a la tabla users. El hash de contraseña vive solo
//! en este struct y nunca se serializa hacia la API.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub gender: String,
    pub mobile_no: String,
    pub signup_type: String,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un usuario nuevo
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub gender: String,
    pub mobile_no: String,
    pub signup_type: String,
}

/// Flags de verificación mutables por el workflow de verificación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFlag {
    Email,
    Mobile,
}

impl VerificationFlag {
    /// Columna de la tabla users que corresponde al flag
    pub fn column(&self) -> &'static str {
        match self {
            VerificationFlag::Email => "is_email_verified",
            VerificationFlag::Mobile => "is_mobile_verified",
        }
    }
}

/// Estado de verificación derivado de los dos flags.
///
/// Las transiciones son monotónicas: los flags solo pasan de false a true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Unverified,
    PartiallyVerified,
    Verified,
}

impl User {
    pub fn verification_status(&self) -> VerificationStatus {
        match (self.is_email_verified, self.is_mobile_verified) {
            (false, false) => VerificationStatus::Unverified,
            (true, true) => VerificationStatus::Verified,
            _ => VerificationStatus::PartiallyVerified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_flags(email: bool, mobile: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            full_name: "A B".to_string(),
            gender: "m".to_string(),
            mobile_no: "+15550000000".to_string(),
            signup_type: "e".to_string(),
            is_email_verified: email,
            is_mobile_verified: mobile,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_verification_status() {
        assert_eq!(
            user_with_flags(false, false).verification_status(),
            VerificationStatus::Unverified
        );
        assert_eq!(
            user_with_flags(true, false).verification_status(),
            VerificationStatus::PartiallyVerified
        );
        assert_eq!(
            user_with_flags(false, true).verification_status(),
            VerificationStatus::PartiallyVerified
        );
        assert_eq!(
            user_with_flags(true, true).verification_status(),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn test_verification_flag_columns() {
        assert_eq!(VerificationFlag::Email.column(), "is_email_verified");
        assert_eq!(VerificationFlag::Mobile.column(), "is_mobile_verified");
    }
}
