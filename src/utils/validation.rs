//! Utilidades de validación
//!
//! Este módulo contiene los validadores custom de los DTOs
//! y la sanitización de campos de texto libre.

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use validator::ValidationError;

lazy_static! {
    /// Cualquier etiqueta de markup embebida en texto libre
    static ref MARKUP_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Quitar markup embebido de un campo de texto libre antes de persistir
pub fn strip_markup(value: &str) -> String {
    MARKUP_RE.replace_all(value, "").trim().to_string()
}

/// Normalizar un email: trim + minúsculas
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Validar formato de número de móvil: prefijo + opcional y 10-15 dígitos
pub fn validate_mobile_no(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let digit_count = digits.chars().filter(|c| c.is_ascii_digit()).count();
    let only_digits = digits.chars().all(|c| c.is_ascii_digit());

    if !only_digits || digit_count < 10 || digit_count > 15 {
        let mut error = ValidationError::new("mobile_no");
        error.message = Some("Número de móvil inválido".into());
        return Err(error);
    }
    Ok(())
}

/// Validar la fortaleza de una contraseña.
///
/// Mínimo 8 caracteres con minúscula, mayúscula, dígito y un
/// carácter especial.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| !c.is_ascii_alphanumeric());

    if value.len() < 8 || !has_lower || !has_upper || !has_digit || !has_special {
        let mut error = ValidationError::new("password");
        error.message = Some(
            "La contraseña debe tener al menos 8 caracteres con mayúscula, minúscula, número y carácter especial"
                .into(),
        );
        return Err(error);
    }
    Ok(())
}

/// Validar género: m, f u o
pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    if !matches!(value, "m" | "f" | "o") {
        let mut error = ValidationError::new("gender");
        error.message = Some("El género debe ser m, f u o".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que la fecha de fundación no esté en el futuro
pub fn validate_founded_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        let mut error = ValidationError::new("founded_date");
        error.message = Some("La fecha de fundación no puede ser futura".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que cada enlace social sea una URL absoluta
pub fn validate_social_links(value: &HashMap<String, String>) -> Result<(), ValidationError> {
    for (platform, url) in value {
        if !validator::validate_url(url) {
            let mut error = ValidationError::new("social_links");
            error.message = Some(format!("URL inválida para la plataforma '{}'", platform).into());
            return Err(error);
        }
    }
    Ok(())
}

/// Validar que un string no esté vacío después de trim
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some("El campo no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("hola <b>mundo</b>"), "hola mundo");
        assert_eq!(strip_markup("<script>alert(1)</script>texto"), "alert(1)texto");
        assert_eq!(strip_markup("  sin markup  "), "sin markup");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn test_validate_mobile_no() {
        assert!(validate_mobile_no("+15550000000").is_ok());
        assert!(validate_mobile_no("5215550000000").is_ok());
        assert!(validate_mobile_no("123").is_err());
        assert!(validate_mobile_no("+1555000000000000").is_err());
        assert!(validate_mobile_no("+1555abc0000").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Passw0rd!").is_ok());
        assert!(validate_password("short1A!").is_ok());
        assert!(validate_password("todominusculas1!").is_err());
        assert!(validate_password("SINMINUSCULAS1!").is_err());
        assert!(validate_password("SinNumeros!").is_err());
        assert!(validate_password("SinEspecial1").is_err());
        assert!(validate_password("C0rta!").is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("m").is_ok());
        assert!(validate_gender("f").is_ok());
        assert!(validate_gender("o").is_ok());
        assert!(validate_gender("x").is_err());
        assert!(validate_gender("").is_err());
    }

    #[test]
    fn test_validate_founded_date() {
        let past = NaiveDate::from_ymd_opt(2010, 5, 1).unwrap();
        assert!(validate_founded_date(&past).is_ok());

        let future = Utc::now().date_naive() + chrono::Duration::days(30);
        assert!(validate_founded_date(&future).is_err());
    }

    #[test]
    fn test_validate_social_links() {
        let mut links = HashMap::new();
        links.insert("linkedin".to_string(), "https://linkedin.com/company/acme".to_string());
        assert!(validate_social_links(&links).is_ok());

        links.insert("twitter".to_string(), "no-es-url".to_string());
        assert!(validate_social_links(&links).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("texto").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
