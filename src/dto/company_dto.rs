//! DTOs del perfil de empresa

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::company::CompanyProfile;

/// Request para registrar el perfil de empresa
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCompanyRequest {
    #[validate(
        length(min = 2, max = 255, message = "El nombre de la empresa debe tener entre 2 y 255 caracteres"),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub company_name: String,

    #[validate(
        length(min = 5, message = "La dirección es requerida"),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub address: String,

    #[validate(length(min = 2, max = 50, message = "La ciudad es requerida"))]
    pub city: String,

    #[validate(length(min = 2, max = 50, message = "El estado es requerido"))]
    pub state: String,

    #[validate(length(min = 2, max = 50, message = "El país es requerido"))]
    pub country: String,

    #[validate(length(min = 3, max = 20, message = "El código postal es requerido"))]
    pub postal_code: String,

    #[validate(length(min = 2, message = "La industria es requerida"))]
    pub industry: String,

    #[validate(url(message = "El sitio web debe ser una URL válida"))]
    pub website: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_founded_date")]
    pub founded_date: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "La descripción no puede exceder 2000 caracteres"))]
    pub description: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_social_links")]
    pub social_links: Option<HashMap<String, String>>,
}

/// Request de actualización parcial del perfil.
///
/// Estructura tipada que enumera los campos permitidos: id y owner_id
/// no existen aquí, así que cualquier intento de mutarlos se descarta
/// silenciosamente al deserializar.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(
        length(min = 2, max = 255, message = "El nombre de la empresa debe tener entre 2 y 255 caracteres"),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub company_name: Option<String>,

    #[validate(
        length(min = 5, message = "La dirección es requerida"),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub address: Option<String>,

    #[validate(length(min = 2, max = 50, message = "La ciudad es requerida"))]
    pub city: Option<String>,

    #[validate(length(min = 2, max = 50, message = "El estado es requerido"))]
    pub state: Option<String>,

    #[validate(length(min = 2, max = 50, message = "El país es requerido"))]
    pub country: Option<String>,

    #[validate(length(min = 3, max = 20, message = "El código postal es requerido"))]
    pub postal_code: Option<String>,

    #[validate(length(min = 2, message = "La industria es requerida"))]
    pub industry: Option<String>,

    #[validate(url(message = "El sitio web debe ser una URL válida"))]
    pub website: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_founded_date")]
    pub founded_date: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "La descripción no puede exceder 2000 caracteres"))]
    pub description: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_social_links")]
    pub social_links: Option<HashMap<String, String>>,
}

impl UpdateCompanyRequest {
    /// Una actualización sin campos es un request inválido
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
            && self.industry.is_none()
            && self.website.is_none()
            && self.founded_date.is_none()
            && self.description.is_none()
            && self.social_links.is_none()
    }
}

/// Response de perfil de empresa para la API
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub website: Option<String>,
    pub industry: String,
    pub founded_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub social_links: Option<HashMap<String, String>>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyProfile> for CompanyResponse {
    fn from(profile: CompanyProfile) -> Self {
        Self {
            id: profile.id,
            owner_id: profile.owner_id,
            company_name: profile.company_name,
            address: profile.address,
            city: profile.city,
            state: profile.state,
            country: profile.country,
            postal_code: profile.postal_code,
            website: profile.website,
            industry: profile.industry,
            founded_date: profile.founded_date,
            description: profile.description,
            social_links: profile.social_links.map(|links| links.0),
            logo_url: profile.logo_url,
            banner_url: profile.banner_url,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Payload de la response de subida de imagen
#[derive(Debug, Serialize)]
pub struct UploadImageData {
    pub url: String,
    pub company: CompanyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_request() -> RegisterCompanyRequest {
        RegisterCompanyRequest {
            company_name: "Acme SA".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            city: "Springfield".to_string(),
            state: "Oregon".to_string(),
            country: "USA".to_string(),
            postal_code: "97475".to_string(),
            industry: "Software".to_string(),
            website: None,
            founded_date: None,
            description: None,
            social_links: None,
        }
    }

    #[test]
    fn test_register_company_valid() {
        assert!(valid_register_request().validate().is_ok());
    }

    #[test]
    fn test_register_company_rejects_bad_website() {
        let mut request = valid_register_request();
        request.website = Some("no-es-url".to_string());
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("website"));
    }

    #[test]
    fn test_register_company_rejects_blank_name() {
        let mut request = valid_register_request();
        request.company_name = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdateCompanyRequest::default().is_empty());

        let update = UpdateCompanyRequest {
            city: Some("Lyon".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_request_ignores_forbidden_keys() {
        // id y owner_id no son campos del DTO: se descartan al deserializar
        let update: UpdateCompanyRequest = serde_json::from_value(serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "owner_id": "550e8400-e29b-41d4-a716-446655440001",
            "city": "Lyon"
        }))
        .unwrap();
        assert_eq!(update.city.as_deref(), Some("Lyon"));
        assert!(!update.is_empty());
    }
}
