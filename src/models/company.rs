//! Modelo de CompanyProfile
//!
//! Este módulo contiene el struct CompanyProfile y el tipo de imagen
//! subible. Mapea exactamente a la tabla company_profiles (1:1 con users
//! vía owner_id único).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// CompanyProfile principal - mapea exactamente a la tabla company_profiles
#[derive(Debug, Clone, FromRow)]
pub struct CompanyProfile {
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
    pub social_links: Option<Json<HashMap<String, String>>>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tipo de imagen del perfil, con su política de tamaño
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Logo,
    Banner,
}

impl ImageKind {
    /// Columna de la tabla company_profiles que guarda la URL
    pub fn column(&self) -> &'static str {
        match self {
            ImageKind::Logo => "logo_url",
            ImageKind::Banner => "banner_url",
        }
    }

    /// Segmento del public id en el proveedor de storage
    pub fn slug(&self) -> &'static str {
        match self {
            ImageKind::Logo => "logo",
            ImageKind::Banner => "banner",
        }
    }

    /// Tamaño máximo permitido en bytes
    pub fn max_bytes(&self) -> usize {
        match self {
            ImageKind::Logo => 2 * 1024 * 1024,
            ImageKind::Banner => 5 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_kind_policy() {
        assert_eq!(ImageKind::Logo.column(), "logo_url");
        assert_eq!(ImageKind::Banner.column(), "banner_url");
        assert_eq!(ImageKind::Logo.max_bytes(), 2 * 1024 * 1024);
        assert_eq!(ImageKind::Banner.max_bytes(), 5 * 1024 * 1024);
    }
}
