//! Adaptador de subida de assets
//!
//! Valida tipo y tamaño de la imagen, delega la transformación y el
//! storage al proveedor externo y persiste la URL durable en el perfil.

use sqlx::PgPool;
use uuid::Uuid;

use crate::clients::storage_client::StorageClient;
use crate::models::company::{CompanyProfile, ImageKind};
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;

/// Validar tipo MIME y tamaño según la política del tipo de imagen
pub fn validate_image(kind: ImageKind, content_type: &str, size: usize) -> Result<(), AppError> {
    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(
            "Solo se permiten archivos de imagen".to_string(),
        ));
    }

    if size == 0 {
        return Err(AppError::BadRequest("El archivo está vacío".to_string()));
    }

    if size > kind.max_bytes() {
        return Err(AppError::BadRequest(format!(
            "La imagen excede el tamaño máximo de {} MB",
            kind.max_bytes() / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Public id determinístico por perfil y tipo: re-subir sobrescribe
pub fn public_id(profile_id: Uuid, kind: ImageKind) -> String {
    format!("company/{}/{}", profile_id, kind.slug())
}

pub struct AssetService {
    companies: CompanyRepository,
    storage: StorageClient,
}

impl AssetService {
    pub fn new(pool: PgPool, storage: StorageClient) -> Self {
        Self {
            companies: CompanyRepository::new(pool),
            storage,
        }
    }

    /// Subir una imagen de perfil y devolver la URL junto al perfil
    /// actualizado
    pub async fn upload(
        &self,
        owner_id: Uuid,
        kind: ImageKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(String, CompanyProfile), AppError> {
        let profile = self
            .companies
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Primero registra el perfil de empresa".to_string())
            })?;

        validate_image(kind, content_type, bytes.len())?;

        let url = self
            .storage
            .upload_image(&public_id(profile.id, kind), content_type, bytes)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let updated = self
            .companies
            .update_image_url(owner_id, kind, &url)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Perfil de empresa no encontrado".to_string())
            })?;

        Ok((url, updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_rejects_non_image() {
        let result = validate_image(ImageKind::Logo, "application/pdf", 1024);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_image_rejects_oversize() {
        let result = validate_image(ImageKind::Logo, "image/png", 3 * 1024 * 1024);
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        // El banner admite hasta 5 MB
        assert!(validate_image(ImageKind::Banner, "image/png", 3 * 1024 * 1024).is_ok());
    }

    #[test]
    fn test_validate_image_rejects_empty() {
        let result = validate_image(ImageKind::Logo, "image/png", 0);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_image_accepts_valid() {
        assert!(validate_image(ImageKind::Logo, "image/jpeg", 500 * 1024).is_ok());
    }

    #[test]
    fn test_public_id_deterministic() {
        let profile_id = Uuid::new_v4();
        assert_eq!(
            public_id(profile_id, ImageKind::Logo),
            public_id(profile_id, ImageKind::Logo)
        );
        assert_ne!(
            public_id(profile_id, ImageKind::Logo),
            public_id(profile_id, ImageKind::Banner)
        );
    }
}
