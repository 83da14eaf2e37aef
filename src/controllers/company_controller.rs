use axum::extract::Multipart;
use uuid::Uuid;
use validator::Validate;

use crate::dto::company_dto::{
    CompanyResponse, RegisterCompanyRequest, UpdateCompanyRequest, UploadImageData,
};
use crate::dto::ApiResponse;
use crate::models::company::ImageKind;
use crate::repositories::company_repository::CompanyRepository;
use crate::services::asset_service::AssetService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::strip_markup;

pub struct CompanyController {
    companies: CompanyRepository,
    assets: AssetService,
}

impl CompanyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            companies: CompanyRepository::new(state.pool.clone()),
            assets: AssetService::new(state.pool.clone(), state.storage.clone()),
        }
    }

    pub async fn register(
        &self,
        owner_id: Uuid,
        mut request: RegisterCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;
        sanitize_register(&mut request);

        // Pre-check amistoso; la carrera real la resuelve la constraint
        // única sobre owner_id
        if self.companies.exists_for_owner(owner_id).await? {
            return Err(AppError::Conflict(
                "Ya existe un perfil de empresa para este usuario".to_string(),
            ));
        }

        let profile = self.companies.create(owner_id, &request).await?;

        log::info!("🏢 Perfil de empresa creado: {} (owner {})", profile.id, owner_id);

        Ok(ApiResponse::success_with_message(
            CompanyResponse::from(profile),
            "Empresa registrada exitosamente",
        ))
    }

    pub async fn get_profile(
        &self,
        owner_id: Uuid,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        let profile = self
            .companies
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Perfil de empresa no encontrado".to_string()))?;

        Ok(ApiResponse::success(CompanyResponse::from(profile)))
    }

    pub async fn update_profile(
        &self,
        owner_id: Uuid,
        mut request: UpdateCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        if request.is_empty() {
            return Err(AppError::BadRequest("No hay campos para actualizar".to_string()));
        }

        request.validate().map_err(AppError::Validation)?;
        sanitize_update(&mut request);

        let profile = self
            .companies
            .update_partial(owner_id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("Perfil de empresa no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            CompanyResponse::from(profile),
            "Perfil actualizado exitosamente",
        ))
    }

    /// Leer el archivo del multipart y delegarlo al adaptador de assets
    pub async fn upload_image(
        &self,
        owner_id: Uuid,
        kind: ImageKind,
        mut multipart: Multipart,
    ) -> Result<ApiResponse<UploadImageData>, AppError> {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Multipart inválido: {}", e)))?
            .ok_or_else(|| {
                AppError::BadRequest("Se requiere un archivo de imagen".to_string())
            })?;

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Error leyendo el archivo: {}", e)))?;

        let (url, profile) = self
            .assets
            .upload(owner_id, kind, &content_type, bytes.to_vec())
            .await?;

        log::info!("🖼️ Imagen {} actualizada para perfil {}", kind.slug(), profile.id);

        Ok(ApiResponse::success_with_message(
            UploadImageData {
                url,
                company: CompanyResponse::from(profile),
            },
            "Imagen subida exitosamente",
        ))
    }
}

/// Quitar markup de los campos de texto libre antes de persistir
fn sanitize_register(request: &mut RegisterCompanyRequest) {
    request.company_name = strip_markup(&request.company_name);
    request.address = strip_markup(&request.address);
    request.city = strip_markup(&request.city);
    request.state = strip_markup(&request.state);
    request.country = strip_markup(&request.country);
    request.postal_code = request.postal_code.trim().to_string();
    request.industry = strip_markup(&request.industry);
    if let Some(description) = &request.description {
        request.description = Some(strip_markup(description));
    }
}

fn sanitize_update(request: &mut UpdateCompanyRequest) {
    if let Some(value) = &request.company_name {
        request.company_name = Some(strip_markup(value));
    }
    if let Some(value) = &request.address {
        request.address = Some(strip_markup(value));
    }
    if let Some(value) = &request.city {
        request.city = Some(strip_markup(value));
    }
    if let Some(value) = &request.state {
        request.state = Some(strip_markup(value));
    }
    if let Some(value) = &request.country {
        request.country = Some(strip_markup(value));
    }
    if let Some(value) = &request.postal_code {
        request.postal_code = Some(value.trim().to_string());
    }
    if let Some(value) = &request.industry {
        request.industry = Some(strip_markup(value));
    }
    if let Some(value) = &request.description {
        request.description = Some(strip_markup(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_register_strips_markup() {
        let mut request = RegisterCompanyRequest {
            company_name: "Acme <b>SA</b>".to_string(),
            address: "Calle <script>x</script> 1".to_string(),
            city: "Lyon".to_string(),
            state: "Rhône".to_string(),
            country: "Francia".to_string(),
            postal_code: " 69001 ".to_string(),
            industry: "Software".to_string(),
            website: None,
            founded_date: None,
            description: Some("Hacemos <i>cosas</i>".to_string()),
            social_links: None,
        };
        sanitize_register(&mut request);
        assert_eq!(request.company_name, "Acme SA");
        assert_eq!(request.address, "Calle x 1");
        assert_eq!(request.postal_code, "69001");
        assert_eq!(request.description.as_deref(), Some("Hacemos cosas"));
    }

    #[test]
    fn test_sanitize_update_only_touches_supplied() {
        let mut request = UpdateCompanyRequest {
            description: Some("Texto <b>limpio</b>".to_string()),
            ..Default::default()
        };
        sanitize_update(&mut request);
        assert_eq!(request.description.as_deref(), Some("Texto limpio"));
        assert!(request.company_name.is_none());
    }
}
