use crate::dto::company_dto::{RegisterCompanyRequest, UpdateCompanyRequest};
use crate::models::company::{CompanyProfile, ImageKind};
use crate::utils::errors::{map_unique_violation, AppError};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        data: &RegisterCompanyRequest,
    ) -> Result<CompanyProfile, AppError> {
        let result = sqlx::query_as::<_, CompanyProfile>(
            r#"
            INSERT INTO company_profiles (
                id, owner_id, company_name, address, city, state, country,
                postal_code, website, industry, founded_date, description,
                social_links, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&data.company_name)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.postal_code)
        .bind(&data.website)
        .bind(&data.industry)
        .bind(data.founded_date)
        .bind(&data.description)
        .bind(data.social_links.clone().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<CompanyProfile>, AppError> {
        let result = sqlx::query_as::<_, CompanyProfile>(
            "SELECT * FROM company_profiles WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn exists_for_owner(&self, owner_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM company_profiles WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    /// Actualización parcial: solo toca las columnas provistas.
    ///
    /// Los campos ausentes llegan como NULL y COALESCE conserva el valor
    /// actual; updated_at se refresca siempre.
    pub async fn update_partial(
        &self,
        owner_id: Uuid,
        data: &UpdateCompanyRequest,
    ) -> Result<Option<CompanyProfile>, AppError> {
        let result = sqlx::query_as::<_, CompanyProfile>(
            r#"
            UPDATE company_profiles
            SET company_name = COALESCE($2, company_name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                country = COALESCE($6, country),
                postal_code = COALESCE($7, postal_code),
                industry = COALESCE($8, industry),
                website = COALESCE($9, website),
                founded_date = COALESCE($10, founded_date),
                description = COALESCE($11, description),
                social_links = COALESCE($12, social_links),
                updated_at = NOW()
            WHERE owner_id = $1
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.company_name)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.postal_code)
        .bind(&data.industry)
        .bind(&data.website)
        .bind(data.founded_date)
        .bind(&data.description)
        .bind(data.social_links.clone().map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Actualización de una sola columna de imagen, usada exclusivamente
    /// por el adaptador de subida de assets
    pub async fn update_image_url(
        &self,
        owner_id: Uuid,
        kind: ImageKind,
        url: &str,
    ) -> Result<Option<CompanyProfile>, AppError> {
        // kind.column() es un nombre de columna estático, no input del cliente
        let query = format!(
            "UPDATE company_profiles SET {} = $2, updated_at = NOW() WHERE owner_id = $1 RETURNING *",
            kind.column()
        );

        let result = sqlx::query_as::<_, CompanyProfile>(&query)
            .bind(owner_id)
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }
}
