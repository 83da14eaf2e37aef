//! Cliente del proveedor de identidad federada
//!
//! El registro espeja la cuenta en el proveedor externo best-effort:
//! el registro relacional es la fuente de verdad y un fallo aquí jamás
//! debe fallar la respuesta de registro.

use anyhow::{anyhow, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MirrorUserRequest {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl IdentityClient {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    pub async fn mirror_user(&self, payload: &MirrorUserRequest) -> Result<()> {
        let base_url = match &self.base_url {
            Some(url) => url,
            None => {
                log::debug!("IDENTITY_PROVIDER_URL no configurado, se omite el espejo de cuenta");
                return Ok(());
            }
        };

        let url = format!("{}/accounts", base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| anyhow!("Error llamando al proveedor de identidad: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Proveedor de identidad respondió {}: {}",
                status,
                error_text
            ));
        }

        log::info!("✅ Cuenta espejada en el proveedor de identidad: {}", payload.uid);
        Ok(())
    }
}
