//! Cliente del proveedor de transformación y storage de imágenes
//!
//! El public id es determinístico por perfil y tipo de imagen, así que
//! subir de nuevo sobrescribe en lugar de acumular.

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StorageUploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    upload_url: Option<String>,
}

impl StorageClient {
    pub fn new(upload_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, upload_url }
    }

    /// Subir una imagen y devolver la URL durable
    pub async fn upload_image(
        &self,
        public_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let upload_url = self
            .upload_url
            .as_ref()
            .ok_or_else(|| anyhow!("STORAGE_UPLOAD_URL no configurado"))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(public_id.to_string())
            .mime_str(content_type)
            .map_err(|e| anyhow!("Content-type inválido: {}", e))?;

        let form = reqwest::multipart::Form::new()
            .text("public_id", public_id.to_string())
            .text("overwrite", "true")
            .part("file", part);

        let response = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Error llamando al proveedor de storage: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Proveedor de storage respondió {}: {}",
                status,
                error_text
            ));
        }

        let body: StorageUploadResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Error parseando respuesta del storage: {}", e))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| anyhow!("Respuesta del storage sin URL"))
    }
}
