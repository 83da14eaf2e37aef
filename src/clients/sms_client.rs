//! Cliente del proveedor de SMS para despacho de códigos OTP

use anyhow::{anyhow, Result};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SmsClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl SmsClient {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    pub async fn send_otp(&self, mobile_no: &str, code: &str) -> Result<()> {
        let base_url = self
            .base_url
            .as_ref()
            .ok_or_else(|| anyhow!("SMS_PROVIDER_URL no configurado"))?;

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("To", mobile_no.to_string());
        form_body.insert(
            "Body",
            format!("Tu código de verificación es {}", code),
        );

        let response = self
            .client
            .post(base_url)
            .form(&form_body)
            .send()
            .await
            .map_err(|e| anyhow!("Error llamando al proveedor de SMS: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Proveedor de SMS respondió {}: {}", status, error_text));
        }

        Ok(())
    }
}
