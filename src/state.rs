//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado de sesión en memoria: la
//! sesión vive completa en el token firmado que porta el cliente.

use sqlx::PgPool;

use crate::clients::identity_client::IdentityClient;
use crate::clients::sms_client::SmsClient;
use crate::clients::storage_client::StorageClient;
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub identity: IdentityClient,
    pub sms: SmsClient,
    pub storage: StorageClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let identity = IdentityClient::new(config.identity_provider_url.clone());
        let sms = SmsClient::new(config.sms_provider_url.clone());
        let storage = StorageClient::new(config.storage_upload_url.clone());

        Self {
            pool,
            config,
            identity,
            sms,
            storage,
        }
    }
}
