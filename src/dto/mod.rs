//! DTOs de la API
//!
//! Requests validados y responses serializables. El envelope de éxito
//! es uniforme: `{success: true, message?, data}`.

pub mod auth_dto;
pub mod company_dto;

use serde::Serialize;

/// Response genérica de éxito
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Éxito sin payload (verificaciones, health)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let response = ApiResponse::success_with_message(serde_json::json!({"x": 1}), "ok");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"]["x"], 1);
    }

    #[test]
    fn test_message_only_omits_data() {
        let response = ApiResponse::message("verificado");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("data").is_none());
    }
}
