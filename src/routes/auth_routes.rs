use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    LoginData, LoginRequest, RegisterRequest, RegisteredUser, RequestOtpRequest,
    VerifyMobileRequest,
};
use crate::dto::ApiResponse;
use crate::services::verification_service::VerificationService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email/:user_id", get(verify_email))
        .route("/request-otp", post(request_otp))
        .route("/verify-mobile", post(verify_mobile))
}

fn verification_service(state: &AppState) -> VerificationService {
    VerificationService::new(
        state.pool.clone(),
        state.sms.clone(),
        state.config.is_development(),
    )
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredUser>>), AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn verify_email(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = verification_service(&state).verify_email(user_id).await?;
    Ok(Json(ApiResponse::message(message)))
}

async fn request_otp(
    State(state): State<AppState>,
    Json(request): Json<RequestOtpRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = verification_service(&state)
        .request_otp(request.user_id)
        .await?;
    Ok(Json(ApiResponse::message(message)))
}

async fn verify_mobile(
    State(state): State<AppState>,
    Json(request): Json<VerifyMobileRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let message = verification_service(&state)
        .verify_mobile(request.user_id, &request.otp)
        .await?;
    Ok(Json(ApiResponse::message(message)))
}
