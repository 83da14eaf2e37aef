use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{
    CompanyResponse, RegisterCompanyRequest, UpdateCompanyRequest, UploadImageData,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::company::ImageKind;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de empresa: todas las rutas requieren autenticación
pub fn create_company_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/upload-logo", post(upload_logo))
        .route("/upload-banner", post(upload_banner))
        // Margen sobre el banner de 5MB para el overhead del multipart
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn register(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<RegisterCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.register(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.get_profile(user.user_id).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.update_profile(user.user_id, request).await?;
    Ok(Json(response))
}

async fn upload_logo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadImageData>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller
        .upload_image(user.user_id, ImageKind::Logo, multipart)
        .await?;
    Ok(Json(response))
}

async fn upload_banner(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadImageData>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller
        .upload_image(user.user_id, ImageKind::Banner, multipart)
        .await?;
    Ok(Json(response))
}
