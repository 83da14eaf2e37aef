use crate::clients::identity_client::{IdentityClient, MirrorUserRequest};
use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginData, LoginRequest, LoginUser, RegisterRequest, RegisteredUser};
use crate::dto::ApiResponse;
use crate::models::user::NewUser;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{normalize_email, strip_markup};
use bcrypt::{hash, verify, DEFAULT_COST};
use validator::Validate;

pub struct AuthController {
    users: UserRepository,
    config: EnvironmentConfig,
    identity: IdentityClient,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            config: state.config.clone(),
            identity: state.identity.clone(),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<RegisteredUser>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let email = normalize_email(&request.email);
        let full_name = strip_markup(&request.full_name);
        let mobile_no = request.mobile_no.trim().to_string();

        // Pre-check amistoso; la carrera real la resuelve la constraint
        if self.users.email_exists(&email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                full_name,
                gender: request.gender,
                mobile_no,
                signup_type: "e".to_string(),
            })
            .await?;

        // Espejar la cuenta en el proveedor de identidad: best-effort y
        // fuera del camino de la respuesta. El registro relacional es la
        // fuente de verdad.
        let identity = self.identity.clone();
        let payload = MirrorUserRequest {
            uid: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.full_name.clone(),
            phone_number: user.mobile_no.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = identity.mirror_user(&payload).await {
                log::error!("Fallo el espejo de cuenta en el proveedor de identidad: {}", e);
            }
        });

        log::info!("👤 Usuario registrado: {}", user.id);

        Ok(ApiResponse::success_with_message(
            RegisteredUser {
                user_id: user.id,
                email: user.email,
                full_name: user.full_name,
            },
            "Usuario registrado exitosamente. Verifica tu número de móvil y tu email",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginData>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let email = normalize_email(&request.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email o contraseña inválidos".to_string()))?;

        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !password_valid {
            return Err(AppError::Unauthorized("Email o contraseña inválidos".to_string()));
        }

        let jwt_config = JwtConfig::from(&self.config);
        let token = generate_token(user.id, &user.email, &user.full_name, &jwt_config)?;

        Ok(ApiResponse::success_with_message(
            LoginData {
                token,
                user: LoginUser::from(user),
            },
            "Login exitoso",
        ))
    }
}
