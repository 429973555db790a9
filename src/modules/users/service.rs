use tracing::{info, instrument, warn};

use coursebook_auth::create_access_token;
use coursebook_config::JwtConfig;
use coursebook_core::{AppError, hash_password_blocking, verify_password_blocking};
use coursebook_db::{StoreError, UserStore};
use coursebook_models::{
    LoginRequest, LoginResponse, NewUser, RegisterUserDto, Role, User, UserField,
};
use coursebook_observability::{
    track_token_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};

pub const DUPLICATE_USER_MESSAGE: &str = "User with that email or username already exists.";
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Authentication failed. Invalid username or password.";
const AUTH_SERVER_ERROR_MESSAGE: &str = "Server error during authentication.";

pub struct UserService;

impl UserService {
    #[instrument(skip(users, dto), fields(username = %dto.username))]
    pub async fn register(users: &dyn UserStore, dto: RegisterUserDto) -> Result<User, AppError> {
        let role = Role::from_registration(dto.role.as_deref());
        let password_hash = hash_password_blocking(dto.password).await?;

        let new_user = NewUser {
            username: dto.username,
            email: dto.email,
            password_hash,
            role,
        };

        let record = users.create(new_user).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => AppError::conflict(DUPLICATE_USER_MESSAGE),
            StoreError::Validation(detail) => {
                AppError::bad_request("Invalid user registration data.").with_detail(detail)
            }
            other => AppError::internal_context("Failed to register user.", other),
        })?;

        track_user_registered(record.role.as_str());
        info!(user_id = %record.id, role = %record.role, "New user registered");
        Ok(record.into_public())
    }

    /// Unknown usernames and wrong passwords produce the same error.
    #[instrument(skip(users, jwt_config, dto), fields(username = %dto.username))]
    pub async fn login(
        users: &dyn UserStore,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = users
            .find_by_field(UserField::Username(dto.username))
            .await
            .map_err(|e| AppError::internal_context(AUTH_SERVER_ERROR_MESSAGE, e))?;

        let Some(user) = user else {
            track_user_login_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = verify_password_blocking(dto.password, user.password_hash.clone())
            .await
            .map_err(|e| {
                warn!(error = %e, user_id = %user.id, "stored password hash unusable");
                AppError::internal_error(AUTH_SERVER_ERROR_MESSAGE)
            })?;

        if !matches {
            track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let token = create_access_token(user.id, user.role, jwt_config).map_err(|e| {
            warn!(error = %e, "token signing failed");
            AppError::internal_error(AUTH_SERVER_ERROR_MESSAGE)
        })?;

        track_token_issued();
        track_user_login_success(user.role.as_str());
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            message: "Login successful!".to_string(),
            user: user.into_public(),
            token,
        })
    }
}
