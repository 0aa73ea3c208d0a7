use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, MeData, SignupRequest, validate_login_request, validate_signup_request,
};
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// One message for every credential failure so the response does not reveal
/// whether the identifier or the password was wrong.
const BAD_CREDENTIALS: &str = "The email/username or password is incorrect";

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    operation_id = "signup",
    summary = "Register a new account",
    description = "Creates an account and returns a JWT for it. The password is hashed before the row is written; unique collisions on username or email are reported without saying which field collided.",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created, data is the JWT", body = ApiResponse<String>),
        (status = 400, description = "Validation error or duplicate username/email", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    validate_signup_request(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        firstname: Set(payload.firstname.trim().to_string()),
        lastname: Set(payload.lastname.trim().to_string()),
        username: Set(payload.username.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        password: Set(password_hash),
        is_admin: Set(false),
        is_owner: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Validation("Username or email is already registered".into())
            }
            _ => AppError::from(e),
        })?;

    let token = sign_token(&state, user.id)?;
    Ok(Json(ApiResponse::new(token)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in with email or username",
    description = "The `email` field matches against both the email and username columns, so either identifier works.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, data is the JWT", body = ApiResponse<String>),
        (status = 400, description = "Unknown identifier or wrong password", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    validate_login_request(&payload)?;

    let identifier = payload.email.trim();

    let user = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(identifier))
                .add(user::Column::Username.eq(identifier)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation(BAD_CREDENTIALS.into()))?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::Validation(BAD_CREDENTIALS.into()));
    }

    let token = sign_token(&state, user.id)?;
    Ok(Json(ApiResponse::new(token)))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "getMe",
    summary = "Get the current account",
    description = "Returns the authenticated account with the channels it subscribes to.",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<MeData>),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MeData>>, AppError> {
    let channels = super::user::subscribed_channels(&state.db, auth_user.id()).await?;
    let user = auth_user.user;

    Ok(Json(ApiResponse::new(MeData {
        id: user.id,
        firstname: user.firstname,
        lastname: user.lastname,
        username: user.username,
        email: user.email,
        avatar: user.avatar,
        cover: user.cover,
        channel_description: user.channel_description,
        is_admin: user.is_admin,
        is_owner: user.is_owner,
        channels,
    })))
}

fn sign_token(state: &AppState, user_id: Uuid) -> Result<String, AppError> {
    jwt::sign(
        user_id,
        &state.config.auth.jwt_secret,
        &state.config.auth.jwt_expire,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))
}
