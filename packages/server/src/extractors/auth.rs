use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. The user row is
/// re-read from the database on every request, so role checks always see the
/// current flags rather than whatever was true when the token was signed.
pub struct AuthUser {
    pub user: user::Model,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    /// Returns `Ok(())` for admins (the owner included), `Err(AdminOnly)` otherwise.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.user.is_admin {
            Ok(())
        } else {
            Err(AppError::AdminOnly)
        }
    }

    /// Returns `Ok(())` for the owner account only.
    pub fn require_owner(&self) -> Result<(), AppError> {
        if self.user.is_owner {
            Ok(())
        } else {
            Err(AppError::OwnerOnly)
        }
    }
}

async fn user_from_parts(parts: &Parts, state: &AppState) -> Result<user::Model, AppError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthenticated)?;

    let claims = jwt::verify(token, &state.config.auth.jwt_secret)
        .map_err(|_| AppError::Unauthenticated)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthenticated)?;

    user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthenticated)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = user_from_parts(parts, state).await?;
        Ok(AuthUser { user })
    }
}

/// Like [`AuthUser`] but never rejects: anonymous and bad-token requests
/// proceed with `None`. Used on routes that only personalize their response.
pub struct OptionalAuthUser(pub Option<user::Model>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(user_from_parts(parts, state).await.ok()))
    }
}
