//! Custom Axum extractors for request authentication.
//!
//! [`AuthUser`] validates the bearer token and exposes its claims; the
//! role-specific wrappers ([`CustomerAuth`], [`ManagerAuth`],
//! [`AdminAuth`]) additionally enforce the role the handler requires.
//! Role and ownership failures answer 403 with a bare "not authorized";
//! nothing about the target resource leaks through them.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use ceats_sdk::objects::auth::Role;

use crate::api::error_response;
use crate::auth::{TokenError, TokenService};
use crate::state::AppState;

/// The authenticated account, straight from the verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub canteen_id: Option<Uuid>,
}

/// Errors produced while authenticating a request.
#[derive(Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer …` header.
    MissingToken,
    /// The token failed validation.
    InvalidToken,
    /// The token is past its expiry.
    ExpiredToken,
    /// The account's role does not grant access to this endpoint, or it
    /// does not own the target resource.
    NotAuthorized,
    /// A manager account with no bound canteen cannot act as a vendor.
    NoCanteen,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => {
                error_response(StatusCode::UNAUTHORIZED, "missing bearer token")
            }
            AuthError::InvalidToken => error_response(StatusCode::UNAUTHORIZED, "invalid token"),
            AuthError::ExpiredToken => error_response(StatusCode::UNAUTHORIZED, "token expired"),
            AuthError::NotAuthorized => error_response(StatusCode::FORBIDDEN, "not authorized"),
            AuthError::NoCanteen => error_response(
                StatusCode::BAD_REQUEST,
                "manager is not associated with a canteen",
            ),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse a previously extracted user within the same request.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token =
            TokenService::extract_from_header(header_value).ok_or(AuthError::InvalidToken)?;

        let tokens = state.config.tokens.read().await;
        let claims = tokens.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;
        drop(tokens);

        let user = AuthUser {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            canteen_id: claims.canteen_id,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// A signed-in customer.
pub struct CustomerAuth(pub AuthUser);

impl FromRequestParts<AppState> for CustomerAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Customer {
            return Err(AuthError::NotAuthorized);
        }
        Ok(CustomerAuth(user))
    }
}

/// A signed-in manager, with the canteen their account is bound to. All
/// vendor reads and writes are scoped to this canteen.
pub struct ManagerAuth {
    pub user_id: Uuid,
    pub canteen_id: Uuid,
}

impl FromRequestParts<AppState> for ManagerAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Manager {
            return Err(AuthError::NotAuthorized);
        }
        let canteen_id = user.canteen_id.ok_or(AuthError::NoCanteen)?;
        Ok(ManagerAuth {
            user_id: user.id,
            canteen_id,
        })
    }
}

/// A signed-in admin.
pub struct AdminAuth {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AuthError::NotAuthorized);
        }
        Ok(AdminAuth { user_id: user.id })
    }
}
