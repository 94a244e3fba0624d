//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::access::CurrentActor;
use kernel::body::JsonBody;
use kernel::query::non_blank;
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CreateUserInput, ManageUsersUseCase, ObtainTokenInput, ObtainTokenUseCase,
    OwnProfileUseCase, SignUpInput, SignUpUseCase, UserPatch,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CreateUserRequest, SignUpRequest, SignUpResponse, TokenRequest, TokenResponse,
    UpdateUserRequest, UserListQuery, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: derive would require `M: Clone`
impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            user_name: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            role: req.role,
        }
    }
}

// ============================================================================
// Sign Up / Token
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            user_name: req.username,
            email: req.email,
        })
        .await?;

    Ok(Json(SignUpResponse {
        username: output.user_name,
        email: output.email,
    }))
}

/// POST /auth/token
pub async fn obtain_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ObtainTokenUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(ObtainTokenInput {
            user_name: req.username,
            confirmation_code: req.confirmation_code,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// Own Profile
// ============================================================================

/// GET /users/me
pub async fn get_me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let user = OwnProfileUseCase::new(state.repo.clone())
        .get(actor.actor())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /users/me
pub async fn update_me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let user = OwnProfileUseCase::new(state.repo.clone())
        .update(actor.actor(), req.into())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// User Management (admin)
// ============================================================================

/// GET /users
pub async fn list_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    Query(query): Query<UserListQuery>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let users = ManageUsersUseCase::new(state.repo.clone())
        .list(actor.actor(), non_blank(query.search.as_deref()))
        .await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /users
pub async fn create_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let input = CreateUserInput {
        user_name: req.username,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        bio: req.bio,
        role: req.role,
    };
    let user = ManageUsersUseCase::new(state.repo.clone())
        .create(actor.actor(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{username}
pub async fn get_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    Path(username): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let user = ManageUsersUseCase::new(state.repo.clone())
        .get(actor.actor(), &username)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /users/{username}
pub async fn update_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    Path(username): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let user = ManageUsersUseCase::new(state.repo.clone())
        .update(actor.actor(), &username, req.into())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{username}
pub async fn delete_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    actor: CurrentActor,
    Path(username): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ManageUsersUseCase::new(state.repo.clone())
        .delete(actor.actor(), &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
