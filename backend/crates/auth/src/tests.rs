//! Unit tests for Auth crate
//!
//! Use cases run against an in-memory repository; HTTP tests drive the
//! router plus the actor-resolving middleware with `tower::ServiceExt`.

use std::sync::{Arc, Mutex};

use kernel::access::UserRole;
use kernel::id::UserId;
use platform::mail::{Envelope, MailError, Mailer};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Clone, Default)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub(crate) fn get(&self, user_name: &str) -> Option<User> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.user_name.as_str() == user_name)
            .cloned()
    }

    pub(crate) fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.user_id == user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.user_name == user_name).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn list(&self, search: Option<&str>) -> AuthResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        Ok(users
            .iter()
            .filter(|u| match &needle {
                Some(n) => u.user_name.as_str().to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        let clash = users.iter().find(|u| {
            u.user_id != user.user_id && (u.user_name == user.user_name || u.email == user.email)
        });
        if let Some(other) = clash {
            return Err(if other.user_name == user.user_name {
                AuthError::UserNameTaken
            } else {
                AuthError::EmailTaken
            });
        }
        let slot = users
            .iter_mut()
            .find(|u| u.user_id == user.user_id)
            .ok_or(AuthError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.user_id != user_id);
        if users.len() == before {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingMailer {
    sent: Arc<Mutex<Vec<Envelope>>>,
}

impl RecordingMailer {
    pub(crate) fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap().clone()
    }

    /// Code from the most recent mail to `to`
    pub(crate) fn last_code_for(&self, to: &str) -> String {
        self.sent()
            .iter()
            .rev()
            .find(|e| e.to == to)
            .and_then(|e| e.body.strip_prefix("Your confirmation code is: "))
            .map(str::to_string)
            .expect("no confirmation mail")
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RejectingMailer;

impl Mailer for RejectingMailer {
    async fn send(&self, _envelope: &Envelope) -> Result<(), MailError> {
        Err(MailError::Rejected { status: 503 })
    }
}

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::with_random_secret())
}

fn seed_user(repo: &InMemoryUserRepository, name: &str, role: UserRole) -> User {
    let mut user = User::new(
        UserName::new(name).unwrap(),
        Email::new(format!("{name}@example.com")).unwrap(),
    );
    user.set_role(role);
    repo.insert(user.clone());
    user
}

// ============================================================================
// Sign up / token exchange
// ============================================================================

#[cfg(test)]
mod sign_up_tests {
    use super::*;
    use crate::application::{
        ObtainTokenInput, ObtainTokenUseCase, SignUpInput, SignUpUseCase,
    };

    fn sign_up_use_case(
        repo: &InMemoryUserRepository,
        mailer: &RecordingMailer,
        config: &Arc<AuthConfig>,
    ) -> SignUpUseCase<InMemoryUserRepository, RecordingMailer> {
        SignUpUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(mailer.clone()),
            config.clone(),
        )
    }

    fn input(name: &str, email: &str) -> SignUpInput {
        SignUpInput {
            user_name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_sends_code_and_hides_it() {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();
        let config = config();

        let output = sign_up_use_case(&repo, &mailer, &config)
            .execute(input("critic", "Critic@Example.com"))
            .await
            .unwrap();

        assert_eq!(output.user_name, "critic");
        assert_eq!(output.email, "critic@example.com");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "critic@example.com");
        assert_eq!(sent[0].subject, "Confirmation code");
        assert_eq!(sent[0].from, config.mail_from);

        let stored = repo.get("critic").unwrap();
        let code = mailer.last_code_for("critic@example.com");
        assert!(stored.confirmation_digest.unwrap().matches(&code));
    }

    #[tokio::test]
    async fn test_sign_up_me_is_rejected() {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();

        let err = sign_up_use_case(&repo, &mailer, &config())
            .execute(input("me", "me@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation { field: "username", .. }));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_same_pair_twice_reissues() {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();
        let config = config();
        let use_case = sign_up_use_case(&repo, &mailer, &config);

        use_case.execute(input("critic", "critic@example.com")).await.unwrap();
        let first = mailer.last_code_for("critic@example.com");
        use_case.execute(input("critic", "critic@example.com")).await.unwrap();
        let second = mailer.last_code_for("critic@example.com");

        assert_ne!(first, second);
        assert_eq!(mailer.sent().len(), 2);
        let stored = repo.get("critic").unwrap().confirmation_digest.unwrap();
        assert!(stored.matches(&second));
        assert!(!stored.matches(&first));
    }

    #[tokio::test]
    async fn test_sign_up_collisions() {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();
        let config = config();
        let use_case = sign_up_use_case(&repo, &mailer, &config);

        use_case.execute(input("critic", "critic@example.com")).await.unwrap();

        let err = use_case
            .execute(input("critic", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        let err = use_case
            .execute(input("someone", "critic@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_sign_up_fails_when_mail_fails() {
        let repo = InMemoryUserRepository::default();
        let use_case = SignUpUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(RejectingMailer),
            config(),
        );

        let err = use_case
            .execute(input("critic", "critic@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Mail(_)));
    }

    #[tokio::test]
    async fn test_token_exchange_consumes_code() {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();
        let config = config();

        sign_up_use_case(&repo, &mailer, &config)
            .execute(input("critic", "critic@example.com"))
            .await
            .unwrap();
        let code = mailer.last_code_for("critic@example.com");

        let token_use_case = ObtainTokenUseCase::new(Arc::new(repo.clone()), config.clone());
        let exchange = |code: &str| ObtainTokenInput {
            user_name: Some("critic".to_string()),
            confirmation_code: Some(code.to_string()),
        };

        let err = token_use_case.execute(exchange("nope")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfirmationCode));

        let output = token_use_case.execute(exchange(&code)).await.unwrap();
        let claims = config.token_signer().verify(&output.token).unwrap();
        assert_eq!(claims.sub, repo.get("critic").unwrap().user_id.into_uuid());

        // Single use
        let err = token_use_case.execute(exchange(&code)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfirmationCode));
    }

    #[tokio::test]
    async fn test_token_exchange_input_errors() {
        let repo = InMemoryUserRepository::default();
        seed_user(&repo, "critic", UserRole::User);
        let use_case = ObtainTokenUseCase::new(Arc::new(repo), config());

        let err = use_case
            .execute(ObtainTokenInput {
                user_name: Some("ghost".to_string()),
                confirmation_code: Some("abc".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        // Unknown user wins over the missing code
        let err = use_case
            .execute(ObtainTokenInput {
                user_name: Some("ghost".to_string()),
                confirmation_code: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        let err = use_case
            .execute(ObtainTokenInput {
                user_name: Some("critic".to_string()),
                confirmation_code: Some("  ".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ConfirmationCodeRequired));

        let err = use_case
            .execute(ObtainTokenInput {
                user_name: None,
                confirmation_code: Some("abc".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation { field: "username", .. }));
    }
}

// ============================================================================
// Profiles and user management
// ============================================================================

#[cfg(test)]
mod user_tests {
    use super::*;
    use crate::application::{
        BootstrapSuperuserUseCase, CreateUserInput, ManageUsersUseCase, OwnProfileUseCase,
        ResolveActorUseCase, UserPatch,
    };
    use kernel::access::AccessDenied;

    #[tokio::test]
    async fn test_own_role_change_is_refused_entirely() {
        let repo = InMemoryUserRepository::default();
        let user = seed_user(&repo, "critic", UserRole::User);
        let actor = user.actor();

        let patch = UserPatch {
            bio: Some("new bio".to_string()),
            role: Some(Some("admin".to_string())),
            ..Default::default()
        };
        let err = OwnProfileUseCase::new(Arc::new(repo.clone()))
            .update(Some(&actor), patch)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::AccessDenied(AccessDenied::RoleChangeForbidden)
        ));
        assert_eq!(err.status_code().as_u16(), 405);

        // Nothing applied
        let stored = repo.get("critic").unwrap();
        assert_eq!(stored.role, UserRole::User);
        assert_eq!(stored.profile.bio, "");
    }

    #[tokio::test]
    async fn test_null_role_counts_as_a_role_change() {
        let repo = InMemoryUserRepository::default();
        let user = seed_user(&repo, "critic", UserRole::User);
        let actor = user.actor();

        let patch = UserPatch {
            bio: Some("new bio".to_string()),
            role: Some(None),
            ..Default::default()
        };
        let err = OwnProfileUseCase::new(Arc::new(repo.clone()))
            .update(Some(&actor), patch)
            .await
            .unwrap_err();

        assert_eq!(err.status_code().as_u16(), 405);
        assert_eq!(repo.get("critic").unwrap().profile.bio, "");
    }

    #[tokio::test]
    async fn test_own_profile_update() {
        let repo = InMemoryUserRepository::default();
        let user = seed_user(&repo, "critic", UserRole::User);
        seed_user(&repo, "other", UserRole::User);
        let use_case = OwnProfileUseCase::new(Arc::new(repo.clone()));

        let updated = use_case
            .update(
                Some(&user.actor()),
                UserPatch {
                    first_name: Some("Ada".to_string()),
                    bio: Some("Watches everything".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile.first_name, "Ada");
        assert_eq!(updated.profile.bio, "Watches everything");

        let err = use_case
            .update(
                Some(&user.actor()),
                UserPatch {
                    user_name: Some("other".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        let err = use_case.get(None).await.unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_user_management_requires_admin() {
        let repo = InMemoryUserRepository::default();
        let moderator = seed_user(&repo, "moder", UserRole::Moderator);
        let use_case = ManageUsersUseCase::new(Arc::new(repo.clone()));

        let err = use_case.list(Some(&moderator.actor()), None).await.unwrap_err();
        assert!(matches!(err, AuthError::AccessDenied(AccessDenied::AdminOnly)));

        let err = use_case.list(None, None).await.unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_admin_crud() {
        let repo = InMemoryUserRepository::default();
        let admin = seed_user(&repo, "boss", UserRole::Admin);
        let actor = admin.actor();
        let use_case = ManageUsersUseCase::new(Arc::new(repo.clone()));

        let created = use_case
            .create(
                Some(&actor),
                CreateUserInput {
                    user_name: "newbie".to_string(),
                    email: "newbie@example.com".to_string(),
                    first_name: String::new(),
                    last_name: String::new(),
                    bio: String::new(),
                    role: Some("moderator".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.role, UserRole::Moderator);

        let err = use_case
            .create(
                Some(&actor),
                CreateUserInput {
                    user_name: "another".to_string(),
                    email: "newbie@example.com".to_string(),
                    first_name: String::new(),
                    last_name: String::new(),
                    bio: String::new(),
                    role: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        let found = use_case.list(Some(&actor), Some("NEW")).await.unwrap();
        assert_eq!(found.len(), 1);

        let updated = use_case
            .update(
                Some(&actor),
                "newbie",
                UserPatch {
                    role: Some(Some("admin".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);

        let err = use_case
            .update(
                Some(&actor),
                "newbie",
                UserPatch {
                    role: Some(Some("emperor".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation { field: "role", .. }));

        let err = use_case
            .update(
                Some(&actor),
                "newbie",
                UserPatch {
                    role: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation { field: "role", .. }));

        use_case.delete(Some(&actor), "newbie").await.unwrap();
        let err = use_case.get(Some(&actor), "newbie").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_resolved_actor_follows_current_role() {
        let repo = InMemoryUserRepository::default();
        let config = config();
        let mut user = seed_user(&repo, "critic", UserRole::Admin);
        let token = config.token_signer().issue(user.user_id.into_uuid());
        let resolver = ResolveActorUseCase::new(Arc::new(repo.clone()), config.clone());

        assert_eq!(resolver.execute(&token).await.unwrap().role, UserRole::Admin);

        // Demotion applies to the token already issued
        user.set_role(UserRole::User);
        repo.update(&user).await.unwrap();
        assert_eq!(resolver.execute(&token).await.unwrap().role, UserRole::User);

        repo.delete(&user.user_id).await.unwrap();
        assert!(matches!(
            resolver.execute(&token).await.unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            resolver.execute("forged.token").await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_superuser_is_idempotent() {
        let repo = InMemoryUserRepository::default();
        let use_case = BootstrapSuperuserUseCase::new(Arc::new(repo.clone()));

        let first = use_case.execute("root", "root@example.com").await.unwrap();
        let second = use_case.execute("root", "root@example.com").await.unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert!(second.is_superuser);
        assert!(second.actor().is_admin());
    }
}

// ============================================================================
// HTTP
// ============================================================================

#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::presentation::middleware::resolve_actor;
    use crate::presentation::router::{actor_resolver_state, auth_router_generic};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        repo: InMemoryUserRepository,
        mailer: RecordingMailer,
        config: AuthConfig,
    }

    fn app() -> TestApp {
        let repo = InMemoryUserRepository::default();
        let mailer = RecordingMailer::default();
        let config = AuthConfig::with_random_secret();

        let router = auth_router_generic(repo.clone(), mailer.clone(), config.clone()).layer(
            axum::middleware::from_fn_with_state(
                actor_resolver_state(repo.clone(), config.clone()),
                resolve_actor::<InMemoryUserRepository>,
            ),
        );

        TestApp {
            router,
            repo,
            mailer,
            config,
        }
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_signup_then_token_then_me() {
        let app = app();

        let (status, body) = send(
            &app.router,
            "POST",
            "/auth/signup",
            None,
            Some(json!({"username": "critic", "email": "critic@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"username": "critic", "email": "critic@example.com"}));

        let code = app.mailer.last_code_for("critic@example.com");
        let (status, body) = send(
            &app.router,
            "POST",
            "/auth/token",
            None,
            Some(json!({"username": "critic", "confirmation_code": code})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app.router, "GET", "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "critic");
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn test_signup_me_is_400_with_field() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/auth/signup",
            None,
            Some(json!({"username": "me", "email": "me@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "username");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_signup_missing_field_is_400_problem() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/auth/signup",
            None,
            Some(json!({"username": "critic"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["field"], "email");
        assert!(app.repo.get("critic").is_none());
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_without_code_is_404() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/auth/token",
            None,
            Some(json!({"username": "ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_patch_me_with_role_is_405() {
        let app = app();
        let user = seed_user(&app.repo, "critic", UserRole::User);
        let token = app.config.token_signer().issue(user.user_id.into_uuid());

        let (status, body) = send(
            &app.router,
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({"role": "admin", "bio": "sneaky"})),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["field"], "role");
        assert_eq!(app.repo.get("critic").unwrap().profile.bio, "");
    }

    #[tokio::test]
    async fn test_patch_me_with_null_role_is_still_405() {
        let app = app();
        let user = seed_user(&app.repo, "critic", UserRole::User);
        let token = app.config.token_signer().issue(user.user_id.into_uuid());

        let (status, body) = send(
            &app.router,
            "PATCH",
            "/users/me",
            Some(&token),
            Some(json!({"role": null, "bio": "sneaky"})),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["field"], "role");
        assert_eq!(app.repo.get("critic").unwrap().profile.bio, "");
    }

    #[tokio::test]
    async fn test_invalid_token_is_401_and_anonymous_is_401_on_me() {
        let app = app();

        let (status, _) = send(&app.router, "GET", "/users/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app.router, "GET", "/users/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_users_endpoints_are_admin_only() {
        let app = app();
        let user = seed_user(&app.repo, "critic", UserRole::User);
        let admin = seed_user(&app.repo, "boss", UserRole::Admin);
        let user_token = app.config.token_signer().issue(user.user_id.into_uuid());
        let admin_token = app.config.token_signer().issue(admin.user_id.into_uuid());

        let (status, _) = send(&app.router, "GET", "/users", Some(&user_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app.router, "GET", "/users", Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app.router,
            "POST",
            "/users",
            Some(&admin_token),
            Some(json!({"username": "fresh", "email": "fresh@example.com", "role": "moderator"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "moderator");

        let (status, body) = send(
            &app.router,
            "GET",
            "/users/critic",
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "critic@example.com");

        let (status, _) = send(
            &app.router,
            "DELETE",
            "/users/critic",
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(app.repo.get("critic").is_none());
    }
}
