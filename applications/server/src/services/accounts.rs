/// Account service - registration and credential login
use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use crate::services::AuthService;
use notes_core::{
    validation::{normalize_email, LoginForm, RegistrationForm},
    CredentialStore, UserInfo, Validate,
};
use serde::Serialize;
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Session issued by a successful login
#[derive(Debug, Serialize)]
pub struct SessionIdentity {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshedSession {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    auth: Arc<AuthService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn CredentialStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }

    /// Register a new user with email and password
    ///
    /// Returns the hash-free projection of the created user.
    pub async fn register(&self, form: RegistrationForm) -> Result<UserInfo> {
        let form = form.normalized();
        form.validate()?;

        if self.store.find_user_by_email(&form.email).await?.is_some() {
            return Err(ServerError::Conflict("User already exists".to_string()));
        }

        let auth = Arc::clone(&self.auth);
        let password = form.password;
        let password_hash = run_blocking(move || auth.hash_password(&password)).await?;

        // A concurrent registration can still win between the check and here;
        // the unique index turns that into a Conflict as well.
        let user = self.store.create_user(&form.email, &password_hash).await?;

        tracing::info!("Registered user {}", user.id);

        Ok(user.to_info())
    }

    /// Verify credentials and issue a session
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn authorize(&self, form: LoginForm) -> Result<SessionIdentity> {
        let email = normalize_email(&form.email);
        let password = form.password;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            let auth = Arc::clone(&self.auth);
            run_blocking(move || auth.verify_against_dummy(&password)).await?;
            tracing::warn!("Login failed: invalid credentials");
            return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
        };

        let auth = Arc::clone(&self.auth);
        let hash = user.password_hash.clone();
        let valid = run_blocking(move || auth.verify_password(&password, &hash)).await?;

        if !valid {
            tracing::warn!("Login failed: invalid credentials");
            return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = self.auth.create_access_token(&user.id, &user.email)?;
        let refresh_token = self.auth.create_refresh_token(&user.id, &user.email)?;

        tracing::info!("User {} logged in", user.id);

        Ok(SessionIdentity {
            user: user.to_info(),
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        })
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession> {
        let claims = self.auth.verify_refresh_token(refresh_token).map_err(|e| {
            tracing::warn!("Refresh token rejected: {}", e);
            ServerError::Unauthorized("Invalid or expired session".to_string())
        })?;

        let user_id = notes_core::UserId::new(claims.sub);
        let user = self
            .store
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| ServerError::Unauthorized("Invalid or expired session".to_string()))?;

        let access_token = self.auth.create_access_token(&user.id, &user.email)?;

        Ok(RefreshedSession {
            access_token,
            token_type: "Bearer".to_string(),
        })
    }

    /// The user behind a verified session
    pub async fn current_user(&self, caller: &AuthenticatedUser) -> Result<UserInfo> {
        self.store
            .find_user_by_id(caller.user_id())
            .await?
            .map(|user| user.to_info())
            .ok_or_else(|| ServerError::Unauthorized("Invalid or expired session".to_string()))
    }

    /// All registered users (for the admin CLI)
    pub async fn list_users(&self) -> Result<Vec<UserInfo>> {
        let users = self.store.get_all_users().await?;
        Ok(users.iter().map(|u| u.to_info()).collect())
    }
}

/// Run CPU-heavy password work off the async worker threads
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("Password task failed: {e}")))?
}
