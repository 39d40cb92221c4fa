// src/services/user_service.rs
// DOCUMENTATION: Account registration, login and profile management
// PURPOSE: Identity store operations behind the /auth and /users routes

use crate::db::UserStore;
use crate::errors::WishlistError;
use crate::models::{
    AuthResponse, LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest, User, UserResponse,
};
use crate::services::{PasswordService, TokenService};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

const BAD_CREDENTIALS: &str = "Invalid email or password";
/// Hashed once and verified against when the email is unknown
const DUMMY_PASSWORD: &str = "wanderlist-unknown-account";

pub struct UserService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
    dummy_hash: OnceCell<String>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            passwords: PasswordService::new(),
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Create an account and sign the caller in
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, WishlistError> {
        let email = normalize_email(&req.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(WishlistError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let password_hash = self.passwords.hash(&req.password).await?;
        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                first_name: req.first_name.trim().to_string(),
                last_name: req.last_name.trim().to_string(),
            })
            .await?;

        log::info!("Registered user {}", user.id);
        self.auth_response(&user)
    }

    /// Unknown email and wrong password fail identically, and both pay for
    /// one argon2 verification
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, WishlistError> {
        let email = normalize_email(&req.email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let dummy = self
                    .dummy_hash
                    .get_or_try_init(|| self.passwords.hash(DUMMY_PASSWORD))
                    .await?;
                self.passwords.verify(dummy, &req.password).await?;
                return Err(WishlistError::Unauthorized(BAD_CREDENTIALS.to_string()));
            }
        };

        if !self.passwords.verify(&user.password_hash, &req.password).await? {
            log::warn!("Failed login for user {}", user.id);
            return Err(WishlistError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        self.auth_response(&user)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponse, WishlistError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.to_response())
            .ok_or_else(|| WishlistError::NotFound(format!("User {} not found", user_id)))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserResponse, WishlistError> {
        self.users
            .update_profile(user_id, &req)
            .await?
            .map(|user| user.to_response())
            .ok_or_else(|| WishlistError::NotFound(format!("User {} not found", user_id)))
    }

    fn auth_response(&self, user: &User) -> Result<AuthResponse, WishlistError> {
        let issued = self.tokens.issue(user)?;
        Ok(AuthResponse {
            access_token: issued.token,
            token_type: "Bearer",
            expires_at: issued.expires_at,
            user: user.to_response(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    fn service() -> (UserService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("test-secret".to_string(), 3600));
        let store = Arc::new(MemoryStore::new());
        (UserService::new(store, tokens.clone()), tokens)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "s3cret-passw0rd".to_string(),
            first_name: "Marco".to_string(),
            last_name: "Polo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (users, tokens) = service();

        let registered = users
            .register(register_request("Marco@Example.com "))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "marco@example.com");
        assert_eq!(registered.token_type, "Bearer");
        assert_eq!(
            tokens.authenticate(&registered.access_token).unwrap(),
            registered.user.id
        );

        let logged_in = users
            .login(LoginRequest {
                email: "marco@example.com".to_string(),
                password: "s3cret-passw0rd".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (users, _) = service();
        users.register(register_request("dup@example.com")).await.unwrap();

        let err = users
            .register(register_request("DUP@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, WishlistError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (users, _) = service();
        users.register(register_request("known@example.com")).await.unwrap();

        let wrong_password = users
            .login(LoginRequest {
                email: "known@example.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = users
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, WishlistError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_password_verification() {
        let (users, _) = service();
        assert!(!users.dummy_hash.initialized());

        let err = users
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: DUMMY_PASSWORD.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WishlistError::Unauthorized(_)));

        let dummy = users.dummy_hash.get().unwrap();
        assert!(dummy.starts_with("$argon2"));
        assert!(users.passwords.verify(dummy, DUMMY_PASSWORD).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_profile_is_shallow_merge() {
        let (users, _) = service();
        let registered = users.register(register_request("ibn@example.com")).await.unwrap();

        let updated = users
            .update_profile(
                registered.user.id,
                UpdateProfileRequest {
                    first_name: Some("Ibn".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Ibn");
        assert_eq!(updated.last_name, "Polo");

        let err = users.get_profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, WishlistError::NotFound(_)));
    }
}
