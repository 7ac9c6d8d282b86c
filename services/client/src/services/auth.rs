use common::models::{LoginRequest, LoginResponse, RegisterRequest, User};
use common::{routes, validation};
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Sign-in, sign-out and account creation
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and keep the returned token and user in the session
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        validation::validate_login(request)?;
        info!("Signing in {}", request.email);

        let response: LoginResponse = self
            .client
            .post_anonymous(routes::auth::LOGIN, request)
            .await?;
        self.client.session().save(&response).await?;

        info!(
            "Signed in {} with role {}",
            response.user.email, response.user.role
        );
        Ok(response)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.client.session().clear().await
    }

    /// Create an admin account (super admins only)
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        validation::validate_registration(request)?;
        info!("Registering {}", request.email);
        self.client.post(routes::auth::REGISTER, request).await
    }

    pub async fn current_user(&self) -> ClientResult<Option<User>> {
        self.client.session().current_user().await
    }

    pub async fn is_authenticated(&self) -> ClientResult<bool> {
        self.client.session().is_authenticated().await
    }

    pub async fn is_super_admin(&self) -> ClientResult<bool> {
        self.client.session().is_super_admin().await
    }
}
