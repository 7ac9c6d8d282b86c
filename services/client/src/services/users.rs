use common::models::{User, UserStatus, UserStatusUpdate};
use common::routes::users;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Admin account management (super admins only)
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> ClientResult<Vec<User>> {
        self.client.get(users::BASE).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        self.client.get(&users::detail(id)).await
    }

    /// Activate or deactivate an account; the status travels as `?status=`
    pub async fn update_status(&self, id: &str, status: UserStatus) -> ClientResult<User> {
        let user: User = self
            .client
            .put_with(&users::status(id), &UserStatusUpdate { status })
            .await?;
        info!("User {} is now {}", user.email, user.status);
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.client.delete::<()>(&users::detail(id)).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
