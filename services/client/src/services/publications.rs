use common::models::{Post, PublicationRequest, UpdatePublicationRequest};
use common::routes::publications;
use common::validation;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Publications, their moderation and likes
pub struct PublicationService<'a> {
    client: &'a ApiClient,
}

impl<'a> PublicationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every publication, whatever its status (admin view)
    pub async fn all(&self) -> ClientResult<Vec<Post>> {
        self.client.get(publications::BASE).await
    }

    /// Published publications for anonymous readers
    pub async fn public(&self) -> ClientResult<Vec<Post>> {
        self.client.get(publications::PUBLIC).await
    }

    /// Publications currently inside their validity window
    pub async fn active(&self) -> ClientResult<Vec<Post>> {
        self.client.get(publications::ACTIVE).await
    }

    pub async fn by_category(&self, category: &str) -> ClientResult<Vec<Post>> {
        self.client.get(&publications::by_category(category)).await
    }

    /// Publications awaiting moderation
    pub async fn pending(&self) -> ClientResult<Vec<Post>> {
        self.client.get(publications::PENDING).await
    }

    /// Public detail of one publication
    pub async fn get(&self, id: &str) -> ClientResult<Post> {
        self.client.get(&publications::public_detail(id)).await
    }

    /// Admin detail of one publication
    pub async fn get_admin(&self, id: &str) -> ClientResult<Post> {
        self.client.get(&publications::detail(id)).await
    }

    pub async fn create(&self, request: &PublicationRequest) -> ClientResult<Post> {
        validation::validate_publication(request)?;
        let post: Post = self.client.post(publications::BASE, request).await?;
        info!("Created publication {} ({})", post.id, post.status);
        Ok(post)
    }

    pub async fn update(&self, id: &str, request: &UpdatePublicationRequest) -> ClientResult<Post> {
        validation::validate_publication_update(request)?;
        self.client.put(&publications::detail(id), request).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.client.delete::<()>(&publications::detail(id)).await?;
        info!("Deleted publication {}", id);
        Ok(())
    }

    pub async fn approve(&self, id: &str) -> ClientResult<Post> {
        let post: Post = self.client.put_empty(&publications::approve(id)).await?;
        info!("Approved publication {}", id);
        Ok(post)
    }

    /// Reject a pending publication; the backend removes it
    pub async fn reject(&self, id: &str) -> ClientResult<()> {
        self.client.delete::<()>(&publications::reject(id)).await?;
        info!("Rejected publication {}", id);
        Ok(())
    }

    pub async fn like(&self, id: &str) -> ClientResult<Post> {
        self.client.post_empty(&publications::like(id)).await
    }
}
