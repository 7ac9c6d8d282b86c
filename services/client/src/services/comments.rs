use common::models::{Comment, CommentRequest};
use common::routes::comments;
use common::validation;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Comments under a publication
pub struct CommentService<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, publication_id: &str) -> ClientResult<Vec<Comment>> {
        self.client.get(&comments::base(publication_id)).await
    }

    pub async fn create(
        &self,
        publication_id: &str,
        request: &CommentRequest,
    ) -> ClientResult<Comment> {
        validation::validate_comment(request)?;
        self.client
            .post(&comments::base(publication_id), request)
            .await
    }

    pub async fn delete(&self, publication_id: &str, comment_id: &str) -> ClientResult<()> {
        self.client
            .delete(&comments::detail(publication_id, comment_id))
            .await
    }
}
