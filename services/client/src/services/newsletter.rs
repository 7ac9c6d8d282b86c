use common::models::{EmailQuery, NewsletterSubscriber, NewsletterSubscriptionRequest};
use common::routes::newsletter;
use common::validation;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Newsletter subscriptions and test mailings
pub struct NewsletterService<'a> {
    client: &'a ApiClient,
}

impl<'a> NewsletterService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn subscribers(&self) -> ClientResult<Vec<NewsletterSubscriber>> {
        self.client.get(newsletter::SUBSCRIBERS).await
    }

    pub async fn subscribe(
        &self,
        request: &NewsletterSubscriptionRequest,
    ) -> ClientResult<NewsletterSubscriber> {
        validation::validate_subscription(request)?;
        self.client.post(newsletter::SUBSCRIBE, request).await
    }

    pub async fn unsubscribe(&self, email: &str) -> ClientResult<()> {
        validation::validate_email(email)?;
        self.client
            .delete_with(
                newsletter::UNSUBSCRIBE,
                &EmailQuery {
                    email: email.to_string(),
                },
            )
            .await
    }

    pub async fn delete_subscriber(&self, id: &str) -> ClientResult<()> {
        self.client
            .delete(&newsletter::delete_subscriber(id))
            .await
    }

    /// Send the newsletter template to a single address
    pub async fn send_test(&self, email: &str) -> ClientResult<()> {
        validation::validate_email(email)?;
        self.client
            .post_with::<(), _>(
                newsletter::TEST,
                &EmailQuery {
                    email: email.to_string(),
                },
            )
            .await?;
        info!("Test newsletter sent to {}", email);
        Ok(())
    }
}
