//! One service per backend resource
//!
//! Services borrow an [`ApiClient`](crate::http::ApiClient) and translate
//! typed calls into routes from [`common::routes`].

pub mod auth;
pub mod comments;
pub mod newsletter;
pub mod publications;
pub mod upload;
pub mod users;

pub use auth::AuthService;
pub use comments::CommentService;
pub use newsletter::NewsletterService;
pub use publications::PublicationService;
pub use upload::UploadService;
pub use users::UserService;

use crate::http::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn publications(&self) -> PublicationService<'_> {
        PublicationService::new(self)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn newsletter(&self) -> NewsletterService<'_> {
        NewsletterService::new(self)
    }

    pub fn uploads(&self) -> UploadService<'_> {
        UploadService::new(self)
    }
}
