//! Request and response shapes exchanged with the backend
//!
//! Response types are closed: unknown fields and unknown enum values fail
//! decoding. Field names are camelCase on the wire.

pub mod auth;
pub mod comment;
pub mod envelope;
pub mod newsletter;
pub mod publication;
pub mod upload;
pub mod user;

// Re-export for convenience
pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use comment::{Comment, CommentRequest, CommentResponse};
pub use envelope::{ApiResponse, EnvelopeError};
pub use newsletter::{EmailQuery, NewsletterSubscriber, NewsletterSubscriptionRequest};
pub use publication::{
    Post, PublicationRequest, PublicationResponse, PublicationStatus, UpdatePublicationRequest,
};
pub use upload::{DriveUploadRequest, UploadResponse};
pub use user::{User, UserRole, UserStatus, UserStatusUpdate};
