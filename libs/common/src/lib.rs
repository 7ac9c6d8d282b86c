//! Common library for the publication portal
//!
//! This crate holds the contract shared by every client of the portal
//! backend: the resource route table, the request and response shapes
//! exchanged over the wire, the error kinds a call can end in, and a few
//! pure helpers (request validation, image URLs).
//!
//! Nothing in here performs I/O.
//!
//! ```rust
//! use common::routes::{self, comments, publications, users};
//!
//! assert_eq!(publications::approve("42"), "/publications/42/approve");
//! assert_eq!(comments::detail("7", "99"), "/publications/7/comments/99");
//! assert_eq!(users::status("u1"), "/users/u1/status");
//! assert_eq!(
//!     routes::url(routes::DEFAULT_BASE_URL, publications::PENDING),
//!     "http://localhost:8090/api/publications/pending"
//! );
//! ```

pub mod error;
pub mod image;
pub mod models;
pub mod routes;
pub mod timestamp;
pub mod validation;

pub use error::{ApplicationFailure, ContractViolation, ErrorKind, ValidationError};
pub use models::{
    ApiResponse, Comment, CommentRequest, CommentResponse, LoginRequest, LoginResponse,
    NewsletterSubscriber, NewsletterSubscriptionRequest, Post, PublicationRequest,
    PublicationResponse, PublicationStatus, RegisterRequest, UpdatePublicationRequest, User,
    UserRole, UserStatus,
};
