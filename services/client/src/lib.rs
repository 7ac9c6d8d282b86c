//! Client for the publication portal backend
//!
//! Wraps the routes and shapes of the `common` crate in an HTTP client that
//! keeps the signed-in session, attaches its bearer token and reports every
//! failure as one of the three kinds in [`common::ErrorKind`].
//!
//! ```rust,no_run
//! use client::{ApiClient, ClientConfig, Session};
//! use common::LoginRequest;
//!
//! # async fn run() -> client::ClientResult<()> {
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config, Session::in_memory())?;
//!
//! api.auth()
//!     .login(&LoginRequest::new("admin@example.com", "Secret123"))
//!     .await?;
//! for post in api.publications().pending().await? {
//!     println!("{} by {}", post.title, post.author_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod services;
pub mod session;
pub mod token;

pub use cache::{RedisConfig, RedisStore};
pub use crate::config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{Guard, GuardDecision};
pub use http::ApiClient;
pub use session::{FileStore, MemoryStore, Session, SessionStore};
pub use token::TokenInfo;
