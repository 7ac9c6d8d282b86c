//! Publication model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{comment::CommentResponse, user::User};

/// Publication workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationStatus {
    #[serde(rename = "pending", alias = "PENDING")]
    Pending,
    #[serde(rename = "published", alias = "PUBLISHED")]
    Published,
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for PublicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "published" => Ok(Self::Published),
            _ => Err(format!("Invalid publication status: {}", s)),
        }
    }
}

/// Publication as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicationResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub valid_from: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub valid_to: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Free-form; the category domain is checked by the backend
    pub category: String,
    pub status: PublicationStatus,
    pub author: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
    pub comments: Vec<CommentResponse>,
    pub likes: u32,
}

/// Short name used across the application for a publication
pub type Post = PublicationResponse;

impl PublicationResponse {
    /// Whether the public site would show this publication at `now`
    ///
    /// The backend is the one enforcing this; the helper exists for display.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PublicationStatus::Published
            && self.valid_from <= now
            && now <= self.valid_to
    }

    pub fn is_pending(&self) -> bool {
        self.status == PublicationStatus::Pending
    }

    /// Name shown next to the publication
    pub fn author_name(&self) -> &str {
        match self.author_display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.author.name(),
        }
    }
}

/// Payload for `POST /publications`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRequest {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub valid_from: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub valid_to: DateTime<Utc>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_newsletter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
}

/// Payload for `PUT /publications/{id}`; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
