//! Input validation utilities
//!
//! Checks a request before it leaves the client. The backend validates again;
//! these only catch what is certain to be rejected.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ValidationError, ValidationResult};
use crate::models::{
    CommentRequest, LoginRequest, NewsletterSubscriptionRequest, PublicationRequest,
    RegisterRequest, UpdatePublicationRequest,
};

fn require(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", field)));
    }
    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new(
            "email",
            "Email must be at most 254 characters long",
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::new("email", "Invalid email format"));
    }

    Ok(())
}

/// Validate a password for a new account
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }

    if password.len() < 8 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters long",
        ));
    }

    if password.len() > 128 {
        return Err(ValidationError::new(
            "password",
            "Password must be at most 128 characters long",
        ));
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;

    for c in password.chars() {
        if c.is_ascii_uppercase() {
            has_upper = true;
        } else if c.is_ascii_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        }
    }

    if !has_upper {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }

    if !has_lower {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }

    if !has_digit {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one digit",
        ));
    }

    Ok(())
}

pub fn validate_login(request: &LoginRequest) -> ValidationResult {
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

pub fn validate_registration(request: &RegisterRequest) -> ValidationResult {
    validate_email(&request.email)?;
    validate_password(&request.password)
}

/// Validate a new publication
///
/// The category is only required to be present; its domain belongs to the
/// backend.
pub fn validate_publication(request: &PublicationRequest) -> ValidationResult {
    require("title", &request.title)?;
    require("content", &request.content)?;
    require("category", &request.category)?;

    if request.valid_from > request.valid_to {
        return Err(ValidationError::new(
            "validTo",
            "validTo must not be earlier than validFrom",
        ));
    }

    Ok(())
}

pub fn validate_publication_update(request: &UpdatePublicationRequest) -> ValidationResult {
    if let Some(title) = &request.title {
        require("title", title)?;
    }
    if let Some(content) = &request.content {
        require("content", content)?;
    }
    if let Some(category) = &request.category {
        require("category", category)?;
    }
    if let (Some(from), Some(to)) = (request.valid_from, request.valid_to) {
        if from > to {
            return Err(ValidationError::new(
                "validTo",
                "validTo must not be earlier than validFrom",
            ));
        }
    }
    Ok(())
}

pub fn validate_comment(request: &CommentRequest) -> ValidationResult {
    require("content", &request.content)
}

pub fn validate_subscription(request: &NewsletterSubscriptionRequest) -> ValidationResult {
    validate_email(&request.email)
}

/// File id of a Google Drive share link
///
/// Handles both `/d/{id}/...` and `...?id={id}&...` forms.
pub fn extract_drive_file_id(url: &str) -> Option<&str> {
    let id = if let Some(start) = url.find("/d/") {
        let rest = &url[start + 3..];
        rest.split('/').next()
    } else if let Some(start) = url.find("id=") {
        let rest = &url[start + 3..];
        rest.split('&').next()
    } else {
        None
    };
    id.filter(|id| !id.is_empty())
}

pub fn validate_drive_url(url: &str) -> ValidationResult {
    if !url.contains("drive.google.com") {
        return Err(ValidationError::new(
            "driveUrl",
            "URL must be a Google Drive link",
        ));
    }
    if extract_drive_file_id(url).is_none() {
        return Err(ValidationError::new(
            "driveUrl",
            "Could not find a file id in the Google Drive link",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn publication() -> PublicationRequest {
        PublicationRequest {
            title: "Opening hours".to_string(),
            content: "Shops open at 6am.".to_string(),
            image_url: None,
            valid_from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            valid_to: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            category: "news".to_string(),
            send_newsletter: None,
            author_display_name: None,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.be").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Passw0rd").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("Pa0").is_err());
        assert!(validate_password("password1").is_err());
        assert!(validate_password("PASSWORD1").is_err());
        assert!(validate_password("Password").is_err());
        assert!(validate_password(&format!("Aa1{}", "x".repeat(130))).is_err());
    }

    #[test]
    fn test_validate_login_only_requires_a_password() {
        assert!(validate_login(&LoginRequest::new("a@example.com", "x")).is_ok());
        let err = validate_login(&LoginRequest::new("a@example.com", "")).unwrap_err();
        assert_eq!(err.field, "password");
    }

    #[test]
    fn test_validate_publication() {
        assert!(validate_publication(&publication()).is_ok());

        let mut request = publication();
        request.title = "   ".to_string();
        assert_eq!(validate_publication(&request).unwrap_err().field, "title");

        let mut request = publication();
        request.category = String::new();
        assert_eq!(validate_publication(&request).unwrap_err().field, "category");

        let mut request = publication();
        std::mem::swap(&mut request.valid_from, &mut request.valid_to);
        assert_eq!(validate_publication(&request).unwrap_err().field, "validTo");

        let mut request = publication();
        request.valid_to = request.valid_from;
        assert!(validate_publication(&request).is_ok());
    }

    #[test]
    fn test_validate_publication_update() {
        assert!(validate_publication_update(&UpdatePublicationRequest::default()).is_ok());

        let request = UpdatePublicationRequest {
            content: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validate_publication_update(&request).unwrap_err().field,
            "content"
        );

        let request = UpdatePublicationRequest {
            valid_from: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            valid_to: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(validate_publication_update(&request).is_err());
    }

    #[test]
    fn test_drive_links() {
        assert_eq!(
            extract_drive_file_id("https://drive.google.com/file/d/1AbC_x/view?usp=sharing"),
            Some("1AbC_x")
        );
        assert_eq!(
            extract_drive_file_id("https://drive.google.com/open?id=1AbC_x&authuser=0"),
            Some("1AbC_x")
        );
        assert_eq!(extract_drive_file_id("https://drive.google.com/drive/"), None);

        assert!(validate_drive_url("https://drive.google.com/file/d/1AbC_x/view").is_ok());
        assert!(validate_drive_url("https://example.com/file/d/1AbC_x/view").is_err());
        assert!(validate_drive_url("https://drive.google.com/open?id=").is_err());
    }

    #[test]
    fn test_validate_comment_and_subscription() {
        assert!(validate_comment(&CommentRequest { content: "Nice".into() }).is_ok());
        assert!(validate_comment(&CommentRequest { content: " ".into() }).is_err());
        assert!(validate_subscription(&NewsletterSubscriptionRequest::new("x@y.io")).is_ok());
        assert!(validate_subscription(&NewsletterSubscriptionRequest::new("x")).is_err());
    }
}
