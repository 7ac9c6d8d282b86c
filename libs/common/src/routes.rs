//! Resource route table
//!
//! Maps every logical backend resource to the relative path the HTTP client
//! calls. Paths are relative to the configured base URL (origin + `/api`).
//!
//! Builders only substitute identifiers positionally: nothing is escaped,
//! encoded or validated, so an empty or malformed id ends up verbatim in the
//! path and it is up to the backend to answer 404.

/// Base URL used when no configuration overrides it
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090/api";

/// Join a base URL and a relative route path
///
/// Trailing slashes on `base` are dropped so the result always has exactly
/// one `/` between the two parts.
pub fn url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Authentication routes
pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
}

/// Publication routes
pub mod publications {
    pub const BASE: &str = "/publications";
    pub const PUBLIC: &str = "/publications/public";
    pub const ACTIVE: &str = "/publications/public/active";
    pub const BY_CATEGORY: &str = "/publications/public/category";
    pub const PENDING: &str = "/publications/pending";

    pub fn approve(id: &str) -> String {
        format!("{BASE}/{id}/approve")
    }

    pub fn reject(id: &str) -> String {
        format!("{BASE}/{id}/reject")
    }

    pub fn like(id: &str) -> String {
        format!("{PUBLIC}/{id}/like")
    }

    /// Authenticated detail route, also used for update and delete
    pub fn detail(id: &str) -> String {
        format!("{BASE}/{id}")
    }

    pub fn public_detail(id: &str) -> String {
        format!("{PUBLIC}/{id}")
    }

    /// Active publications of one category
    pub fn by_category(category: &str) -> String {
        format!("{BY_CATEGORY}/{category}")
    }
}

/// User management routes (super admin only on the backend)
pub mod users {
    pub const BASE: &str = "/users";

    pub fn detail(id: &str) -> String {
        format!("{BASE}/{id}")
    }

    pub fn status(id: &str) -> String {
        format!("{BASE}/{id}/status")
    }
}

/// Comment routes, always nested under a publication
pub mod comments {
    pub fn base(publication_id: &str) -> String {
        format!("{}/comments", super::publications::detail(publication_id))
    }

    pub fn detail(publication_id: &str, comment_id: &str) -> String {
        format!("{}/{comment_id}", base(publication_id))
    }
}

/// Newsletter routes
pub mod newsletter {
    pub const SUBSCRIBE: &str = "/newsletter/subscribe";
    pub const UNSUBSCRIBE: &str = "/newsletter/unsubscribe";
    pub const SUBSCRIBERS: &str = "/newsletter/subscribers";
    pub const TEST: &str = "/newsletter/test";

    pub fn delete_subscriber(id: &str) -> String {
        format!("{SUBSCRIBERS}/{id}")
    }
}

/// File upload routes
pub mod upload {
    pub const IMAGE: &str = "/upload/image";
    pub const DRIVE: &str = "/upload/drive";
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: &[&str] = &["42", "u1", "", "a b", "65f1c0d2e4b0a1", "x/y"];

    #[test]
    fn test_static_paths() {
        assert_eq!(auth::LOGIN, "/auth/login");
        assert_eq!(auth::REGISTER, "/auth/register");
        assert_eq!(publications::BASE, "/publications");
        assert_eq!(publications::PUBLIC, "/publications/public");
        assert_eq!(publications::ACTIVE, "/publications/public/active");
        assert_eq!(publications::BY_CATEGORY, "/publications/public/category");
        assert_eq!(publications::PENDING, "/publications/pending");
        assert_eq!(users::BASE, "/users");
        assert_eq!(newsletter::SUBSCRIBE, "/newsletter/subscribe");
        assert_eq!(newsletter::UNSUBSCRIBE, "/newsletter/unsubscribe");
        assert_eq!(newsletter::SUBSCRIBERS, "/newsletter/subscribers");
        assert_eq!(newsletter::TEST, "/newsletter/test");
    }

    #[test]
    fn test_end_to_end_examples() {
        assert_eq!(publications::approve("42"), "/publications/42/approve");
        assert_eq!(comments::detail("7", "99"), "/publications/7/comments/99");
        assert_eq!(users::status("u1"), "/users/u1/status");
    }

    #[test]
    fn test_publication_builders() {
        assert_eq!(publications::reject("42"), "/publications/42/reject");
        assert_eq!(publications::like("42"), "/publications/public/42/like");
        assert_eq!(publications::detail("42"), "/publications/42");
        assert_eq!(publications::public_detail("42"), "/publications/public/42");
        assert_eq!(
            publications::by_category("news"),
            "/publications/public/category/news"
        );
        assert_eq!(users::detail("u1"), "/users/u1");
        assert_eq!(
            newsletter::delete_subscriber("s9"),
            "/newsletter/subscribers/s9"
        );
    }

    #[test]
    fn test_detail_and_public_detail_never_collide() {
        for id in IDS {
            let detail = publications::detail(id);
            let public = publications::public_detail(id);
            assert!(detail.ends_with(&format!("/publications/{id}")));
            assert!(public.ends_with(&format!("/publications/public/{id}")));
            assert_ne!(detail, public);
        }
    }

    #[test]
    fn test_comment_detail_extends_base() {
        for publication_id in IDS {
            for comment_id in IDS {
                assert_eq!(
                    comments::detail(publication_id, comment_id),
                    format!("{}/{}", comments::base(publication_id), comment_id)
                );
            }
        }
    }

    #[test]
    fn test_builders_are_deterministic() {
        for id in IDS {
            assert_eq!(publications::approve(id), publications::approve(id));
            assert_eq!(publications::like(id), publications::like(id));
            assert_eq!(users::status(id), users::status(id));
            assert_eq!(comments::base(id), comments::base(id));
        }
    }

    #[test]
    fn test_ids_are_substituted_verbatim() {
        assert_eq!(publications::approve(""), "/publications//approve");
        assert_eq!(users::detail("a b"), "/users/a b");
        assert_eq!(comments::detail("x/y", "1"), "/publications/x/y/comments/1");
    }

    #[test]
    fn test_url_join() {
        assert_eq!(
            url("http://localhost:8090/api", auth::LOGIN),
            "http://localhost:8090/api/auth/login"
        );
        assert_eq!(
            url("http://localhost:8090/api/", auth::LOGIN),
            "http://localhost:8090/api/auth/login"
        );
        assert_eq!(url("http://host/api", "users"), "http://host/api/users");
    }
}
