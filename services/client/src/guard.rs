//! Access guards for admin screens

use crate::error::ClientResult;
use crate::session::Session;

/// Where a signed-out visitor is sent
pub const LOGIN_PATH: &str = "/login";
/// Where an admin without the required role is sent
pub const DASHBOARD_PATH: &str = "/admin";

/// Access level a screen requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Public,
    Authenticated,
    SuperAdmin,
}

/// Outcome of checking a guard against the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GuardDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

impl Guard {
    pub async fn check(self, session: &Session) -> ClientResult<GuardDecision> {
        if self == Guard::Public {
            return Ok(GuardDecision::Allow);
        }

        if !session.is_authenticated().await? {
            return Ok(GuardDecision::RedirectToLogin);
        }

        if self == Guard::SuperAdmin && !session.is_super_admin().await? {
            return Ok(GuardDecision::RedirectToDashboard);
        }

        Ok(GuardDecision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::{LoginResponse, User, UserRole, UserStatus};

    async fn signed_in(role: UserRole) -> Session {
        let session = Session::in_memory();
        session
            .save(&LoginResponse {
                token: "t".to_string(),
                user: User {
                    id: "u1".to_string(),
                    email: "a@example.com".to_string(),
                    role,
                    created_at: Utc::now(),
                    last_login: None,
                    status: UserStatus::Active,
                    display_name: None,
                },
            })
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_signed_out() {
        let session = Session::in_memory();
        assert_eq!(Guard::Public.check(&session).await.unwrap(), GuardDecision::Allow);
        assert_eq!(
            Guard::Authenticated.check(&session).await.unwrap(),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(
            Guard::SuperAdmin.check(&session).await.unwrap(),
            GuardDecision::RedirectToLogin
        );
    }

    #[tokio::test]
    async fn test_admin() {
        let session = signed_in(UserRole::Admin).await;
        assert_eq!(
            Guard::Authenticated.check(&session).await.unwrap(),
            GuardDecision::Allow
        );
        let decision = Guard::SuperAdmin.check(&session).await.unwrap();
        assert_eq!(decision, GuardDecision::RedirectToDashboard);
        assert_eq!(decision.redirect_path(), Some("/admin"));
    }

    #[tokio::test]
    async fn test_super_admin() {
        let session = signed_in(UserRole::SuperAdmin).await;
        assert_eq!(
            Guard::SuperAdmin.check(&session).await.unwrap(),
            GuardDecision::Allow
        );
    }
}
