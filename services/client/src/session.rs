//! Session persistence
//!
//! A session is two string entries, the bearer token and the JSON-encoded
//! current user, kept in a [`SessionStore`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use common::models::{LoginResponse, User, UserRole};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::token::TokenInfo;

/// Entry holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Entry holding the JSON-encoded current user
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key-value storage for session entries
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    async fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk
///
/// Survives restarts of the console, like browser local storage survives a
/// page reload.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> ClientResult<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ClientError::Store(format!(
                    "Unreadable session file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| ClientError::Store(e.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}

/// The signed-in user's session
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn token(&self) -> ClientResult<Option<String>> {
        self.store.get(TOKEN_KEY).await
    }

    /// Stored user; an entry that no longer decodes counts as absent
    pub async fn current_user(&self) -> ClientResult<Option<User>> {
        let Some(raw) = self.store.get(CURRENT_USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    /// Remember a successful login
    pub async fn save(&self, login: &LoginResponse) -> ClientResult<()> {
        let user =
            serde_json::to_string(&login.user).map_err(|e| ClientError::Store(e.to_string()))?;
        self.store.set(TOKEN_KEY, &login.token).await?;
        self.store.set(CURRENT_USER_KEY, &user).await?;
        info!("Session saved for {}", login.user.email);
        Ok(())
    }

    pub async fn clear(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(CURRENT_USER_KEY).await?;
        info!("Session cleared");
        Ok(())
    }

    /// A token is present and, if it is a JWT, has not expired
    pub async fn is_authenticated(&self) -> ClientResult<bool> {
        let Some(token) = self.token().await? else {
            return Ok(false);
        };

        match TokenInfo::inspect(&token) {
            Ok(info) if info.is_expired() => {
                warn!("Stored token has expired");
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    pub async fn has_role(&self, role: UserRole) -> ClientResult<bool> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|user| user.role == role))
    }

    pub async fn is_super_admin(&self) -> ClientResult<bool> {
        self.has_role(UserRole::SuperAdmin).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::UserStatus;

    fn login(role: UserRole) -> LoginResponse {
        LoginResponse {
            token: "opaque-token".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "editor@example.com".to_string(),
                role,
                created_at: Utc::now(),
                last_login: None,
                status: UserStatus::Active,
                display_name: None,
            },
        }
    }

    #[tokio::test]
    async fn test_save_and_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().await.unwrap());
        assert_eq!(session.current_user().await.unwrap(), None);

        session.save(&login(UserRole::Admin)).await.unwrap();
        assert_eq!(session.token().await.unwrap().as_deref(), Some("opaque-token"));
        assert!(session.is_authenticated().await.unwrap());
        assert!(session.has_role(UserRole::Admin).await.unwrap());
        assert!(!session.is_super_admin().await.unwrap());

        session.clear().await.unwrap();
        assert_eq!(session.token().await.unwrap(), None);
        assert_eq!(session.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_user_entry_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(CURRENT_USER_KEY, "{not json").await.unwrap();
        store.set(TOKEN_KEY, "t").await.unwrap();

        let session = Session::new(store);
        assert_eq!(session.current_user().await.unwrap(), None);
        assert!(!session.is_super_admin().await.unwrap());
        assert!(session.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_super_admin() {
        let session = Session::in_memory();
        session.save(&login(UserRole::SuperAdmin)).await.unwrap();
        assert!(session.is_super_admin().await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_persists_between_instances() {
        let path = std::env::temp_dir()
            .join(format!("portal-session-{}", uuid::Uuid::new_v4()))
            .join("session.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        store.set(TOKEN_KEY, "abc").await.unwrap();
        store.set(CURRENT_USER_KEY, "{}").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        reopened.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(CURRENT_USER_KEY).await.unwrap().as_deref(), Some("{}"));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_file_store_rejects_garbage() {
        let path =
            std::env::temp_dir().join(format!("portal-session-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "garbage").unwrap();

        let err = FileStore::new(&path).get(TOKEN_KEY).await.unwrap_err();
        assert!(matches!(err, ClientError::Store(_)));

        std::fs::remove_file(path).unwrap();
    }
}
