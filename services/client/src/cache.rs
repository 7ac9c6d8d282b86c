//! Redis-backed session store
//!
//! Lets several console processes (or machines) share one signed-in session.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::ClientResult;
use crate::session::SessionStore;

/// Prefix put in front of every session entry
pub const DEFAULT_KEY_PREFIX: &str = "portal:session:";

/// Configuration for the Redis session store
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Lifetime of each entry; `None` keeps entries until removed
    pub ttl_seconds: Option<u64>,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ttl_seconds: None,
        }
    }
}

/// Session entries kept in Redis
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    prefix: String,
    ttl_seconds: Option<u64>,
}

impl RedisStore {
    /// Create a store; no connection is made until first use
    pub fn new(config: &RedisConfig) -> ClientResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis session store initialized with URL: {}", config.url);
        Ok(Self {
            client,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl_seconds: config.ttl_seconds,
        })
    }

    /// Use a different key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    async fn get_connection(&self) -> ClientResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> ClientResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut conn = self.get_connection().await?;

        if let Some(ttl) = self.ttl_seconds {
            let _: () = conn.set_ex(self.key(key), value, ttl).await?;
        } else {
            let _: () = conn.set(self.key(key), value).await?;
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(self.key(key)).await?;
        Ok(())
    }
}
