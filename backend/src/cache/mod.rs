//! Session cache for the refresh-token lifecycle
//!
//! Holds at most one live refresh token per user, keyed by user id. Storing
//! a new token overwrites the previous one, which is what invalidates an
//! older session on a second login. The cache's own atomic get/set/delete
//! operations are the only synchronization primitive; concurrent logins for
//! the same user race last-write-wins.

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Key-value contract the auth service depends on.
///
/// Implementations must treat `delete` of an absent key as success.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the stored refresh token for a user, if one is live.
    async fn get(&self, user_id: Uuid) -> Result<Option<String>>;

    /// Store a refresh token with a TTL, overwriting any previous one.
    async fn put(&self, user_id: Uuid, refresh_token: &str, ttl: Duration) -> Result<()>;

    /// Remove the stored refresh token. Idempotent.
    async fn delete(&self, user_id: Uuid) -> Result<()>;
}

fn session_key(user_id: Uuid) -> String {
    format!("refresh_token:{}", user_id)
}

/// Redis-backed session store used in production
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Wrap an established connection manager
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connect to Redis.
    ///
    /// Unlike optional caching layers, the session store is load-bearing:
    /// callers should treat a connection failure as fatal at startup.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<String>> {
        // ConnectionManager is a cheap handle over a multiplexed connection
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(session_key(user_id)).await?;
        Ok(value)
    }

    async fn put(&self, user_id: Uuid, refresh_token: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SETEX")
            .arg(session_key(user_id))
            .arg(ttl.as_secs())
            .arg(refresh_token)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(session_key(user_id)).await?;
        Ok(())
    }
}

/// In-memory session store for tests and local development without Redis.
///
/// Honors TTLs lazily: expired entries are dropped on the next read.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<Uuid, (String, Instant)>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<String>> {
        let mut entries = self.entries.lock().expect("session store mutex poisoned");
        let now = Instant::now();
        let expired = matches!(entries.get(&user_id), Some((_, expires_at)) if *expires_at <= now);
        if expired {
            entries.remove(&user_id);
            return Ok(None);
        }
        Ok(entries.get(&user_id).map(|(token, _)| token.clone()))
    }

    async fn put(&self, user_id: Uuid, refresh_token: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().expect("session store mutex poisoned");
        entries.insert(user_id, (refresh_token.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<()> {
        let mut entries = self.entries.lock().expect("session store mutex poisoned");
        entries.remove(&user_id);
        Ok(())
    }
}
