use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use uuid::Uuid;

use super::{CachedSession, SessionStore};
use crate::database::StoreResult;

/// 会话缓存操作
#[derive(Clone)]
pub struct SessionCacheOperation {
    redis: Arc<RedisClient>,
}

impl SessionCacheOperation {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

#[async_trait]
impl SessionStore for SessionCacheOperation {
    async fn save(&self, session: &CachedSession) -> StoreResult<()> {
        let Some(ttl) = session.ttl_secs(chrono::Utc::now().timestamp()) else {
            return Ok(());
        };
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(session)?;
        let _: () = conn
            .set_ex(session_key(session.session_id), json, ttl)
            .await?;
        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> StoreResult<Option<CachedSession>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(session_key(session_id)).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: Uuid) -> StoreResult<bool> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let removed: u32 = conn.del(session_key(session_id)).await?;
        Ok(removed > 0)
    }
}
