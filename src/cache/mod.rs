// 缓存模块
// 登录会话保存在 Redis 中，登出即删除，令牌随之失效

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::StoreResult;

pub mod session;

pub use session::SessionCacheOperation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSession {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub created_at: i64,
    pub expires_at: i64,
}

impl CachedSession {
    /// 剩余有效秒数，已过期时为 `None`
    pub fn ttl_secs(&self, now: i64) -> Option<u64> {
        let ttl = self.expires_at - now;
        (ttl > 0).then_some(ttl as u64)
    }
}

/// 认证中间件放入请求扩展的当前会话ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 写入会话，过期时间与令牌一致
    async fn save(&self, session: &CachedSession) -> StoreResult<()>;
    async fn find(&self, session_id: Uuid) -> StoreResult<Option<CachedSession>>;
    /// 会话存在并被删除时返回 `true`
    async fn remove(&self, session_id: Uuid) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_has_no_ttl() {
        let session = CachedSession {
            session_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: 100,
            expires_at: 160,
        };

        assert_eq!(session.ttl_secs(100), Some(60));
        assert_eq!(session.ttl_secs(160), None);
        assert_eq!(session.ttl_secs(200), None);
    }
}
