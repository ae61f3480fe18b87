// 数据库模块
// 存储契约（trait）以及基于 Postgres 的实现

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AreaBounds, Group, GroupMember, Location, LocationDraft, NewGroup, NewUser, Page, Pagination,
    Role, User,
};

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod operations;

pub use operations::{GroupOperation, LocationOperation, MemberOperation, UserOperation};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// 唯一约束冲突，携带约束名
    #[error("unique constraint violated: {0}")]
    Duplicate(String),
    /// 行数据无法映射回领域模型
    #[error("corrupt row: {0}")]
    CorruptRow(String),
    #[error(transparent)]
    Database(sqlx::Error),
    #[error(transparent)]
    Cache(#[from] redis::RedisError),
    /// 缓存中的值无法序列化或反序列化
    #[error("cache encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Duplicate(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// 所有读取方法只返回未删除的行
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 邮箱重复时返回 `Duplicate`
    async fn insert(&self, user: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> StoreResult<Option<User>>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool>;
    async fn set_coordinates(&self, id: Uuid, lat: f64, lon: f64) -> StoreResult<bool>;
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool>;
    /// 当前坐标落在区域内的用户
    async fn ids_in_area(&self, bounds: &AreaBounds) -> StoreResult<Vec<Uuid>>;
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// 访问码与未删除群组冲突时返回 `Duplicate`
    async fn insert(&self, group: NewGroup) -> StoreResult<Group>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Group>>;
    async fn find_by_access_code(&self, code: &str) -> StoreResult<Option<Group>>;
    async fn update(&self, id: Uuid, title: &str, description: &str) -> StoreResult<Option<Group>>;
    /// 同时软删除该群组的全部成员关系
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn list(&self, pagination: &Pagination) -> StoreResult<Page<Group>>;
}

#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// 原子的“不存在则插入”，同一 (user_id, group_id) 已有未删除记录时返回 `Duplicate`
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        role: Role,
    ) -> StoreResult<GroupMember>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<GroupMember>>;
    async fn find_by_user_and_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> StoreResult<Option<GroupMember>>;
    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<GroupMember>>;
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn list_by_group(
        &self,
        group_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>>;
    /// 只保留 user_id 在给定集合中的成员
    async fn list_by_group_and_users(
        &self,
        group_id: Uuid,
        user_ids: &[Uuid],
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>>;
    async fn user_ids_in_group(&self, group_id: Uuid) -> StoreResult<Vec<Uuid>>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn insert(&self, user_id: Uuid, draft: LocationDraft) -> StoreResult<Location>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Location>>;
    /// 仅当 `owner_id` 是创建者时更新
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: LocationDraft,
    ) -> StoreResult<Option<Location>>;
    /// 仅当 `owner_id` 是创建者时删除
    async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool>;
    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>>;
    /// `user_ids` 为 `Some` 时只返回这些用户的地点
    async fn find_in_area(
        &self,
        bounds: &AreaBounds,
        user_ids: Option<&[Uuid]>,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>>;
}
