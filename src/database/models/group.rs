// 群组实体

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Group, RowState};

/// 群组实体，对应数据库中的 groups 表
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    /// 群组ID
    pub id: Uuid,
    /// 群组名称
    pub title: String,
    /// 群组描述
    pub description: String,
    /// 群主ID
    pub user_id: Uuid,
    /// 访问码
    pub access_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 软删除时间
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<GroupEntity> for Group {
    fn from(row: GroupEntity) -> Self {
        Group {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_user_id: row.user_id,
            access_code: row.access_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: RowState::from_tombstone(row.deleted_at),
        }
    }
}
