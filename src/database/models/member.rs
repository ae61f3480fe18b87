// 群组成员实体

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::StoreError;
use crate::models::{GroupMember, Role, RowState};

/// 群组成员实体，对应数据库中的 group_members 表
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    /// 成员角色：casual / moderator / admin
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<GroupMemberEntity> for GroupMember {
    type Error = StoreError;

    fn try_from(row: GroupMemberEntity) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| StoreError::CorruptRow(format!("group_members.{}: {}", row.id, e)))?;
        Ok(GroupMember {
            id: row.id,
            user_id: row.user_id,
            group_id: row.group_id,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: RowState::from_tombstone(row.deleted_at),
        })
    }
}
