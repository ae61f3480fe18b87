use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Role, RowState};

/// 群组成员记录，每个 (user_id, group_id) 至多一条未删除记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: RowState,
}
