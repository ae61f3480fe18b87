use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{GroupMember, Role};

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub access_code: String,
}

/// 角色按字符串接收，非法值由 GroupAuthority 拒绝
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(alias = "access_level")]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupMember> for MemberResponse {
    fn from(member: GroupMember) -> Self {
        Self {
            id: member.id,
            user_id: member.user_id,
            group_id: member.group_id,
            role: member.role,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}
