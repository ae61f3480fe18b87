// 群组成员管理：加入、角色变更、移除、查询

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::{GroupStore, MembershipStore, StoreError};
use crate::error::{AppError, StoreResultExt};
use crate::models::role::UnknownRole;
use crate::models::{Group, GroupMember, Page, Pagination, Role};

#[derive(Clone)]
pub struct GroupAuthority {
    groups: Arc<dyn GroupStore>,
    members: Arc<dyn MembershipStore>,
}

impl GroupAuthority {
    pub fn new(groups: Arc<dyn GroupStore>, members: Arc<dyn MembershipStore>) -> Self {
        Self { groups, members }
    }

    /// 通过访问码加入群组，新成员角色为 casual
    pub async fn join(&self, access_code: &str, user_id: Uuid) -> Result<GroupMember, AppError> {
        debug!(%user_id, "joining group by access code");

        let group = self
            .groups
            .find_by_access_code(access_code)
            .await
            .during("find group by access code")?
            .ok_or(AppError::NotFound("group"))?;

        if group.owner_user_id == user_id {
            warn!(%user_id, group_id = %group.id, "owner tried to join own group");
            return Err(AppError::Forbidden(
                "group owner cannot join own group".into(),
            ));
        }

        // 并发加入由存储层唯一索引裁决
        match self
            .members
            .insert_if_absent(user_id, group.id, Role::Casual)
            .await
        {
            Ok(member) => {
                info!(%user_id, group_id = %group.id, member_id = %member.id, "user joined group");
                Ok(member)
            }
            Err(StoreError::Duplicate(_)) => {
                warn!(%user_id, group_id = %group.id, "duplicate join");
                Err(AppError::Conflict(
                    "user is already a member of this group".into(),
                ))
            }
            Err(source) => Err(AppError::Storage {
                op: "insert membership",
                source,
            }),
        }
    }

    /// 只做角色变更，调用方权限由 AuthorizationGate 检查
    pub async fn change_role(
        &self,
        member_id: Uuid,
        new_role: &str,
    ) -> Result<GroupMember, AppError> {
        let role: Role = new_role
            .parse()
            .map_err(|e: UnknownRole| AppError::Validation(e.to_string()))?;

        let member = self
            .members
            .set_role(member_id, role)
            .await
            .during("update member role")?
            .ok_or(AppError::NotFound("member"))?;

        info!(%member_id, %role, "member role changed");
        Ok(member)
    }

    pub async fn remove(&self, member_id: Uuid) -> Result<(), AppError> {
        let removed = self
            .members
            .soft_delete(member_id)
            .await
            .during("remove member")?;
        if !removed {
            return Err(AppError::NotFound("member"));
        }

        info!(%member_id, "member removed");
        Ok(())
    }

    pub async fn list_members(
        &self,
        group_id: Uuid,
        pagination: &Pagination,
    ) -> Result<Page<GroupMember>, AppError> {
        self.members
            .list_by_group(group_id, pagination)
            .await
            .during("list members")
    }

    /// 未找到时返回 `None`，由调用方决定是否视为错误
    pub async fn find_membership(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<GroupMember>, AppError> {
        self.members
            .find_by_user_and_group(user_id, group_id)
            .await
            .during("find membership")
    }

    pub async fn find_group(&self, group_id: Uuid) -> Result<Option<Group>, AppError> {
        self.groups
            .find_by_id(group_id)
            .await
            .during("find group")
    }

    /// 取出属于指定群组的成员记录，成员属于其他群组时同样视为不存在
    pub async fn member_in_group(
        &self,
        group_id: Uuid,
        member_id: Uuid,
    ) -> Result<GroupMember, AppError> {
        self.members
            .find_by_id(member_id)
            .await
            .during("find member")?
            .filter(|member| member.group_id == group_id)
            .ok_or(AppError::NotFound("member"))
    }

    /// 调用者退出群组
    pub async fn leave(&self, group_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let member = self
            .find_membership(user_id, group_id)
            .await?
            .ok_or(AppError::NotFound("member"))?;
        self.remove(member.id).await
    }

    /// 群主加上所有未删除成员的用户ID
    pub async fn user_ids_in_scope(&self, group_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let group = self
            .find_group(group_id)
            .await?
            .ok_or(AppError::NotFound("group"))?;

        let mut user_ids = self
            .members
            .user_ids_in_group(group_id)
            .await
            .during("list group user ids")?;
        user_ids.push(group.owner_user_id);
        Ok(user_ids)
    }
}
