// 请求级授权判定：所有权策略与角色策略
// 两种策略都只读，必须在被保护的操作之前执行

use tracing::warn;
use uuid::Uuid;

use super::GroupAuthority;
use crate::error::AppError;
use crate::models::{Owned, Role};

/// 所有权策略：资源拥有者与调用者一致时放行
pub fn require_owner<R: Owned>(resource: &R, caller: Uuid) -> Result<(), AppError> {
    if resource.owner_user_id() == caller {
        return Ok(());
    }
    warn!(%caller, owner = %resource.owner_user_id(), "ownership check failed");
    Err(AppError::Forbidden("caller does not own this resource".into()))
}

#[derive(Clone)]
pub struct AuthorizationGate {
    authority: GroupAuthority,
}

impl AuthorizationGate {
    pub fn new(authority: GroupAuthority) -> Self {
        Self { authority }
    }

    /// 角色策略
    ///
    /// 群主隐式拥有最高权限，总是放行；否则调用者必须持有成员记录，
    /// 且角色在 `allowed` 集合中。集合按成员关系判断，不按等级比较。
    pub async fn require_role(
        &self,
        group_id: Uuid,
        caller: Uuid,
        allowed: &[Role],
    ) -> Result<(), AppError> {
        let group = self
            .authority
            .find_group(group_id)
            .await?
            .ok_or(AppError::NotFound("group"))?;

        if group.owner_user_id == caller {
            return Ok(());
        }

        let Some(member) = self.authority.find_membership(caller, group_id).await? else {
            warn!(%caller, %group_id, "caller is not a member");
            return Err(AppError::Forbidden("not a member".into()));
        };

        if !allowed.contains(&member.role) {
            warn!(%caller, %group_id, role = %member.role, "insufficient role");
            return Err(AppError::Forbidden(format!(
                "role {} is not allowed here",
                member.role
            )));
        }

        Ok(())
    }
}
