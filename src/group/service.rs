// 群组的创建、查询、更新与删除

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::AccessCodeGenerator;
use crate::database::{GroupStore, StoreError};
use crate::error::{AppError, StoreResultExt};
use crate::models::{Group, NewGroup, Page, Pagination};

#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupStore>,
    codes: Arc<dyn AccessCodeGenerator>,
    /// 访问码冲突时最多尝试的次数
    attempts: u32,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupStore>,
        codes: Arc<dyn AccessCodeGenerator>,
        attempts: u32,
    ) -> Self {
        Self {
            groups,
            codes,
            attempts: attempts.max(1),
        }
    }

    /// 创建群组并分配新的访问码
    ///
    /// 先做一次存在性检查，插入时再由唯一索引兜底；两者任一冲突都换一个码重试。
    pub async fn create(
        &self,
        owner_user_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Group, AppError> {
        debug!(%owner_user_id, "creating group");

        for attempt in 1..=self.attempts {
            let access_code = self.codes.generate();

            let taken = self
                .groups
                .find_by_access_code(&access_code)
                .await
                .during("check access code")?
                .is_some();
            if taken {
                debug!(attempt, "access code already in use");
                continue;
            }

            let new_group = NewGroup {
                title: title.to_string(),
                description: description.to_string(),
                owner_user_id,
                access_code,
            };
            match self.groups.insert(new_group).await {
                Ok(group) => {
                    info!(group_id = %group.id, %owner_user_id, "group created");
                    return Ok(group);
                }
                Err(StoreError::Duplicate(constraint)) => {
                    debug!(attempt, %constraint, "access code collided on insert");
                }
                Err(source) => {
                    return Err(AppError::Storage {
                        op: "insert group",
                        source,
                    });
                }
            }
        }

        warn!(attempts = self.attempts, "access code attempts exhausted");
        Err(AppError::Conflict(
            "could not allocate a unique access code".into(),
        ))
    }

    pub async fn find(&self, group_id: Uuid) -> Result<Group, AppError> {
        self.groups
            .find_by_id(group_id)
            .await
            .during("find group")?
            .ok_or(AppError::NotFound("group"))
    }

    pub async fn list(&self, pagination: &Pagination) -> Result<Page<Group>, AppError> {
        self.groups.list(pagination).await.during("list groups")
    }

    pub async fn update(
        &self,
        group_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Group, AppError> {
        let group = self
            .groups
            .update(group_id, title, description)
            .await
            .during("update group")?
            .ok_or(AppError::NotFound("group"))?;

        info!(%group_id, "group updated");
        Ok(group)
    }

    pub async fn delete(&self, group_id: Uuid) -> Result<(), AppError> {
        if !self
            .groups
            .soft_delete(group_id)
            .await
            .during("delete group")?
        {
            return Err(AppError::NotFound("group"));
        }

        info!(%group_id, "group deleted");
        Ok(())
    }
}
