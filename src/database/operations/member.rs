// 群组成员存储库

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::limit_offset;
use crate::database::models::GroupMemberEntity;
use crate::database::{MembershipStore, StoreError, StoreResult};
use crate::models::{GroupMember, Page, Pagination, Role};

const MEMBER_COLUMNS: &str = "id, user_id, group_id, role, created_at, updated_at, deleted_at";

const ACTIVE_MEMBERSHIP_INDEX: &str = "group_members_user_group_active_uniq";

#[derive(Clone)]
pub struct MemberOperation {
    db: PgPool,
}

impl MemberOperation {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn into_page(
        rows: Vec<GroupMemberEntity>,
        total: i64,
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>> {
        let items = rows
            .into_iter()
            .map(GroupMember::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total as u64, pagination))
    }
}

#[async_trait]
impl MembershipStore for MemberOperation {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        role: Role,
    ) -> StoreResult<GroupMember> {
        // 唯一索引保证并发加入时只有一条能插入成功
        let sql = format!(
            r#"
            INSERT INTO group_members (id, user_id, group_id, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id, group_id) WHERE deleted_at IS NULL DO NOTHING
            RETURNING {MEMBER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(group_id)
            .bind(role.as_str())
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(StoreError::Duplicate(ACTIVE_MEMBERSHIP_INDEX.to_string())),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<GroupMember>> {
        let sql =
            format!("SELECT {MEMBER_COLUMNS} FROM group_members WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.map(GroupMember::try_from).transpose()
    }

    async fn find_by_user_and_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> StoreResult<Option<GroupMember>> {
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM group_members
            WHERE user_id = $1 AND group_id = $2 AND deleted_at IS NULL
            "#
        );
        let row = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(user_id)
            .bind(group_id)
            .fetch_optional(&self.db)
            .await?;

        row.map(GroupMember::try_from).transpose()
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<GroupMember>> {
        let sql = format!(
            r#"
            UPDATE group_members
            SET role = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {MEMBER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&self.db)
            .await?;

        row.map(GroupMember::try_from).transpose()
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE group_members SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_group(
        &self,
        group_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>> {
        let (limit, offset) = limit_offset(pagination);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM group_members WHERE group_id = $1 AND deleted_at IS NULL",
        )
        .bind(group_id)
        .fetch_one(&self.db);
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM group_members
            WHERE group_id = $1 AND deleted_at IS NULL
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(group_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db);

        let (total, rows) = futures_util::try_join!(total, rows)?;
        Self::into_page(rows, total, pagination)
    }

    async fn list_by_group_and_users(
        &self,
        group_id: Uuid,
        user_ids: &[Uuid],
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>> {
        let (limit, offset) = limit_offset(pagination);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM group_members
            WHERE group_id = $1 AND user_id = ANY($2) AND deleted_at IS NULL
            "#,
        )
        .bind(group_id)
        .bind(user_ids)
        .fetch_one(&self.db);
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM group_members
            WHERE group_id = $1 AND user_id = ANY($2) AND deleted_at IS NULL
            ORDER BY created_at, id
            LIMIT $3 OFFSET $4
            "#
        );
        let rows = sqlx::query_as::<_, GroupMemberEntity>(&sql)
            .bind(group_id)
            .bind(user_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db);

        let (total, rows) = futures_util::try_join!(total, rows)?;
        Self::into_page(rows, total, pagination)
    }

    async fn user_ids_in_group(&self, group_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM group_members WHERE group_id = $1 AND deleted_at IS NULL",
        )
        .bind(group_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ids)
    }
}
