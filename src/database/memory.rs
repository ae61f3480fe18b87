// 内存存储，仅用于测试
// 唯一性检查与插入在同一把写锁内完成，语义与数据库的部分唯一索引一致

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cache::{CachedSession, SessionStore};
use crate::database::{
    GroupStore, LocationStore, MembershipStore, StoreError, StoreResult, UserStore,
};
use crate::models::{
    AreaBounds, Group, GroupMember, Location, LocationDraft, NewGroup, NewUser, Page, Pagination,
    Role, RowState, User,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    members: HashMap<Uuid, GroupMember>,
    locations: HashMap<Uuid, Location>,
    sessions: HashMap<Uuid, CachedSession>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_user(&self, name: &str) -> User {
        let user = NewUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: String::new(),
        };
        UserStore::insert(self, user).await.expect("seed user")
    }

    pub async fn seed_group(&self, owner: &User, access_code: &str) -> Group {
        let group = NewGroup {
            title: format!("{} group", owner.name),
            description: String::new(),
            owner_user_id: owner.id,
            access_code: access_code.to_string(),
        };
        GroupStore::insert(self, group).await.expect("seed group")
    }
}

// 与 SQL 的 ORDER BY created_at, id 保持一致
fn sorted_by_creation<T>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> (DateTime<Utc>, Uuid),
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.state.is_active() && u.email == user.email)
        {
            return Err(StoreError::Duplicate("users_email_active_uniq".into()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            lat: None,
            lon: None,
            created_at: now,
            updated_at: now,
            state: RowState::Active,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).filter(|u| u.state.is_active()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.state.is_active() && u.email == email)
            .cloned())
    }

    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != id && u.state.is_active() && u.email == email)
        {
            return Err(StoreError::Duplicate("users_email_active_uniq".into()));
        }
        Ok(tables
            .users
            .get_mut(&id)
            .filter(|u| u.state.is_active())
            .map(|u| {
                u.name = name.to_string();
                u.email = email.to_string();
                u.updated_at = Utc::now();
                u.clone()
            }))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id).filter(|u| u.state.is_active()) {
            Some(u) => {
                u.password_hash = password_hash.to_string();
                u.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn set_coordinates(&self, id: Uuid, lat: f64, lon: f64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id).filter(|u| u.state.is_active()) {
            Some(u) => {
                u.lat = Some(lat);
                u.lon = Some(lon);
                u.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id).filter(|u| u.state.is_active()) {
            Some(u) => {
                u.state = RowState::Deleted(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn ids_in_area(&self, bounds: &AreaBounds) -> StoreResult<Vec<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.state.is_active())
            .filter(|u| matches!((u.lat, u.lon), (Some(lat), Some(lon)) if bounds.contains(lat, lon)))
            .map(|u| u.id)
            .collect())
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn insert(&self, group: NewGroup) -> StoreResult<Group> {
        let mut tables = self.tables.write().await;
        if tables
            .groups
            .values()
            .any(|g| g.state.is_active() && g.access_code == group.access_code)
        {
            return Err(StoreError::Duplicate("groups_access_code_active_uniq".into()));
        }
        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            title: group.title,
            description: group.description,
            owner_user_id: group.owner_user_id,
            access_code: group.access_code,
            created_at: now,
            updated_at: now,
            state: RowState::Active,
        };
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables.groups.get(&id).filter(|g| g.state.is_active()).cloned())
    }

    async fn find_by_access_code(&self, code: &str) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .values()
            .find(|g| g.state.is_active() && g.access_code == code)
            .cloned())
    }

    async fn update(&self, id: Uuid, title: &str, description: &str) -> StoreResult<Option<Group>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .groups
            .get_mut(&id)
            .filter(|g| g.state.is_active())
            .map(|g| {
                g.title = title.to_string();
                g.description = description.to_string();
                g.updated_at = Utc::now();
                g.clone()
            }))
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        match tables.groups.get_mut(&id).filter(|g| g.state.is_active()) {
            Some(g) => g.state = RowState::Deleted(now),
            None => return Ok(false),
        }
        for member in tables
            .members
            .values_mut()
            .filter(|m| m.group_id == id && m.state.is_active())
        {
            member.state = RowState::Deleted(now);
        }
        Ok(true)
    }

    async fn list(&self, pagination: &Pagination) -> StoreResult<Page<Group>> {
        let tables = self.tables.read().await;
        let rows = sorted_by_creation(
            tables.groups.values().filter(|g| g.state.is_active()).cloned(),
            |g| (g.created_at, g.id),
        );
        Ok(Page::slice(rows, pagination))
    }
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        role: Role,
    ) -> StoreResult<GroupMember> {
        let mut tables = self.tables.write().await;
        if tables
            .members
            .values()
            .any(|m| m.state.is_active() && m.user_id == user_id && m.group_id == group_id)
        {
            return Err(StoreError::Duplicate(
                "group_members_user_group_active_uniq".into(),
            ));
        }
        let now = Utc::now();
        let member = GroupMember {
            id: Uuid::new_v4(),
            user_id,
            group_id,
            role,
            created_at: now,
            updated_at: now,
            state: RowState::Active,
        };
        tables.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<GroupMember>> {
        let tables = self.tables.read().await;
        Ok(tables.members.get(&id).filter(|m| m.state.is_active()).cloned())
    }

    async fn find_by_user_and_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> StoreResult<Option<GroupMember>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .find(|m| m.state.is_active() && m.user_id == user_id && m.group_id == group_id)
            .cloned())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<GroupMember>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .members
            .get_mut(&id)
            .filter(|m| m.state.is_active())
            .map(|m| {
                m.role = role;
                m.updated_at = Utc::now();
                m.clone()
            }))
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.members.get_mut(&id).filter(|m| m.state.is_active()) {
            Some(m) => {
                m.state = RowState::Deleted(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn list_by_group(
        &self,
        group_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>> {
        let tables = self.tables.read().await;
        let rows = sorted_by_creation(
            tables
                .members
                .values()
                .filter(|m| m.state.is_active() && m.group_id == group_id)
                .cloned(),
            |m| (m.created_at, m.id),
        );
        Ok(Page::slice(rows, pagination))
    }

    async fn list_by_group_and_users(
        &self,
        group_id: Uuid,
        user_ids: &[Uuid],
        pagination: &Pagination,
    ) -> StoreResult<Page<GroupMember>> {
        let tables = self.tables.read().await;
        let rows = sorted_by_creation(
            tables
                .members
                .values()
                .filter(|m| {
                    m.state.is_active() && m.group_id == group_id && user_ids.contains(&m.user_id)
                })
                .cloned(),
            |m| (m.created_at, m.id),
        );
        Ok(Page::slice(rows, pagination))
    }

    async fn user_ids_in_group(&self, group_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .filter(|m| m.state.is_active() && m.group_id == group_id)
            .map(|m| m.user_id)
            .collect())
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn insert(&self, user_id: Uuid, draft: LocationDraft) -> StoreResult<Location> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let location = Location {
            id: Uuid::new_v4(),
            user_id,
            kind: draft.kind,
            address: draft.address,
            title: draft.title,
            description: draft.description,
            lat: draft.lat,
            lon: draft.lon,
            created_at: now,
            updated_at: now,
            state: RowState::Active,
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Location>> {
        let tables = self.tables.read().await;
        Ok(tables.locations.get(&id).filter(|l| l.state.is_active()).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: LocationDraft,
    ) -> StoreResult<Option<Location>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .locations
            .get_mut(&id)
            .filter(|l| l.state.is_active() && l.user_id == owner_id)
            .map(|l| {
                l.kind = draft.kind;
                l.address = draft.address;
                l.title = draft.title;
                l.description = draft.description;
                l.lat = draft.lat;
                l.lon = draft.lon;
                l.updated_at = Utc::now();
                l.clone()
            }))
    }

    async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(
            match tables
                .locations
                .get_mut(&id)
                .filter(|l| l.state.is_active() && l.user_id == owner_id)
            {
                Some(l) => {
                    l.state = RowState::Deleted(Utc::now());
                    true
                }
                None => false,
            },
        )
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>> {
        let tables = self.tables.read().await;
        let rows = sorted_by_creation(
            tables
                .locations
                .values()
                .filter(|l| l.state.is_active() && l.user_id == user_id)
                .cloned(),
            |l| (l.created_at, l.id),
        );
        Ok(Page::slice(rows, pagination))
    }

    async fn find_in_area(
        &self,
        bounds: &AreaBounds,
        user_ids: Option<&[Uuid]>,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>> {
        let tables = self.tables.read().await;
        let rows = sorted_by_creation(
            tables
                .locations
                .values()
                .filter(|l| l.state.is_active() && bounds.contains(l.lat, l.lon))
                .filter(|l| user_ids.is_none_or(|ids| ids.contains(&l.user_id)))
                .cloned(),
            |l| (l.created_at, l.id),
        );
        Ok(Page::slice(rows, pagination))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save(&self, session: &CachedSession) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> StoreResult<Option<CachedSession>> {
        let tables = self.tables.read().await;
        let now = Utc::now().timestamp();
        Ok(tables
            .sessions
            .get(&session_id)
            .filter(|s| s.ttl_secs(now).is_some())
            .cloned())
    }

    async fn remove(&self, session_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.sessions.remove(&session_id).is_some())
    }
}
