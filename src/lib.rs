use std::sync::Arc;

use cache::{SessionCacheOperation, SessionStore};
use config::Config;
use sqlx::PgPool;

use database::{
    GroupOperation, GroupStore, LocationOperation, LocationStore, MemberOperation,
    MembershipStore, UserOperation, UserStore,
};
use geo::GeoFilter;
use group::{AccessCodeGenerator, AuthorizationGate, GroupAuthority, GroupService, RandomAccessCode};
use location::LocationService;
use user::UserService;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod geo;
pub mod group;
pub mod location;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod user;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub groups: Arc<dyn GroupStore>,
    pub members: Arc<dyn MembershipStore>,
    pub locations: Arc<dyn LocationStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub access_codes: Arc<dyn AccessCodeGenerator>,
}

impl AppState {
    pub fn new(pool: PgPool, redis: Arc<redis::Client>, config: Config) -> Self {
        Self {
            config,
            users: Arc::new(UserOperation::new(pool.clone())),
            groups: Arc::new(GroupOperation::new(pool.clone())),
            members: Arc::new(MemberOperation::new(pool.clone())),
            locations: Arc::new(LocationOperation::new(pool)),
            sessions: Arc::new(SessionCacheOperation::new(redis)),
            access_codes: Arc::new(RandomAccessCode),
        }
    }

    pub fn authority(&self) -> GroupAuthority {
        GroupAuthority::new(self.groups.clone(), self.members.clone())
    }

    pub fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(self.authority())
    }

    pub fn geo(&self) -> GeoFilter {
        GeoFilter::new(
            self.locations.clone(),
            self.users.clone(),
            self.members.clone(),
            self.authority(),
        )
    }

    pub fn group_service(&self) -> GroupService {
        GroupService::new(
            self.groups.clone(),
            self.access_codes.clone(),
            self.config.access_code_attempts,
        )
    }

    pub fn location_service(&self) -> LocationService {
        LocationService::new(self.locations.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            self.users.clone(),
            self.sessions.clone(),
            self.config.clone(),
        )
    }

    /// 所有存储都指向同一个内存实现
    #[cfg(test)]
    pub fn in_memory(store: database::memory::MemoryStore) -> Self {
        Self {
            config: Config::for_tests(),
            users: Arc::new(store.clone()),
            groups: Arc::new(store.clone()),
            members: Arc::new(store.clone()),
            locations: Arc::new(store.clone()),
            sessions: Arc::new(store),
            access_codes: Arc::new(RandomAccessCode),
        }
    }
}
