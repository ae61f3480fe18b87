// 用户：注册、登录会话、资料与当前坐标

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{CachedSession, SessionId, SessionStore};
use crate::config::Config;
use crate::database::{StoreError, UserStore};
use crate::error::{AppError, StoreResultExt};
use crate::location::validate_coordinates;
use crate::models::{NewUser, User};
use crate::utils::{generate_token, hash_password, verify_password, verify_token};

pub const MIN_PASSWORD_LEN: usize = 6;

/// 登录成功后签发的令牌
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
    pub user: User,
}

fn validate_profile(name: &str, email: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(AppError::Validation(format!("{email} is not a valid email")));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn duplicate_email(source: StoreError, op: &'static str) -> AppError {
    match source {
        StoreError::Duplicate(_) => AppError::Conflict("email is already registered".into()),
        source => AppError::Storage { op, source },
    }
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    config: Config,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        validate_profile(name, email)?;
        validate_password(password)?;

        let password_hash =
            hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?;
        let user = self
            .users
            .insert(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| duplicate_email(e, "insert user"))?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// 邮箱不存在与密码错误返回同一个错误
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        debug!(%email, "login attempt");

        let user = self
            .users
            .find_by_email(email)
            .await
            .during("find user by email")?;
        let Some(user) = user else {
            warn!(%email, "login with unknown email");
            return Err(AppError::Unauthorized("invalid email or password".into()));
        };

        let matches = verify_password(password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !matches {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(AppError::Unauthorized("invalid email or password".into()));
        }

        let issued = self.start_session(user).await?;
        info!(user_id = %issued.user.id, "user logged in");
        Ok(issued)
    }

    /// 新建会话并签发绑定该会话的令牌
    pub async fn start_session(&self, user: User) -> Result<IssuedToken, AppError> {
        let session_id = Uuid::new_v4();
        let (token, expires_at) = generate_token(user.id, session_id, &self.config)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;

        self.sessions
            .save(&CachedSession {
                session_id,
                user_id: user.id,
                created_at: chrono::Utc::now().timestamp(),
                expires_at,
            })
            .await
            .during("save session")?;

        Ok(IssuedToken {
            token,
            expires_at,
            user,
        })
    }

    /// 令牌签名、会话和用户三者都有效时返回调用者
    pub async fn authenticate(&self, token: &str) -> Result<(User, SessionId), AppError> {
        let claims = verify_token(token, &self.config).map_err(|e| {
            warn!("token rejected: {}", e);
            AppError::Unauthorized("invalid or expired token".into())
        })?;
        let (Some(user_id), Some(session_id)) = (claims.user_id(), claims.session_id()) else {
            return Err(AppError::Unauthorized("malformed token claims".into()));
        };

        let session = self
            .sessions
            .find(session_id)
            .await
            .during("load session")?
            .filter(|session| session.user_id == user_id)
            .ok_or_else(|| AppError::Unauthorized("session has ended".into()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .during("load caller")?
            .ok_or_else(|| AppError::Unauthorized("user no longer exists".into()))?;

        Ok((user, SessionId(session.session_id)))
    }

    /// 删除会话，之后该令牌不再可用
    pub async fn logout(&self, session: SessionId) -> Result<(), AppError> {
        let removed = self
            .sessions
            .remove(session.0)
            .await
            .during("remove session")?;
        if !removed {
            return Err(AppError::Unauthorized("session has ended".into()));
        }

        info!(session_id = %session.0, "user logged out");
        Ok(())
    }

    pub async fn find(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await
            .during("find user")?
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let matches = verify_password(old_password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !matches {
            return Err(AppError::Unauthorized("old password is incorrect".into()));
        }
        validate_password(new_password)?;

        let password_hash =
            hash_password(new_password).map_err(|e| AppError::Internal(e.to_string()))?;
        if !self
            .users
            .update_password(user.id, &password_hash)
            .await
            .during("update password")?
        {
            return Err(AppError::NotFound("user"));
        }

        info!(user_id = %user.id, "password changed");
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<User, AppError> {
        validate_profile(name, email)?;
        let user = self
            .users
            .update_profile(user_id, name.trim(), email)
            .await
            .map_err(|e| duplicate_email(e, "update user"))?
            .ok_or(AppError::NotFound("user"))?;

        info!(%user_id, "profile updated");
        Ok(user)
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<(), AppError> {
        if !self
            .users
            .soft_delete(user_id)
            .await
            .during("delete user")?
        {
            return Err(AppError::NotFound("user"));
        }

        info!(%user_id, "user deleted");
        Ok(())
    }

    pub async fn set_coordinates(&self, user_id: Uuid, lat: f64, lon: f64) -> Result<(), AppError> {
        validate_coordinates(lat, lon)?;
        if !self
            .users
            .set_coordinates(user_id, lat, lon)
            .await
            .during("set coordinates")?
        {
            return Err(AppError::NotFound("user"));
        }

        debug!(%user_id, lat, lon, "coordinates updated");
        Ok(())
    }
}
