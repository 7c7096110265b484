use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, NotifyPref, UpdateNotificationPrefs, User};
use crate::schema::users;

#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::insert_into(users::table)
            .values(&user)
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        users::table
            .find(id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        users::table
            .filter(users::username.eq(username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        users::table
            .order(users::username.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Users eligible for the morning digest: master toggle on and the
    /// digest category not disabled.
    pub async fn digest_recipients(&self) -> AppResult<Vec<User>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        users::table
            .filter(users::notifications_enabled.eq(true))
            .filter(users::notify_daily_digest.ne(NotifyPref::Disabled))
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_notification_prefs(
        &self,
        id: i32,
        update: UpdateNotificationPrefs,
    ) -> AppResult<User> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::update(users::table.find(id))
            .set(&update)
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "User".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }
}
