//! Repository backing the confirmation-email sweep.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use gibi_core::users::{User, UserRepositoryTrait};
use gibi_core::Result;

use crate::db::{get_connection, to_db_timestamp, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users::dsl::*;

use super::model::{NewUserDB, UserDB};

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }

    pub async fn insert(
        &self,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Result<User> {
        let new_user = NewUserDB {
            name: user_name.into(),
            email: user_email.into(),
            is_activated: false,
            created_at: to_db_timestamp(registered_at),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let result_db = diesel::insert_into(users)
                    .values(&new_user)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                result_db.into_domain()
            })
            .await
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_pending_confirmation(&self, created_after: DateTime<Utc>) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users
            .filter(is_activated.eq(false))
            .filter(created_at.gt(to_db_timestamp(created_after)))
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(UserDB::into_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use chrono::Duration;
    use diesel::r2d2::{ConnectionManager, Pool};

    fn repository() -> UserRepository {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder().max_size(1).build(manager).unwrap();
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();
        let pool = Arc::new(pool);
        let writer = WriteHandle::new(pool.clone());
        UserRepository::new(pool, writer)
    }

    #[tokio::test]
    async fn pending_confirmation_filters_by_window_and_activation() {
        let repo = repository();
        let now = Utc::now();

        repo.insert("recent", "recent@example.com", now - Duration::hours(2))
            .await
            .unwrap();
        repo.insert("stale", "stale@example.com", now - Duration::hours(90))
            .await
            .unwrap();

        let pending = repo
            .find_pending_confirmation(now - Duration::hours(60))
            .await
            .unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].email, "recent@example.com");
        assert!(!pending[0].is_activated);
    }
}
