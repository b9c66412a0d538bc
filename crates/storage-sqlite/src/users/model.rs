//! Database models for the users table.

use diesel::prelude::*;

use gibi_core::users::User;
use gibi_core::Result;

use crate::db::from_db_timestamp;

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_activated: bool,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub name: String,
    pub email: String,
    pub is_activated: bool,
    pub created_at: String,
}

impl UserDB {
    pub fn into_domain(self) -> Result<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            is_activated: self.is_activated,
            created_at: from_db_timestamp(&self.created_at)?,
        })
    }
}
