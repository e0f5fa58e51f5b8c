//! Database models for users.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundbook_core::users::{default_starting_balance, NewUser, User};

use crate::utils::{parse_decimal_string_tolerant, parse_timestamp_tolerant};

/// Database model for users
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Default,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub balance: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            balance: parse_decimal_string_tolerant(&db.balance, "balance"),
            created_at: parse_timestamp_tolerant(&db.created_at, "created_at"),
            updated_at: parse_timestamp_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            email: domain.email,
            balance: domain
                .balance
                .unwrap_or_else(default_starting_balance)
                .to_string(),
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}
