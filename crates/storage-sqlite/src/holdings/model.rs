//! Database models for portfolio holdings.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundbook_core::portfolio::{NewPosition, Position};

use crate::utils::{parse_decimal_string_tolerant, parse_timestamp_tolerant};

/// Database model for holdings
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
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub shares: String,
    pub purchase_price: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<HoldingDB> for Position {
    fn from(db: HoldingDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: parse_decimal_string_tolerant(&db.shares, "shares"),
            purchase_price: parse_decimal_string_tolerant(&db.purchase_price, "purchase_price"),
            created_at: parse_timestamp_tolerant(&db.created_at, "created_at"),
            updated_at: parse_timestamp_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<NewPosition> for HoldingDB {
    fn from(domain: NewPosition) -> Self {
        let now = Utc::now();

        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.user_id,
            symbol: domain.symbol,
            shares: domain.shares.to_string(),
            purchase_price: domain.purchase_price.to_string(),
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}
