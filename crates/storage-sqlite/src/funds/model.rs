//! Database models for index funds.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundbook_core::funds::{default_share_price, IndexFund, IndexFundUpdate, NewIndexFund};

use crate::utils::{parse_decimal_string_tolerant, parse_timestamp_tolerant};

/// Database model for index funds
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
#[diesel(table_name = crate::schema::index_funds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IndexFundDB {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub expense_ratio: String,
    pub aum: String,
    pub current_price: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial changeset for fund updates. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::index_funds)]
pub struct IndexFundUpdateDB {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub expense_ratio: Option<String>,
    pub aum: Option<String>,
    pub current_price: Option<String>,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<IndexFundDB> for IndexFund {
    fn from(db: IndexFundDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            symbol: db.symbol,
            expense_ratio: parse_decimal_string_tolerant(&db.expense_ratio, "expense_ratio"),
            aum: parse_decimal_string_tolerant(&db.aum, "aum"),
            current_price: parse_decimal_string_tolerant(&db.current_price, "current_price"),
            description: db.description,
            created_at: parse_timestamp_tolerant(&db.created_at, "created_at"),
            updated_at: parse_timestamp_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<NewIndexFund> for IndexFundDB {
    fn from(domain: NewIndexFund) -> Self {
        let now = Utc::now();

        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            symbol: domain.symbol,
            expense_ratio: domain.expense_ratio.to_string(),
            aum: domain.aum.to_string(),
            current_price: domain
                .current_price
                .unwrap_or_else(default_share_price)
                .to_string(),
            description: domain.description,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}

impl From<IndexFundUpdate> for IndexFundUpdateDB {
    fn from(domain: IndexFundUpdate) -> Self {
        Self {
            name: domain.name,
            symbol: domain.symbol,
            expense_ratio: domain.expense_ratio.map(|d| d.to_string()),
            aum: domain.aum.map(|d| d.to_string()),
            current_price: domain.current_price.map(|d| d.to_string()),
            description: domain.description,
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}
