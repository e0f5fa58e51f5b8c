//! Index fund domain models.
//!
//! An index fund is a catalog entry with a single current price. Prices move
//! only through catalog updates, so a fund row is the price oracle for every
//! position that references its symbol.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SHARE_PRICE, MAX_FUND_NAME_LENGTH, MAX_SYMBOL_LENGTH};
use crate::{errors::ValidationError, Error, Result};

/// Returns the share price assigned to funds created without one.
pub fn default_share_price() -> Decimal {
    Decimal::from_str_radix(DEFAULT_SHARE_PRICE, 10).unwrap_or_else(|_| Decimal::new(10000, 2))
}

/// Domain model representing an index fund in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexFund {
    pub id: String,
    pub name: String,
    /// Ticker symbol, stored uppercase. Lookups are case-insensitive and
    /// resolve to this canonical casing.
    pub symbol: String,
    /// Annual expense ratio as a fraction between 0 and 1.
    pub expense_ratio: Decimal,
    /// Assets under management.
    pub aum: Decimal,
    /// Current price per share used for all valuations.
    pub current_price: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new index fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIndexFund {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
    pub expense_ratio: Decimal,
    pub aum: Decimal,
    /// Price per share. Defaults to 100.00 when None.
    pub current_price: Option<Decimal>,
    pub description: Option<String>,
}

impl NewIndexFund {
    /// Validates the new fund data.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_symbol(&self.symbol)?;
        validate_expense_ratio(self.expense_ratio)?;
        validate_aum(self.aum)?;
        if let Some(price) = self.current_price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Input model for partially updating an index fund.
///
/// Only the provided fields change. Updating `current_price` is how market
/// movement reaches the portfolio valuations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexFundUpdate {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub expense_ratio: Option<Decimal>,
    pub aum: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub description: Option<String>,
}

impl IndexFundUpdate {
    /// Validates the provided fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(symbol) = &self.symbol {
            validate_symbol(symbol)?;
        }
        if let Some(expense_ratio) = self.expense_ratio {
            validate_expense_ratio(expense_ratio)?;
        }
        if let Some(aum) = self.aum {
            validate_aum(aum)?;
        }
        if let Some(price) = self.current_price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Model for the paged fund catalog listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct FundSearchResponse {
    pub data: Vec<IndexFund>,
    pub meta: FundSearchResponseMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FundSearchResponseMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Fund name cannot be empty".to_string(),
        )));
    }
    if name.len() > MAX_FUND_NAME_LENGTH {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Fund name cannot exceed {} characters",
            MAX_FUND_NAME_LENGTH
        ))));
    }
    Ok(())
}

fn validate_symbol(symbol: &str) -> Result<()> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Fund symbol cannot be empty".to_string(),
        )));
    }
    if trimmed.len() > MAX_SYMBOL_LENGTH {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Fund symbol cannot exceed {} characters",
            MAX_SYMBOL_LENGTH
        ))));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Fund symbol may only contain letters, digits, and dots".to_string(),
        )));
    }
    Ok(())
}

fn validate_expense_ratio(expense_ratio: Decimal) -> Result<()> {
    if expense_ratio < Decimal::ZERO || expense_ratio > Decimal::ONE {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Expense ratio must be between 0 and 1".to_string(),
        )));
    }
    Ok(())
}

fn validate_aum(aum: Decimal) -> Result<()> {
    if aum < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "AUM cannot be negative".to_string(),
        )));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Current price must be positive".to_string(),
        )));
    }
    Ok(())
}
