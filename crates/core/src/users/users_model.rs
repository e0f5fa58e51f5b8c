//! User domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STARTING_BALANCE;
use crate::{errors::ValidationError, Error, Result};

/// Returns the opening cash balance applied when no explicit balance is given.
pub fn default_starting_balance() -> Decimal {
    Decimal::from_str_radix(DEFAULT_STARTING_BALANCE, 10).unwrap_or_else(|_| Decimal::new(10000, 0))
}

/// Domain model representing a user and their cash balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Cash available for opening or increasing positions, in whole currency
    /// units with two decimal places.
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// Opening cash balance. The default starting balance applies when None.
    pub balance: Option<Decimal>,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "User name cannot be empty".to_string(),
            )));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A valid email address is required".to_string(),
            )));
        }
        if let Some(balance) = self.balance {
            if balance < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Opening balance cannot be negative".to_string(),
                )));
            }
        }
        Ok(())
    }
}
