/// Decimal precision for monetary amounts and share quantities
pub const DECIMAL_PRECISION: u32 = 2;

/// Smallest tradeable share quantity
pub const MIN_SHARE_QUANTITY: &str = "0.01";

/// Opening cash balance for newly created users
pub const DEFAULT_STARTING_BALANCE: &str = "10000.00";

/// Share price assigned to catalog entries created without one
pub const DEFAULT_SHARE_PRICE: &str = "100.00";

/// Default page size for fund catalog listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size for fund catalog listings
pub const MAX_PAGE_SIZE: i64 = 50;

/// Maximum length of an index fund ticker symbol
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Maximum length of an index fund name
pub const MAX_FUND_NAME_LENGTH: usize = 255;
