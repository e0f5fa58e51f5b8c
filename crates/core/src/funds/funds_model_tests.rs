//! Tests for IndexFund domain models.

#[cfg(test)]
mod tests {
    use crate::funds::{IndexFundUpdate, NewIndexFund};
    use rust_decimal_macros::dec;

    fn create_test_new_fund() -> NewIndexFund {
        NewIndexFund {
            id: None,
            name: "Total Stock Market Index Fund".to_string(),
            symbol: "VTSAX".to_string(),
            expense_ratio: dec!(0.0004),
            aum: dec!(1500000000.00),
            current_price: Some(dec!(112.50)),
            description: Some("Broad U.S. equity exposure".to_string()),
        }
    }

    // ============================================================================
    // NewIndexFund Validation Tests
    // ============================================================================

    #[test]
    fn test_new_fund_valid() {
        let fund = create_test_new_fund();
        assert!(fund.validate().is_ok());
    }

    #[test]
    fn test_new_fund_empty_name() {
        let mut fund = create_test_new_fund();
        fund.name = "   ".to_string();
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_name_too_long() {
        let mut fund = create_test_new_fund();
        fund.name = "X".repeat(256);
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_empty_symbol() {
        let mut fund = create_test_new_fund();
        fund.symbol = "".to_string();
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_symbol_too_long() {
        let mut fund = create_test_new_fund();
        fund.symbol = "ABCDEFGHIJK".to_string();
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_symbol_rejects_whitespace() {
        let mut fund = create_test_new_fund();
        fund.symbol = "VT SAX".to_string();
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_symbol_allows_dot() {
        let mut fund = create_test_new_fund();
        fund.symbol = "BRK.B".to_string();
        assert!(fund.validate().is_ok());
    }

    #[test]
    fn test_new_fund_expense_ratio_above_one() {
        let mut fund = create_test_new_fund();
        fund.expense_ratio = dec!(1.5);
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_expense_ratio_negative() {
        let mut fund = create_test_new_fund();
        fund.expense_ratio = dec!(-0.01);
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_expense_ratio_bounds_inclusive() {
        let mut fund = create_test_new_fund();
        fund.expense_ratio = dec!(0);
        assert!(fund.validate().is_ok());
        fund.expense_ratio = dec!(1);
        assert!(fund.validate().is_ok());
    }

    #[test]
    fn test_new_fund_negative_aum() {
        let mut fund = create_test_new_fund();
        fund.aum = dec!(-100.00);
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_zero_price() {
        let mut fund = create_test_new_fund();
        fund.current_price = Some(dec!(0));
        assert!(fund.validate().is_err());
    }

    #[test]
    fn test_new_fund_missing_price_is_valid() {
        let mut fund = create_test_new_fund();
        fund.current_price = None;
        assert!(fund.validate().is_ok());
    }

    // ============================================================================
    // IndexFundUpdate Validation Tests
    // ============================================================================

    #[test]
    fn test_update_empty_is_valid() {
        let update = IndexFundUpdate::default();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_bad_price() {
        let update = IndexFundUpdate {
            current_price: Some(dec!(-10.00)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_rejects_bad_symbol() {
        let update = IndexFundUpdate {
            symbol: Some("TOOLONGSYMBOL".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_accepts_price_change() {
        let update = IndexFundUpdate {
            current_price: Some(dec!(141.25)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
