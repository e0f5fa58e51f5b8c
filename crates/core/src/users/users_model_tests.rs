//! Tests for user domain models.

#[cfg(test)]
mod tests {
    use crate::users::{default_starting_balance, NewUser};
    use rust_decimal_macros::dec;

    fn create_test_new_user() -> NewUser {
        NewUser {
            id: None,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            balance: Some(dec!(2500.00)),
        }
    }

    // ============================================================================
    // NewUser Validation Tests
    // ============================================================================

    #[test]
    fn test_new_user_valid() {
        let user = create_test_new_user();
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_new_user_empty_name() {
        let mut user = create_test_new_user();
        user.name = "   ".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_empty_email() {
        let mut user = create_test_new_user();
        user.email = "".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_email_without_at_sign() {
        let mut user = create_test_new_user();
        user.email = "ada.example.com".to_string();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_negative_balance() {
        let mut user = create_test_new_user();
        user.balance = Some(dec!(-0.01));
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_new_user_without_balance_is_valid() {
        let mut user = create_test_new_user();
        user.balance = None;
        assert!(user.validate().is_ok());
    }

    // ============================================================================
    // Defaults
    // ============================================================================

    #[test]
    fn test_default_starting_balance() {
        assert_eq!(default_starting_balance(), dec!(10000.00));
    }
}
