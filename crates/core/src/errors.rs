use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::menu::ItemCode;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("item code {code} already exists")]
    DuplicateCode { code: ItemCode },
    #[error("item code {code} not found")]
    NotFound { code: ItemCode },
    #[error("price must not be negative, got {price}")]
    InvalidPrice { price: Decimal },
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },
    #[error("admin credential rejected")]
    AccessDenied,
    #[error("amount exceeds the representable currency range")]
    AmountOverflow,
}

impl DomainError {
    /// Console text shown at the point of failure. The caller returns to its menu loop afterwards.
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateCode { code } => format!("  [!] Item code {code} already exists!"),
            Self::NotFound { code } => format!("  [!] Item code {code} not found."),
            Self::InvalidPrice { .. } => {
                "  [!] Invalid price. Enter a non-negative number.".to_string()
            }
            Self::InvalidQuantity { .. } => {
                "  [!] Quantity must be at least 1. Try again.".to_string()
            }
            Self::AccessDenied => {
                "  [!] Incorrect Password. Returning to main menu.".to_string()
            }
            Self::AmountOverflow => {
                "  [!] Order total is too large to bill. Order cancelled.".to_string()
            }
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::DuplicateCode { .. } => "duplicate_code",
            Self::NotFound { .. } => "not_found",
            Self::InvalidPrice { .. } | Self::InvalidQuantity { .. } => {
                "invalid_quantity_or_price"
            }
            Self::AccessDenied => "access_denied",
            Self::AmountOverflow => "amount_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::menu::ItemCode;
    use crate::errors::DomainError;

    #[test]
    fn duplicate_code_message_names_the_code() {
        let error = DomainError::DuplicateCode { code: ItemCode(101) };

        assert_eq!(error.user_message(), "  [!] Item code 101 already exists!");
        assert_eq!(error.to_string(), "item code 101 already exists");
    }

    #[test]
    fn not_found_message_names_the_code() {
        let error = DomainError::NotFound { code: ItemCode(999) };

        assert_eq!(error.user_message(), "  [!] Item code 999 not found.");
        assert_eq!(error.error_class(), "not_found");
    }

    #[test]
    fn price_and_quantity_failures_share_an_error_class() {
        let price = DomainError::InvalidPrice { price: Decimal::new(-100, 2) };
        let quantity = DomainError::InvalidQuantity { quantity: 0 };

        assert_eq!(price.error_class(), quantity.error_class());
        assert!(price.to_string().contains("-1.00"));
    }

    #[test]
    fn amount_overflow_cancels_the_order_in_its_message() {
        let error = DomainError::AmountOverflow;

        assert_eq!(error.error_class(), "amount_overflow");
        assert!(error.user_message().contains("Order cancelled."));
    }
}
