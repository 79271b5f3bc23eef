use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::menu::ItemCode;
use crate::errors::DomainError;
use crate::menu::MenuStore;

/// 1-based position of an order in the session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(pub u32);

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_code: ItemCode,
    pub quantity: u32,
}

/// Lines collected for a customer before billing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self { customer_name: customer_name.into(), lines: Vec::new() }
    }

    /// Validates a line against the current menu and appends it. The same code may
    /// appear on several lines; lines are never merged.
    pub fn add_line(
        &mut self,
        item_code: ItemCode,
        quantity: i64,
        menu: &MenuStore,
    ) -> Result<&OrderLine, DomainError> {
        if menu.lookup(item_code).is_none() {
            return Err(DomainError::NotFound { code: item_code });
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or(DomainError::InvalidQuantity { quantity })?;

        self.lines.push(OrderLine { item_code, quantity });
        Ok(&self.lines[self.lines.len() - 1])
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// A billed order. Immutable once recorded in the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    pub total_bill: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn finalize(
        draft: OrderDraft,
        number: OrderNumber,
        total_bill: Decimal,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            customer_name: draft.customer_name,
            lines: draft.lines,
            total_bill,
            placed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::menu::ItemCode;
    use crate::errors::DomainError;
    use crate::menu::MenuStore;

    use super::{OrderDraft, OrderLine};

    #[test]
    fn accepts_known_code_with_positive_quantity() {
        let menu = MenuStore::seeded();
        let mut draft = OrderDraft::new("Asha");

        let line = draft.add_line(ItemCode(101), 2, &menu).expect("valid line");

        assert_eq!(line, &OrderLine { item_code: ItemCode(101), quantity: 2 });
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn rejects_unknown_code_before_quantity() {
        let menu = MenuStore::seeded();
        let mut draft = OrderDraft::new("Asha");

        let error = draft.add_line(ItemCode(999), 0, &menu).expect_err("unknown code");

        assert_eq!(error, DomainError::NotFound { code: ItemCode(999) });
        assert!(draft.is_empty());
    }

    #[test]
    fn rejects_non_positive_and_oversized_quantities() {
        let menu = MenuStore::seeded();
        let mut draft = OrderDraft::new("Asha");

        for quantity in [0, -3, i64::from(u32::MAX) + 1] {
            let error = draft.add_line(ItemCode(102), quantity, &menu).expect_err("bad quantity");
            assert_eq!(error, DomainError::InvalidQuantity { quantity });
        }
        assert!(draft.is_empty());
    }

    #[test]
    fn keeps_repeated_codes_as_separate_lines() {
        let menu = MenuStore::seeded();
        let mut draft = OrderDraft::new("");

        draft.add_line(ItemCode(106), 1, &menu).expect("first coffee");
        draft.add_line(ItemCode(106), 3, &menu).expect("second coffee");

        assert_eq!(draft.len(), 2);
        assert_eq!(draft.lines[1].quantity, 3);
    }
}
