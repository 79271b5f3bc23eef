use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderNumber};
use crate::errors::DomainError;
use crate::menu::MenuStore;

/// Shown in place of an item name once its code has left the menu.
pub const DELETED_ITEM_LABEL: &str = "DELETED ITEM";

/// Orders completed during this session, oldest first.
#[derive(Clone, Debug, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLine {
    pub label: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub number: OrderNumber,
    pub customer_name: String,
    pub lines: Vec<HistoryLine>,
    pub total_bill: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub entries: Vec<HistoryEntry>,
    pub total_sales: Decimal,
}

impl OrderHistory {
    /// Appends the order unless its bill would push session sales past the currency range.
    pub fn record(&mut self, order: Order) -> Result<&Order, DomainError> {
        self.total_sales().checked_add(order.total_bill).ok_or(DomainError::AmountOverflow)?;
        self.orders.push(order);
        Ok(&self.orders[self.orders.len() - 1])
    }

    pub fn next_number(&self) -> OrderNumber {
        OrderNumber(u32::try_from(self.orders.len()).unwrap_or(u32::MAX).saturating_add(1))
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_sales(&self) -> Decimal {
        self.orders
            .iter()
            .fold(Decimal::ZERO, |total, order| total.saturating_add(order.total_bill))
    }

    /// Resolves names against the current menu; totals come from the stored bills.
    pub fn summarize(&self, menu: &MenuStore) -> HistoryReport {
        let entries = self
            .orders
            .iter()
            .map(|order| HistoryEntry {
                number: order.number,
                customer_name: order.customer_name.clone(),
                lines: order
                    .lines
                    .iter()
                    .map(|line| HistoryLine {
                        label: menu
                            .lookup(line.item_code)
                            .map(|item| item.name.clone())
                            .unwrap_or_else(|| DELETED_ITEM_LABEL.to_string()),
                        quantity: line.quantity,
                    })
                    .collect(),
                total_bill: order.total_bill,
            })
            .collect();

        HistoryReport { entries, total_sales: self.total_sales() }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::menu::ItemCode;
    use crate::domain::order::{Order, OrderLine, OrderNumber};
    use crate::errors::DomainError;
    use crate::menu::MenuStore;

    use super::{OrderHistory, DELETED_ITEM_LABEL};

    fn order(number: u32, code: i64, quantity: u32, total: Decimal) -> Order {
        Order {
            number: OrderNumber(number),
            customer_name: format!("customer-{number}"),
            lines: vec![OrderLine { item_code: ItemCode(code), quantity }],
            total_bill: total,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn records_in_insertion_order_and_numbers_sequentially() {
        let mut history = OrderHistory::default();
        assert_eq!(history.next_number(), OrderNumber(1));

        history.record(order(1, 101, 1, Decimal::new(5250, 2))).expect("within range");
        history.record(order(2, 102, 1, Decimal::new(12600, 2))).expect("within range");

        assert_eq!(history.next_number(), OrderNumber(3));
        let customers =
            history.orders().iter().map(|order| order.customer_name.as_str()).collect::<Vec<_>>();
        assert_eq!(customers, vec!["customer-1", "customer-2"]);
    }

    #[test]
    fn summary_total_equals_sum_of_stored_bills() {
        let mut history = OrderHistory::default();
        history.record(order(1, 101, 2, Decimal::new(10500, 2))).expect("within range");
        history.record(order(2, 106, 1, Decimal::new(3150, 2))).expect("within range");

        let report = history.summarize(&MenuStore::seeded());

        assert_eq!(report.total_sales, Decimal::new(13650, 2));
        assert_eq!(report.entries[0].lines[0].label, "Burger");
    }

    #[test]
    fn removed_item_shows_sentinel_and_keeps_total() {
        let mut menu = MenuStore::seeded();
        let mut history = OrderHistory::default();
        history.record(order(1, 101, 2, Decimal::new(10500, 2))).expect("within range");

        menu.remove(ItemCode(101)).expect("burger present");
        menu.update_price(ItemCode(106), Decimal::new(999, 0)).expect("coffee present");
        let report = history.summarize(&menu);

        assert_eq!(report.entries[0].lines[0].label, DELETED_ITEM_LABEL);
        assert_eq!(report.entries[0].total_bill, Decimal::new(10500, 2));
        assert_eq!(report.total_sales, Decimal::new(10500, 2));
    }

    #[test]
    fn empty_history_summarizes_to_zero() {
        let report = OrderHistory::default().summarize(&MenuStore::seeded());

        assert!(report.entries.is_empty());
        assert_eq!(report.total_sales, Decimal::ZERO);
    }

    #[test]
    fn record_refuses_order_that_would_overflow_total_sales() {
        let mut history = OrderHistory::default();
        history.record(order(1, 101, 1, Decimal::MAX)).expect("within range");

        let error = history.record(order(2, 102, 1, Decimal::ONE)).expect_err("overflow");

        assert_eq!(error, DomainError::AmountOverflow);
        assert_eq!(history.len(), 1);
        assert_eq!(history.total_sales(), Decimal::MAX);
    }
}
