use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::menu::ItemCode;
use crate::domain::order::{Order, OrderDraft};
use crate::errors::DomainError;
use crate::menu::MenuStore;

/// GST applied to every bill, 5%.
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Currency precision used for tax and totals.
pub const CURRENCY_SCALE: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillLine {
    Charged { code: ItemCode, name: String, quantity: u32, unit_price: Decimal, amount: Decimal },
    /// Code no longer on the menu when the bill was computed.
    Skipped { code: ItemCode, quantity: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

impl Bill {
    pub fn skipped_codes(&self) -> impl Iterator<Item = ItemCode> + '_ {
        self.lines.iter().filter_map(|line| match line {
            BillLine::Skipped { code, .. } => Some(*code),
            BillLine::Charged { .. } => None,
        })
    }
}

/// A finalized order together with the bill that produced its total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order: Order,
    pub bill: Bill,
}

pub trait BillingEngine: Send + Sync {
    fn bill(&self, draft: &OrderDraft, menu: &MenuStore) -> Result<Bill, DomainError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBillingEngine;

impl BillingEngine for StandardBillingEngine {
    fn bill(&self, draft: &OrderDraft, menu: &MenuStore) -> Result<Bill, DomainError> {
        bill_order(draft, menu)
    }
}

pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices every line against the menu as it is right now.
///
/// Fails with `AmountOverflow` when a line amount or a total exceeds what a
/// `Decimal` can hold; nothing is partially billed.
pub fn bill_order(draft: &OrderDraft, menu: &MenuStore) -> Result<Bill, DomainError> {
    let mut lines = Vec::with_capacity(draft.lines.len());
    let mut subtotal = Decimal::ZERO;
    for line in &draft.lines {
        let Some(item) = menu.lookup(line.item_code) else {
            lines.push(BillLine::Skipped { code: line.item_code, quantity: line.quantity });
            continue;
        };

        let amount = item
            .price
            .checked_mul(Decimal::from(line.quantity))
            .ok_or(DomainError::AmountOverflow)?;
        subtotal = subtotal.checked_add(amount).ok_or(DomainError::AmountOverflow)?;
        lines.push(BillLine::Charged {
            code: line.item_code,
            name: item.name.clone(),
            quantity: line.quantity,
            unit_price: item.price,
            amount,
        });
    }

    let tax = subtotal.checked_mul(TAX_RATE).ok_or(DomainError::AmountOverflow)?;
    let tax_total = round_currency(tax);
    let grand_total = subtotal
        .checked_add(tax_total)
        .map(round_currency)
        .ok_or(DomainError::AmountOverflow)?;

    Ok(Bill { lines, subtotal, tax_rate: TAX_RATE, tax_total, grand_total })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::menu::{ItemCode, MenuItem};
    use crate::domain::order::{OrderDraft, OrderLine};
    use crate::errors::DomainError;
    use crate::menu::MenuStore;

    use super::{bill_order, round_currency, BillLine, BillingEngine, StandardBillingEngine};

    fn draft(lines: &[(i64, u32)]) -> OrderDraft {
        OrderDraft {
            customer_name: "Ravi".to_string(),
            lines: lines
                .iter()
                .map(|(code, quantity)| OrderLine { item_code: ItemCode(*code), quantity: *quantity })
                .collect(),
        }
    }

    #[test]
    fn two_burgers_bill_to_one_hundred_five() {
        let bill = StandardBillingEngine
            .bill(&draft(&[(101, 2)]), &MenuStore::seeded())
            .expect("billable");

        assert_eq!(bill.subtotal, Decimal::new(100, 0));
        assert_eq!(bill.tax_total, Decimal::new(500, 2));
        assert_eq!(bill.grand_total, Decimal::new(10500, 2));
    }

    #[test]
    fn missing_code_is_skipped_and_does_not_touch_subtotal() {
        let bill =
            bill_order(&draft(&[(999, 4), (106, 1)]), &MenuStore::seeded()).expect("billable");

        assert_eq!(bill.lines[0], BillLine::Skipped { code: ItemCode(999), quantity: 4 });
        assert_eq!(bill.subtotal, Decimal::new(30, 0));
        assert_eq!(bill.skipped_codes().collect::<Vec<_>>(), vec![ItemCode(999)]);
    }

    #[test]
    fn repeated_codes_are_billed_as_separate_rows() {
        let bill =
            bill_order(&draft(&[(102, 1), (102, 2)]), &MenuStore::seeded()).expect("billable");

        assert_eq!(bill.lines.len(), 2);
        assert_eq!(bill.subtotal, Decimal::new(360, 0));
        assert_eq!(bill.grand_total, Decimal::new(37800, 2));
    }

    #[test]
    fn grand_total_matches_rounded_subtotal_with_tax() {
        let menu = MenuStore::new([
            (ItemCode(1), MenuItem::new("Samosa", Decimal::new(1299, 2))),
            (ItemCode(2), MenuItem::new("Chai", Decimal::new(733, 2))),
            (ItemCode(3), MenuItem::new("Vada", Decimal::new(12_345, 3))),
        ]);

        for lines in [
            vec![(1, 1)],
            vec![(1, 3), (2, 7)],
            vec![(2, 11)],
            vec![(1, 5), (2, 1)],
            vec![(3, 1)],
            vec![(3, 7), (1, 2)],
        ] {
            let bill = bill_order(&draft(&lines), &menu).expect("billable");
            let expected = round_currency(bill.subtotal * Decimal::new(105, 2));

            assert_eq!(bill.grand_total, expected, "lines {lines:?}");
        }
    }

    #[test]
    fn empty_draft_bills_to_zero() {
        let bill = bill_order(&OrderDraft::new("nobody"), &MenuStore::seeded()).expect("billable");

        assert!(bill.lines.is_empty());
        assert_eq!(bill.grand_total, Decimal::ZERO);
    }

    #[test]
    fn sub_cent_price_is_billed_at_the_rounded_price() {
        let menu = MenuStore::new([(ItemCode(7), MenuItem::new("Idli", Decimal::new(12_345, 3)))]);

        let bill = bill_order(&draft(&[(7, 1)]), &menu).expect("billable");

        assert_eq!(bill.subtotal, Decimal::new(1235, 2));
        assert_eq!(bill.grand_total, Decimal::new(1297, 2));
        assert_eq!(bill.grand_total, round_currency(bill.subtotal * Decimal::new(105, 2)));
    }

    #[test]
    fn oversized_line_amount_is_rejected_instead_of_panicking() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").expect("fits");
        let menu = MenuStore::new([(ItemCode(300), MenuItem::new("Feast", huge))]);

        let error = bill_order(&draft(&[(300, 2)]), &menu).expect_err("overflow");

        assert_eq!(error, DomainError::AmountOverflow);
    }

    #[test]
    fn overflowing_subtotal_and_grand_total_are_rejected() {
        let menu = MenuStore::new([(ItemCode(1), MenuItem::new("Banquet", Decimal::MAX))]);

        let subtotal_overflow = bill_order(&draft(&[(1, 1), (1, 1)]), &menu);
        let grand_total_overflow = bill_order(&draft(&[(1, 1)]), &menu);

        assert_eq!(subtotal_overflow, Err(DomainError::AmountOverflow));
        assert_eq!(grand_total_overflow, Err(DomainError::AmountOverflow));
    }
}
