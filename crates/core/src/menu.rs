use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::billing::round_currency;
use crate::domain::menu::{ItemCode, MenuItem};
use crate::errors::DomainError;

/// Menu entries keyed by code. Iteration is always ascending by code.
/// Prices are held at currency precision; sub-cent input is rounded on the way in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuStore {
    items: BTreeMap<ItemCode, MenuItem>,
}

impl MenuStore {
    pub fn new(items: impl IntoIterator<Item = (ItemCode, MenuItem)>) -> Self {
        let items = items
            .into_iter()
            .map(|(code, item)| {
                let price = round_currency(item.price);
                (code, MenuItem { price, ..item })
            })
            .collect();
        Self { items }
    }

    /// Default menu loaded at session start.
    pub fn seeded() -> Self {
        Self::new([
            (ItemCode(101), MenuItem::new("Burger", Decimal::new(50, 0))),
            (ItemCode(102), MenuItem::new("Pizza", Decimal::new(120, 0))),
            (ItemCode(103), MenuItem::new("Cold Drink", Decimal::new(40, 0))),
            (ItemCode(104), MenuItem::new("Sandwich", Decimal::new(60, 0))),
            (ItemCode(105), MenuItem::new("Pasta", Decimal::new(80, 0))),
            (ItemCode(106), MenuItem::new("Coffee", Decimal::new(30, 0))),
        ])
    }

    pub fn lookup(&self, code: ItemCode) -> Option<&MenuItem> {
        self.items.get(&code)
    }

    pub fn contains(&self, code: ItemCode) -> bool {
        self.items.contains_key(&code)
    }

    pub fn insert(&mut self, code: ItemCode, item: MenuItem) -> Result<(), DomainError> {
        if self.items.contains_key(&code) {
            return Err(DomainError::DuplicateCode { code });
        }
        let price = ensure_price(item.price)?;

        self.items.insert(code, MenuItem { price, ..item });
        Ok(())
    }

    pub fn remove(&mut self, code: ItemCode) -> Result<MenuItem, DomainError> {
        self.items.remove(&code).ok_or(DomainError::NotFound { code })
    }

    /// Returns the previous price.
    pub fn update_price(&mut self, code: ItemCode, price: Decimal) -> Result<Decimal, DomainError> {
        let item = self.items.get_mut(&code).ok_or(DomainError::NotFound { code })?;
        let price = ensure_price(price)?;

        Ok(std::mem::replace(&mut item.price, price))
    }

    pub fn list(&self) -> impl Iterator<Item = (ItemCode, &MenuItem)> + '_ {
        self.items.iter().map(|(code, item)| (*code, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn ensure_price(price: Decimal) -> Result<Decimal, DomainError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::InvalidPrice { price });
    }
    Ok(round_currency(price))
}
