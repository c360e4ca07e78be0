//! Nullable marketplace: fixed-price item sales recorded in memory.

use agora_governance::{Marketplace, MarketplaceError};
use agora_types::ItemId;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Sells every item at one fixed price, each item at most once.
pub struct NullMarketplace {
    price: u128,
    sold: Mutex<BTreeMap<ItemId, u128>>,
}

impl NullMarketplace {
    pub fn new(price: u128) -> Self {
        Self {
            price,
            sold: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn is_sold(&self, item: ItemId) -> bool {
        self.sold.lock().unwrap().contains_key(&item)
    }

    /// Completed sales: item → amount paid.
    pub fn sales(&self) -> BTreeMap<ItemId, u128> {
        self.sold.lock().unwrap().clone()
    }
}

impl Marketplace for NullMarketplace {
    fn price(&self, _item: ItemId) -> u128 {
        self.price
    }

    fn purchase(&self, item: ItemId, payment: u128) -> Result<(), MarketplaceError> {
        if payment != self.price {
            return Err(MarketplaceError::IncorrectPayment {
                item,
                expected: self.price,
                paid: payment,
            });
        }
        let mut sold = self.sold.lock().unwrap();
        if sold.contains_key(&item) {
            return Err(MarketplaceError::NotAvailable(item));
        }
        sold.insert(item, payment);
        Ok(())
    }
}
