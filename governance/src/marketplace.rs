//! The spend side of execution: approved proposals buy the governed item.

use agora_types::ItemId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    #[error("item {0} is not available for purchase")]
    NotAvailable(ItemId),

    #[error("incorrect payment for {item}: expected {expected}, got {paid}")]
    IncorrectPayment {
        item: ItemId,
        expected: u128,
        paid: u128,
    },
}

/// External seller of governed items.
pub trait Marketplace: Send + Sync {
    /// Current purchase price of `item`, in base-asset units.
    fn price(&self, item: ItemId) -> u128;

    /// Buy `item`, paying exactly `payment`.
    fn purchase(&self, item: ItemId, payment: u128) -> Result<(), MarketplaceError>;
}
