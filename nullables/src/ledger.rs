//! Nullable token ledger: thread-safe in-memory balances and allowances.

use agora_ledger::{FungibleLedger, LedgerError};
use agora_types::Principal;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Books {
    balances: HashMap<Principal, u128>,
    allowances: HashMap<(Principal, Principal), u128>,
    total_supply: u128,
}

impl Books {
    fn balance(&self, owner: &Principal) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Principal, spender: &Principal) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Validate then apply. Either both sides move or nothing does.
    fn move_balance(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                owner: *from,
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// An in-memory ERC-20 style token for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullLedger {
    address: Principal,
    max_supply: Option<u128>,
    books: Mutex<Books>,
}

impl NullLedger {
    pub fn new(address: Principal) -> Self {
        Self {
            address,
            max_supply: None,
            books: Mutex::new(Books::default()),
        }
    }

    /// A token whose supply can never exceed `max_supply`.
    pub fn with_max_supply(address: Principal, max_supply: u128) -> Self {
        Self {
            max_supply: Some(max_supply),
            ..Self::new(address)
        }
    }

    /// Mint and approve in one step: the usual test preamble.
    pub fn fund(
        &self,
        owner: &Principal,
        spender: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.mint(owner, amount)?;
        self.approve(owner, spender, u128::MAX)
    }
}

impl FungibleLedger for NullLedger {
    fn token_address(&self) -> Principal {
        self.address
    }

    fn balance_of(&self, owner: &Principal) -> u128 {
        self.books.lock().unwrap().balance(owner)
    }

    fn total_supply(&self) -> u128 {
        self.books.lock().unwrap().total_supply
    }

    fn allowance(&self, owner: &Principal, spender: &Principal) -> u128 {
        self.books.lock().unwrap().allowance(owner, spender)
    }

    fn approve(
        &self,
        owner: &Principal,
        spender: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.books
            .lock()
            .unwrap()
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }

    fn transfer(&self, from: &Principal, to: &Principal, amount: u128) -> Result<(), LedgerError> {
        self.books.lock().unwrap().move_balance(from, to, amount)
    }

    fn transfer_from(
        &self,
        owner: &Principal,
        spender: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock().unwrap();
        let allowed = books.allowance(owner, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: *owner,
                spender: *spender,
                needed: amount,
                available: allowed,
            });
        }
        books.move_balance(owner, to, amount)?;
        // an unlimited approval stays unlimited
        if allowed != u128::MAX {
            books.allowances.insert((*owner, *spender), allowed - amount);
        }
        Ok(())
    }

    fn mint(&self, to: &Principal, amount: u128) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let mut books = self.books.lock().unwrap();
        let supply = books
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if let Some(max_supply) = self.max_supply {
            if supply > max_supply {
                return Err(LedgerError::SupplyCapExceeded { max_supply });
            }
        }
        let balance = books
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        books.balances.insert(*to, balance);
        books.total_supply = supply;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(n: u8) -> Principal {
        Principal::from_bytes([n; 20])
    }

    #[test]
    fn test_mint_and_transfer() {
        let ledger = NullLedger::new(principal(0xEE));
        ledger.mint(&principal(1), 100).unwrap();
        ledger.transfer(&principal(1), &principal(2), 40).unwrap();
        assert_eq!(ledger.balance_of(&principal(1)), 60);
        assert_eq!(ledger.balance_of(&principal(2)), 40);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn test_transfer_over_balance_has_no_effect() {
        let ledger = NullLedger::new(principal(0xEE));
        ledger.mint(&principal(1), 10).unwrap();
        let err = ledger.transfer(&principal(1), &principal(2), 11).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { needed: 11, available: 10, .. }));
        assert_eq!(ledger.balance_of(&principal(1)), 10);
        assert_eq!(ledger.balance_of(&principal(2)), 0);
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let ledger = NullLedger::new(principal(0xEE));
        ledger.mint(&principal(1), 100).unwrap();
        ledger.approve(&principal(1), &principal(3), 30).unwrap();

        ledger
            .transfer_from(&principal(1), &principal(3), &principal(3), 20)
            .unwrap();
        assert_eq!(ledger.allowance(&principal(1), &principal(3)), 10);

        let err = ledger
            .transfer_from(&principal(1), &principal(3), &principal(3), 20)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { available: 10, .. }));
        assert_eq!(ledger.balance_of(&principal(3)), 20);
    }

    #[test]
    fn test_unlimited_allowance_is_not_consumed() {
        let ledger = NullLedger::new(principal(0xEE));
        ledger.fund(&principal(1), &principal(3), 50).unwrap();
        ledger
            .transfer_from(&principal(1), &principal(3), &principal(4), 50)
            .unwrap();
        assert_eq!(ledger.allowance(&principal(1), &principal(3)), u128::MAX);
    }

    #[test]
    fn test_fund_reports_mint_failure() {
        let ledger = NullLedger::with_max_supply(principal(0xEE), 10);
        assert!(matches!(
            ledger.fund(&principal(1), &principal(3), 11),
            Err(LedgerError::SupplyCapExceeded { max_supply: 10 })
        ));
        assert_eq!(ledger.balance_of(&principal(1)), 0);
        assert_eq!(ledger.allowance(&principal(1), &principal(3)), 0);

        assert!(matches!(
            ledger.fund(&principal(1), &Principal::ZERO, 5),
            Err(LedgerError::ZeroAddress)
        ));
    }

    #[test]
    fn test_supply_cap() {
        let ledger = NullLedger::with_max_supply(principal(0xEE), 100);
        ledger.mint(&principal(1), 100).unwrap();
        assert!(matches!(
            ledger.mint(&principal(1), 1),
            Err(LedgerError::SupplyCapExceeded { max_supply: 100 })
        ));
    }
}
