//! The exchange engine: reserves, liquidity shares and swaps.
//!
//! Each mutator prices against reserves captured on entry, validates every
//! bound and precomputes every new value, then issues its single ledger call,
//! and only after that succeeds writes engine state. An error therefore
//! leaves the pool untouched.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ExchangeError;
use crate::math::{get_amount_out, mul_div};
use crate::receipt::{LiquidityReceipt, PoolSnapshot, WithdrawalReceipt};
use agora_ledger::FungibleLedger;
use agora_types::{ExchangeParams, Principal};
use tracing::{debug, error, info};

/// A constant-product pool of ether against one token.
pub struct Exchange {
    /// The exchange's own account on the token ledger.
    address: Principal,
    params: ExchangeParams,
    ledger: Arc<dyn FungibleLedger>,
    ether_reserve: u128,
    total_shares: u128,
    shares: HashMap<Principal, u128>,
}

impl Exchange {
    pub fn new(
        address: Principal,
        params: ExchangeParams,
        ledger: Arc<dyn FungibleLedger>,
    ) -> Result<Self, ExchangeError> {
        if address.is_zero() {
            return Err(ExchangeError::InvalidAddress(address));
        }
        let token = ledger.token_address();
        if token.is_zero() {
            return Err(ExchangeError::InvalidAddress(token));
        }
        params.validate()?;
        Ok(Self {
            address,
            params,
            ledger,
            ether_reserve: 0,
            total_shares: 0,
            shares: HashMap::new(),
        })
    }

    // ── Pricing ─────────────────────────────────────────────────────────

    /// Pure quote using this pool's fee. Never touches state.
    pub fn get_amount_of_tokens(
        &self,
        input_amount: u128,
        input_reserve: u128,
        output_reserve: u128,
    ) -> Result<u128, ExchangeError> {
        get_amount_out(
            input_amount,
            input_reserve,
            output_reserve,
            self.params.fee_factor(),
        )
    }

    /// Tokens `ether_in` would buy right now.
    pub fn quote_eth_to_token(&self, ether_in: u128) -> Result<u128, ExchangeError> {
        self.get_amount_of_tokens(ether_in, self.ether_reserve, self.token_reserve())
    }

    /// Ether `tokens_in` would buy right now.
    pub fn quote_token_to_eth(&self, tokens_in: u128) -> Result<u128, ExchangeError> {
        self.get_amount_of_tokens(tokens_in, self.token_reserve(), self.ether_reserve)
    }

    /// Ether and tokens that burning `shares` would pay out right now.
    pub fn quote_remove_liquidity(&self, shares: u128) -> Result<(u128, u128), ExchangeError> {
        self.ensure_initialized()?;
        let ether_out = mul_div(self.ether_reserve, shares, self.total_shares)?;
        let tokens_out = mul_div(self.token_reserve(), shares, self.total_shares)?;
        Ok((ether_out, tokens_out))
    }

    // ── Liquidity ───────────────────────────────────────────────────────

    /// Deposit `ether_amount` plus up to `max_tokens` tokens for new shares.
    ///
    /// The first deposit sets the price and takes all `max_tokens`; later
    /// deposits take exactly the proportional amount. Tokens are pulled with
    /// `transfer_from`, so the caller must have approved the exchange.
    pub fn add_liquidity(
        &mut self,
        caller: &Principal,
        ether_amount: u128,
        max_tokens: u128,
    ) -> Result<LiquidityReceipt, ExchangeError> {
        if ether_amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }

        let (tokens_in, shares_minted) = if self.total_shares == 0 {
            if max_tokens == 0 {
                return Err(ExchangeError::InvalidAmount);
            }
            (max_tokens, ether_amount)
        } else {
            if self.ether_reserve == 0 {
                return Err(self.defect("shares outstanding against an empty ether reserve"));
            }
            let token_reserve = self.token_reserve();
            let required = mul_div(ether_amount, token_reserve, self.ether_reserve)?;
            if max_tokens < required {
                return Err(ExchangeError::InsufficientTokenAmount {
                    required,
                    offered: max_tokens,
                });
            }
            let minted = mul_div(ether_amount, self.total_shares, self.ether_reserve)?;
            if minted == 0 {
                return Err(ExchangeError::InvalidAmount);
            }
            (required, minted)
        };

        let ether_reserve = self
            .ether_reserve
            .checked_add(ether_amount)
            .ok_or(ExchangeError::Overflow)?;
        let total_shares = self
            .total_shares
            .checked_add(shares_minted)
            .ok_or(ExchangeError::Overflow)?;
        let held = self
            .shares_of(caller)
            .checked_add(shares_minted)
            .ok_or(ExchangeError::Overflow)?;

        self.ledger
            .transfer_from(caller, &self.address, &self.address, tokens_in)?;

        self.ether_reserve = ether_reserve;
        self.total_shares = total_shares;
        self.shares.insert(*caller, held);

        info!(
            provider = %caller,
            ether = ether_amount,
            tokens = tokens_in,
            shares = shares_minted,
            total_shares,
            "liquidity added"
        );
        Ok(LiquidityReceipt {
            ether_deposited: ether_amount,
            tokens_deposited: tokens_in,
            shares_minted,
        })
    }

    /// Burn `shares` for a proportional slice of both reserves.
    ///
    /// Tokens are transferred on the ledger; the ether payout is returned in
    /// the receipt for the host to deliver.
    pub fn remove_liquidity(
        &mut self,
        caller: &Principal,
        shares: u128,
    ) -> Result<WithdrawalReceipt, ExchangeError> {
        if shares == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        self.ensure_initialized()?;
        let available = self.shares_of(caller);
        if available < shares {
            return Err(ExchangeError::InsufficientBalance {
                owner: *caller,
                needed: shares,
                available,
            });
        }

        let (ether_out, tokens_out) = self.quote_remove_liquidity(shares)?;
        let Some(ether_reserve) = self.ether_reserve.checked_sub(ether_out) else {
            return Err(self.defect("ether payout exceeds reserve"));
        };
        let Some(total_shares) = self.total_shares.checked_sub(shares) else {
            return Err(self.defect("burn exceeds total shares"));
        };

        self.ledger.transfer(&self.address, caller, tokens_out)?;

        self.ether_reserve = ether_reserve;
        self.total_shares = total_shares;
        if available == shares {
            self.shares.remove(caller);
        } else {
            self.shares.insert(*caller, available - shares);
        }

        info!(
            provider = %caller,
            shares,
            ether = ether_out,
            tokens = tokens_out,
            total_shares,
            "liquidity removed"
        );
        Ok(WithdrawalReceipt {
            shares_burned: shares,
            ether_out,
            tokens_out,
        })
    }

    /// Move liquidity shares between providers.
    pub fn transfer_shares(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), ExchangeError> {
        if to.is_zero() {
            return Err(ExchangeError::InvalidAddress(*to));
        }
        let available = self.shares_of(from);
        if available < amount {
            return Err(ExchangeError::InsufficientBalance {
                owner: *from,
                needed: amount,
                available,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let credited = self
            .shares_of(to)
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;

        if available == amount {
            self.shares.remove(from);
        } else {
            self.shares.insert(*from, available - amount);
        }
        self.shares.insert(*to, credited);
        debug!(from = %from, to = %to, amount, "shares transferred");
        Ok(())
    }

    // ── Swaps ───────────────────────────────────────────────────────────

    /// Sell `ether_in` for tokens. Returns the tokens sent to the caller.
    pub fn eth_to_token(
        &mut self,
        caller: &Principal,
        ether_in: u128,
        min_tokens: u128,
    ) -> Result<u128, ExchangeError> {
        self.ensure_initialized()?;
        let ether_reserve = self.ether_reserve;
        let token_reserve = self.token_reserve();
        let tokens_out = self.get_amount_of_tokens(ether_in, ether_reserve, token_reserve)?;
        if tokens_out < min_tokens {
            return Err(ExchangeError::InsufficientOutputAmount {
                computed: tokens_out,
                minimum: min_tokens,
            });
        }
        let new_ether_reserve = ether_reserve
            .checked_add(ether_in)
            .ok_or(ExchangeError::Overflow)?;

        self.ledger.transfer(&self.address, caller, tokens_out)?;
        self.ether_reserve = new_ether_reserve;

        debug!(
            trader = %caller,
            ether_in,
            tokens_out,
            ether_reserve = new_ether_reserve,
            "swapped ether for tokens"
        );
        Ok(tokens_out)
    }

    /// Sell `tokens_in` for ether. Returns the ether owed to the caller.
    ///
    /// Tokens are pulled with `transfer_from`; the caller must have approved
    /// the exchange.
    pub fn token_to_eth(
        &mut self,
        caller: &Principal,
        tokens_in: u128,
        min_ether: u128,
    ) -> Result<u128, ExchangeError> {
        self.ensure_initialized()?;
        let ether_reserve = self.ether_reserve;
        let token_reserve = self.token_reserve();
        let ether_out = self.get_amount_of_tokens(tokens_in, token_reserve, ether_reserve)?;
        if ether_out < min_ether {
            return Err(ExchangeError::InsufficientOutputAmount {
                computed: ether_out,
                minimum: min_ether,
            });
        }
        let Some(new_ether_reserve) = ether_reserve.checked_sub(ether_out) else {
            return Err(self.defect("swap output exceeds ether reserve"));
        };

        self.ledger
            .transfer_from(caller, &self.address, &self.address, tokens_in)?;
        self.ether_reserve = new_ether_reserve;

        debug!(
            trader = %caller,
            tokens_in,
            ether_out,
            ether_reserve = new_ether_reserve,
            "swapped tokens for ether"
        );
        Ok(ether_out)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn address(&self) -> &Principal {
        &self.address
    }

    pub fn params(&self) -> &ExchangeParams {
        &self.params
    }

    pub fn ether_reserve(&self) -> u128 {
        self.ether_reserve
    }

    /// Live token balance of the exchange on the ledger.
    pub fn token_reserve(&self) -> u128 {
        self.ledger.balance_of(&self.address)
    }

    /// `(ether_reserve, token_reserve)`.
    pub fn reserves(&self) -> (u128, u128) {
        (self.ether_reserve, self.token_reserve())
    }

    pub fn total_shares(&self) -> u128 {
        self.total_shares
    }

    pub fn shares_of(&self, provider: &Principal) -> u128 {
        self.shares.get(provider).copied().unwrap_or(0)
    }

    pub fn is_initialized(&self) -> bool {
        self.total_shares > 0
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            exchange: self.address,
            token: self.ledger.token_address(),
            ether_reserve: self.ether_reserve,
            token_reserve: self.token_reserve(),
            total_shares: self.total_shares,
            fee_bps: self.params.fee_bps,
        }
    }

    fn ensure_initialized(&self) -> Result<(), ExchangeError> {
        if self.total_shares == 0 {
            return Err(ExchangeError::InvalidReserves {
                input_reserve: self.ether_reserve,
                output_reserve: self.token_reserve(),
            });
        }
        Ok(())
    }

    fn defect(&self, what: &str) -> ExchangeError {
        error!(
            exchange = %self.address,
            ether_reserve = self.ether_reserve,
            total_shares = self.total_shares,
            "pool invariant violated: {}",
            what
        );
        ExchangeError::InvariantViolated(what.to_string())
    }
}
