//! The facility host.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use agora_exchange::{
    Exchange, ExchangeError, LiquidityReceipt, PoolSnapshot, WithdrawalReceipt,
};
use agora_governance::{
    ExecutionOutcome, GovernanceEngine, GovernanceError, Marketplace, Proposal, ProposalState,
    VoteChoice, VotingRightsOracle,
};
use agora_ledger::FungibleLedger;
use agora_types::{Clock, ItemId, Principal};

use crate::{FacilityConfig, FacilityError};

/// Owns both engines and the clock.
///
/// Each engine sits behind its own `tokio::sync::Mutex`, held for the whole
/// of every operation, so operations on one engine are atomic and totally
/// ordered. The engines share no state.
pub struct Facility {
    config: FacilityConfig,
    clock: Arc<dyn Clock>,
    governance: Arc<Mutex<GovernanceEngine>>,
    exchange: Arc<Mutex<Exchange>>,
}

impl Facility {
    pub fn new(
        config: FacilityConfig,
        clock: Arc<dyn Clock>,
        oracle: Arc<dyn VotingRightsOracle>,
        marketplace: Arc<dyn Marketplace>,
        ledger: Arc<dyn FungibleLedger>,
    ) -> Result<Self, FacilityError> {
        config.validate()?;
        let governance = GovernanceEngine::new(
            config.admin,
            config.governance.clone(),
            oracle,
            marketplace,
        )?;
        let exchange = Exchange::new(config.exchange_address, config.exchange.clone(), ledger)?;
        info!(
            admin = %config.admin,
            exchange = %config.exchange_address,
            token = %exchange.snapshot().token,
            voting_period_secs = config.governance.voting_period_secs,
            fee_bps = config.exchange.fee_bps,
            "facility initialised"
        );
        Ok(Self {
            config,
            clock,
            governance: Arc::new(Mutex::new(governance)),
            exchange: Arc::new(Mutex::new(exchange)),
        })
    }

    /// Install the global tracing subscriber described by the config.
    ///
    /// Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        agora_utils::init_logging(self.config.log_format, &self.config.log_level)
    }

    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    pub fn governance(&self) -> Arc<Mutex<GovernanceEngine>> {
        Arc::clone(&self.governance)
    }

    pub fn exchange(&self) -> Arc<Mutex<Exchange>> {
        Arc::clone(&self.exchange)
    }

    // ── Governance ──────────────────────────────────────────────────────

    pub async fn create_proposal(
        &self,
        caller: &Principal,
        item_id: ItemId,
    ) -> Result<u64, GovernanceError> {
        let mut governance = self.governance.lock().await;
        governance.create_proposal(caller, item_id, self.clock.now())
    }

    pub async fn vote_on_proposal(
        &self,
        caller: &Principal,
        index: u64,
        choice: VoteChoice,
    ) -> Result<u64, GovernanceError> {
        let mut governance = self.governance.lock().await;
        governance.vote_on_proposal(caller, index, choice, self.clock.now())
    }

    pub async fn execute_proposal(&self, index: u64) -> Result<ExecutionOutcome, GovernanceError> {
        let mut governance = self.governance.lock().await;
        governance.execute_proposal(index, self.clock.now())
    }

    pub async fn deposit_treasury(
        &self,
        from: &Principal,
        amount: u128,
    ) -> Result<u128, GovernanceError> {
        self.governance.lock().await.deposit_treasury(from, amount)
    }

    pub async fn withdraw_treasury(&self, caller: &Principal) -> Result<u128, GovernanceError> {
        self.governance.lock().await.withdraw_treasury(caller)
    }

    pub async fn transfer_admin(
        &self,
        caller: &Principal,
        new_admin: Principal,
    ) -> Result<(), GovernanceError> {
        self.governance.lock().await.transfer_admin(caller, new_admin)
    }

    pub async fn proposal(&self, index: u64) -> Result<Proposal, GovernanceError> {
        self.governance.lock().await.proposal(index).cloned()
    }

    pub async fn proposal_state(&self, index: u64) -> Result<ProposalState, GovernanceError> {
        let governance = self.governance.lock().await;
        governance.proposal_state(index, self.clock.now())
    }

    pub async fn proposal_count(&self) -> u64 {
        self.governance.lock().await.proposal_count()
    }

    pub async fn treasury_balance(&self) -> u128 {
        self.governance.lock().await.treasury_balance()
    }

    // ── Exchange ────────────────────────────────────────────────────────

    pub async fn add_liquidity(
        &self,
        caller: &Principal,
        ether_amount: u128,
        max_tokens: u128,
    ) -> Result<LiquidityReceipt, ExchangeError> {
        self.exchange
            .lock()
            .await
            .add_liquidity(caller, ether_amount, max_tokens)
    }

    pub async fn remove_liquidity(
        &self,
        caller: &Principal,
        shares: u128,
    ) -> Result<WithdrawalReceipt, ExchangeError> {
        self.exchange.lock().await.remove_liquidity(caller, shares)
    }

    pub async fn eth_to_token(
        &self,
        caller: &Principal,
        ether_in: u128,
        min_tokens: u128,
    ) -> Result<u128, ExchangeError> {
        self.exchange
            .lock()
            .await
            .eth_to_token(caller, ether_in, min_tokens)
    }

    pub async fn token_to_eth(
        &self,
        caller: &Principal,
        tokens_in: u128,
        min_ether: u128,
    ) -> Result<u128, ExchangeError> {
        self.exchange
            .lock()
            .await
            .token_to_eth(caller, tokens_in, min_ether)
    }

    pub async fn transfer_shares(
        &self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), ExchangeError> {
        self.exchange.lock().await.transfer_shares(from, to, amount)
    }

    pub async fn pool_snapshot(&self) -> PoolSnapshot {
        self.exchange.lock().await.snapshot()
    }

    // ── Cross-engine ────────────────────────────────────────────────────

    /// Sell `tokens_in` on the exchange and credit the ether to the treasury.
    ///
    /// Locks the exchange, then governance. The treasury credit is checked
    /// before the swap, so either both sides happen or neither does.
    /// Returns the ether credited.
    pub async fn sell_tokens_to_treasury(
        &self,
        caller: &Principal,
        tokens_in: u128,
        min_ether: u128,
    ) -> Result<u128, FacilityError> {
        let mut exchange = self.exchange.lock().await;
        let mut governance = self.governance.lock().await;

        let quoted = exchange.quote_token_to_eth(tokens_in)?;
        if governance.treasury_balance().checked_add(quoted).is_none() {
            return Err(GovernanceError::Overflow.into());
        }
        let ether_out = exchange.token_to_eth(caller, tokens_in, min_ether)?;
        governance.deposit_treasury(caller, ether_out)?;
        info!(
            seller = %caller,
            tokens_in,
            ether_out,
            treasury = governance.treasury_balance(),
            "swap proceeds credited to treasury"
        );
        Ok(ether_out)
    }
}
