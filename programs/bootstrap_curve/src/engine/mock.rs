//! In-memory collaborators for tests.

use std::collections::HashMap;

use anchor_lang::prelude::*;

use super::collaborators::{ClaimLedger, ClaimSupply, PrincipalVault, VaultBalance};
use super::settlement::SettlementEngine;
use crate::amm::{Claim, Principal, BPS_DENOMINATOR};
use crate::error::CurveError;
use crate::state::{Governance, Launch};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockLedger {
    balances: HashMap<Pubkey, u128>,
    supply: u128,
}

impl MockLedger {
    /// Mint without going through the curve.
    pub fn credit(&mut self, to: &Pubkey, amount: Claim) {
        *self.balances.entry(*to).or_default() += amount.0;
        self.supply += amount.0;
    }

    pub fn holding(&self, holder: &Pubkey) -> Claim {
        Claim(self.balances.get(holder).copied().unwrap_or_default())
    }
}

impl ClaimSupply for MockLedger {
    fn total_supply(&self) -> Result<Claim> {
        Ok(Claim(self.supply))
    }
}

impl ClaimLedger for MockLedger {
    fn balance_of(&self, holder: &Pubkey) -> Result<Claim> {
        Ok(self.holding(holder))
    }

    fn mint(&mut self, to: &Pubkey, amount: Claim) -> Result<()> {
        let balance = self.balances.entry(*to).or_default();
        *balance = balance.checked_add(amount.0).ok_or(CurveError::MathOverflow)?;
        self.supply = self.supply.checked_add(amount.0).ok_or(CurveError::MathOverflow)?;
        Ok(())
    }

    fn burn(&mut self, from: &Pubkey, amount: Claim) -> Result<()> {
        let balance = self.balances.entry(*from).or_default();
        *balance = balance.checked_sub(amount.0).ok_or(CurveError::InsufficientBalance)?;
        self.supply -= amount.0;
        Ok(())
    }
}

/// Balances keyed by `(asset, holder)`; wallets and custody share the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockVault {
    balances: HashMap<(Pubkey, Pubkey), u128>,
    /// Withheld from every deposit, like a Token-2022 transfer fee.
    transfer_fee_bps: u128,
}

impl MockVault {
    pub fn set_transfer_fee_bps(&mut self, bps: u128) {
        self.transfer_fee_bps = bps;
    }

    pub fn fund(&mut self, asset: &Pubkey, holder: &Pubkey, amount: Principal) {
        *self.balances.entry((*asset, *holder)).or_default() += amount.0;
    }

    pub fn holding(&self, asset: &Pubkey, holder: &Pubkey) -> Principal {
        Principal(self.balances.get(&(*asset, *holder)).copied().unwrap_or_default())
    }

    fn move_funds(
        &mut self,
        asset: &Pubkey,
        amount: Principal,
        from: &Pubkey,
        to: &Pubkey,
        shortfall: CurveError,
        withheld: u128,
    ) -> Result<()> {
        let source = self.balances.entry((*asset, *from)).or_default();
        *source = source.checked_sub(amount.0).ok_or(shortfall)?;
        *self.balances.entry((*asset, *to)).or_default() += amount.0 - withheld;
        Ok(())
    }
}

impl VaultBalance for MockVault {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal> {
        Ok(self.holding(asset, holder))
    }
}

impl PrincipalVault for MockVault {
    fn deposit(&mut self, asset: &Pubkey, amount: Principal, payer: &Pubkey, credit_to: &Pubkey) -> Result<()> {
        let withheld = amount.0 * self.transfer_fee_bps / BPS_DENOMINATOR;
        self.move_funds(asset, amount, payer, credit_to, CurveError::InsufficientBalance, withheld)
    }

    fn withdraw(&mut self, asset: &Pubkey, amount: Principal, debit_from: &Pubkey, pay_to: &Pubkey) -> Result<()> {
        self.move_funds(asset, amount, debit_from, pay_to, CurveError::InsufficientVaultBalance, 0)
    }
}

/// A launch wired to in-memory collaborators.
pub struct Harness {
    pub launch: Launch,
    pub ledger: MockLedger,
    pub vault: MockVault,
    pub owner: Pubkey,
}

impl Harness {
    pub fn new(pause_burn_amount: Claim) -> Self {
        let owner = Pubkey::new_unique();
        let launch = Launch {
            governance: Governance::new(owner, pause_burn_amount),
            principal_mint: Pubkey::new_unique(),
            claim_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            custodian: Pubkey::new_unique(),
            ..Launch::default()
        };
        Self {
            launch,
            ledger: MockLedger::default(),
            vault: MockVault::default(),
            owner,
        }
    }

    pub fn configured(funding_goal: u128, desired_average_price: u128) -> Self {
        let mut harness = Self::new(Claim::ZERO);
        let owner = harness.owner;
        harness
            .launch
            .set_goals(&owner, Principal(funding_goal), desired_average_price)
            .unwrap();
        harness
    }

    /// A new trader holding `principal` in their wallet.
    pub fn trader(&mut self, principal: u128) -> Pubkey {
        let trader = Pubkey::new_unique();
        self.fund(&trader, principal);
        trader
    }

    pub fn fund(&mut self, holder: &Pubkey, principal: u128) {
        let asset = self.launch.principal_mint;
        self.vault.fund(&asset, holder, Principal(principal));
    }

    pub fn wallet(&self, holder: &Pubkey) -> Principal {
        self.vault.holding(&self.launch.principal_mint, holder)
    }

    pub fn custody(&self) -> Principal {
        self.vault.holding(&self.launch.principal_mint, &self.launch.custodian)
    }

    pub fn engine(&mut self) -> SettlementEngine<'_, &mut MockLedger, &mut MockVault> {
        SettlementEngine::new(&mut self.launch, &mut self.ledger, &mut self.vault)
    }
}
