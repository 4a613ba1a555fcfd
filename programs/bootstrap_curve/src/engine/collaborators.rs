//! Interfaces to the claim token and the custodial vault.
//!
//! The settlement engine never touches balances directly. It reads and moves
//! value only through these traits. On-chain they are backed by SPL token
//! CPIs (`instructions::spl`). In tests they are in-memory ledgers.
//!
//! Read access is split from write access so quote paths can run against
//! plain snapshots of the accounts.

use anchor_lang::prelude::*;

use crate::amm::{Claim, Principal};

/// Read side of the claim token.
pub trait ClaimSupply {
    fn total_supply(&self) -> Result<Claim>;
}

/// The claim token's balance and supply ledger.
pub trait ClaimLedger: ClaimSupply {
    fn balance_of(&self, holder: &Pubkey) -> Result<Claim>;
    fn mint(&mut self, to: &Pubkey, amount: Claim) -> Result<()>;
    fn burn(&mut self, from: &Pubkey, amount: Claim) -> Result<()>;
}

/// Read side of the vault.
pub trait VaultBalance {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal>;
}

/// Custody of principal on behalf of the launch.
pub trait PrincipalVault: VaultBalance {
    /// Move `amount` of `asset` from `payer` into custody credited to `credit_to`.
    fn deposit(&mut self, asset: &Pubkey, amount: Principal, payer: &Pubkey, credit_to: &Pubkey) -> Result<()>;

    /// Pay `amount` of `asset` out of `debit_from`'s custody to `pay_to`.
    fn withdraw(&mut self, asset: &Pubkey, amount: Principal, debit_from: &Pubkey, pay_to: &Pubkey) -> Result<()>;
}

impl<T: ClaimSupply + ?Sized> ClaimSupply for &T {
    fn total_supply(&self) -> Result<Claim> {
        (**self).total_supply()
    }
}

impl<T: ClaimSupply + ?Sized> ClaimSupply for &mut T {
    fn total_supply(&self) -> Result<Claim> {
        (**self).total_supply()
    }
}

impl<T: ClaimLedger + ?Sized> ClaimLedger for &mut T {
    fn balance_of(&self, holder: &Pubkey) -> Result<Claim> {
        (**self).balance_of(holder)
    }

    fn mint(&mut self, to: &Pubkey, amount: Claim) -> Result<()> {
        (**self).mint(to, amount)
    }

    fn burn(&mut self, from: &Pubkey, amount: Claim) -> Result<()> {
        (**self).burn(from, amount)
    }
}

impl<T: VaultBalance + ?Sized> VaultBalance for &T {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal> {
        (**self).balance_of(asset, holder)
    }
}

impl<T: VaultBalance + ?Sized> VaultBalance for &mut T {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal> {
        (**self).balance_of(asset, holder)
    }
}

impl<T: PrincipalVault + ?Sized> PrincipalVault for &mut T {
    fn deposit(&mut self, asset: &Pubkey, amount: Principal, payer: &Pubkey, credit_to: &Pubkey) -> Result<()> {
        (**self).deposit(asset, amount, payer, credit_to)
    }

    fn withdraw(&mut self, asset: &Pubkey, amount: Principal, debit_from: &Pubkey, pay_to: &Pubkey) -> Result<()> {
        (**self).withdraw(asset, amount, debit_from, pay_to)
    }
}
