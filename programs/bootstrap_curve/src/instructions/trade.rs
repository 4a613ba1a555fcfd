//! Curve Trading
//!
//! `add` deposits principal and mints claim units along the curve. `remove`
//! burns claim units and pays principal back, through the curve or pro rata
//! when the claim supply has been inflated outside it.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::amm::{Claim, Principal, RedemptionMode};
use crate::engine::SettlementEngine;
use crate::error::CurveError;
use crate::instructions::spl::{SplClaimLedger, SplVault};
use crate::state::Launch;

/// Event emitted when principal is added
#[event]
pub struct Added {
    pub launch: Pubkey,
    pub trader: Pubkey,
    pub input_in: u64,
    pub bonding_out: u64,
    pub total_raised: u128,
}

/// Event emitted when claim units are redeemed
#[event]
pub struct Removed {
    pub launch: Pubkey,
    pub trader: Pubkey,
    pub bonding_in: u64,
    pub input_out: u64,
    pub fee: u64,
    pub mode: RedemptionMode,
}

/// Accounts for add and remove
#[derive(Accounts)]
pub struct Trade<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        mut,
        seeds = [Launch::SEED, principal_mint.key().as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,

    #[account(
        constraint = principal_mint.key() == launch.principal_mint @ CurveError::AccountMismatch,
    )]
    pub principal_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = claim_mint.key() == launch.claim_mint @ CurveError::AccountMismatch,
    )]
    pub claim_mint: InterfaceAccount<'info, Mint>,

    /// Launch vault
    #[account(
        mut,
        constraint = vault.key() == launch.vault @ CurveError::AccountMismatch,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Trader's principal account
    #[account(
        mut,
        associated_token::mint = principal_mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_principal: InterfaceAccount<'info, TokenAccount>,

    /// Trader's claim account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = claim_mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_claim: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Run `settle` against an engine wired to this instruction's accounts.
    fn with_engine<T>(
        &mut self,
        settle: impl FnOnce(&mut SettlementEngine<'_, SplClaimLedger<'_, 'info>, SplVault<'_, 'info>>) -> Result<T>,
    ) -> Result<T> {
        let launch_info = self.launch.to_account_info();
        let principal_mint = self.launch.principal_mint;
        let bump = [self.launch.bump];
        let seeds: &[&[u8]] = &[Launch::SEED, principal_mint.as_ref(), &bump];
        let signer_seeds = &[seeds];

        let ledger = SplClaimLedger {
            token_program: &self.token_program,
            claim_mint: &mut self.claim_mint,
            holder_account: &mut self.trader_claim,
            holder: &self.trader,
            mint_authority: launch_info.clone(),
            signer_seeds,
        };
        let vault = SplVault {
            token_program: &self.token_program,
            principal_mint: &self.principal_mint,
            vault: &mut self.vault,
            trader_account: &mut self.trader_principal,
            trader: &self.trader,
            vault_authority: launch_info,
            signer_seeds,
        };

        settle(&mut SettlementEngine::new(&mut self.launch, ledger, vault))
    }

    pub fn add(&mut self, input_amount: u64, min_bonding_out: u64) -> Result<u64> {
        let trader = self.trader.key();
        let receipt = self.with_engine(|engine| {
            engine.add(&trader, Principal::from(input_amount), Claim::from(min_bonding_out))
        })?;
        let bonding_out = receipt.bonding_out.to_token_amount()?;

        msg!("Added {} principal for {} claim units", input_amount, bonding_out);

        emit!(Added {
            launch: self.launch.key(),
            trader,
            input_in: input_amount,
            bonding_out,
            total_raised: self.launch.curve.total_raised().0,
        });

        Ok(bonding_out)
    }

    pub fn remove(&mut self, bonding_amount: u64, min_input_out: u64) -> Result<u64> {
        let trader = self.trader.key();
        let receipt = self.with_engine(|engine| {
            engine.remove(&trader, Claim::from(bonding_amount), Principal::from(min_input_out))
        })?;
        let input_out = receipt.input_out.to_token_amount()?;

        if let RedemptionMode::Proportional { .. } = receipt.mode {
            msg!("Removed {} claim units pro rata for {} principal", bonding_amount, input_out);
        } else {
            msg!("Removed {} claim units for {} principal", bonding_amount, input_out);
        }

        emit!(Removed {
            launch: self.launch.key(),
            trader,
            bonding_in: bonding_amount,
            input_out,
            fee: receipt.fee.to_token_amount()?,
            mode: receipt.mode,
        });

        Ok(input_out)
    }
}
