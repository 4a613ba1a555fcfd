//! Read-only queries
//!
//! Each view returns its answer as instruction return data and never writes
//! to any account. Quotes predict the matching `add` or `remove` exactly.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::amm::{Claim, Principal};
use crate::engine::{Preview, VirtualPairView};
use crate::error::CurveError;
use crate::state::Launch;

#[derive(Accounts)]
pub struct LaunchView<'info> {
    #[account(
        seeds = [Launch::SEED, launch.principal_mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,

    #[account(
        constraint = claim_mint.key() == launch.claim_mint @ CurveError::AccountMismatch,
    )]
    pub claim_mint: InterfaceAccount<'info, Mint>,

    #[account(
        constraint = vault.key() == launch.vault @ CurveError::AccountMismatch,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,
}

impl<'info> LaunchView<'info> {
    fn preview(&self) -> Preview<'_, &InterfaceAccount<'info, Mint>, &InterfaceAccount<'info, TokenAccount>> {
        Preview::new(&self.launch, &self.claim_mint, &self.vault)
    }

    pub fn get_virtual_pair(&self) -> Result<VirtualPairView> {
        Ok(self.preview().virtual_pair())
    }

    pub fn quote_add(&self, amount: u64) -> Result<u64> {
        self.preview()
            .quote_add(&Pubkey::default(), Principal::from(amount))?
            .to_token_amount()
    }

    pub fn quote_remove(&self, amount: u64) -> Result<u64> {
        self.preview()
            .quote_remove(&Pubkey::default(), Claim::from(amount))?
            .to_token_amount()
    }

    pub fn get_marginal_price(&self) -> Result<u128> {
        self.preview().marginal_price()
    }

    pub fn get_average_price(&self) -> Result<u128> {
        self.preview().average_price()
    }

    pub fn get_total_raised(&self) -> Result<u64> {
        self.preview().total_raised().to_token_amount()
    }
}
