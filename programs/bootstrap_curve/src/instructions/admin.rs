//! Owner Administration
//!
//! Goal and fee changes, lock/unlock and the burn-gated pause. The account
//! constraints reject non-owners up front; `Launch` checks again itself.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::amm::Principal;
use crate::error::CurveError;
use crate::instructions::spl::SplClaimLedger;
use crate::state::Launch;

#[event]
pub struct GoalsSet {
    pub launch: Pubkey,
    pub funding_goal: u128,
    pub desired_average_price: u128,
    pub alpha: u128,
    pub beta: u128,
}

#[event]
pub struct WithdrawalFeeUpdated {
    pub launch: Pubkey,
    pub withdrawal_fee_bps: u16,
}

#[event]
pub struct LaunchLocked {
    pub launch: Pubkey,
}

#[event]
pub struct LaunchUnlocked {
    pub launch: Pubkey,
}

#[event]
pub struct LaunchPaused {
    pub launch: Pubkey,
    pub burned: u64,
}

#[event]
pub struct LaunchUnpaused {
    pub launch: Pubkey,
}

/// Accounts for owner-only settings
#[derive(Accounts)]
pub struct Admin<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [Launch::SEED, launch.principal_mint.as_ref()],
        bump = launch.bump,
        constraint = launch.governance.owner == owner.key() @ CurveError::Unauthorized,
    )]
    pub launch: Account<'info, Launch>,
}

impl<'info> Admin<'info> {
    pub fn set_goals(&mut self, funding_goal: u128, desired_average_price: u128) -> Result<()> {
        self.launch
            .set_goals(&self.owner.key(), Principal(funding_goal), desired_average_price)?;

        emit!(GoalsSet {
            launch: self.launch.key(),
            funding_goal,
            desired_average_price,
            alpha: self.launch.curve.alpha,
            beta: self.launch.curve.beta,
        });
        Ok(())
    }

    pub fn set_withdrawal_fee(&mut self, withdrawal_fee_bps: u16) -> Result<()> {
        self.launch
            .set_withdrawal_fee(&self.owner.key(), withdrawal_fee_bps)?;

        emit!(WithdrawalFeeUpdated {
            launch: self.launch.key(),
            withdrawal_fee_bps,
        });
        Ok(())
    }

    pub fn lock(&mut self) -> Result<()> {
        self.launch.lock(&self.owner.key())?;
        emit!(LaunchLocked { launch: self.launch.key() });
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<()> {
        self.launch.unlock(&self.owner.key())?;
        emit!(LaunchUnlocked { launch: self.launch.key() });
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        self.launch.unpause(&self.owner.key())?;
        emit!(LaunchUnpaused { launch: self.launch.key() });
        Ok(())
    }
}

/// Accounts for the burn-gated pause
#[derive(Accounts)]
pub struct PauseLaunch<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [Launch::SEED, launch.principal_mint.as_ref()],
        bump = launch.bump,
        constraint = launch.governance.owner == owner.key() @ CurveError::Unauthorized,
    )]
    pub launch: Account<'info, Launch>,

    #[account(
        mut,
        constraint = claim_mint.key() == launch.claim_mint @ CurveError::AccountMismatch,
    )]
    pub claim_mint: InterfaceAccount<'info, Mint>,

    /// Owner's claim token account; the pause amount is burned from here
    #[account(
        mut,
        token::mint = claim_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_claim: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> PauseLaunch<'info> {
    pub fn pause(&mut self) -> Result<()> {
        let principal_mint = self.launch.principal_mint;
        let bump = [self.launch.bump];
        let seeds: &[&[u8]] = &[Launch::SEED, principal_mint.as_ref(), &bump];
        let signer_seeds = &[seeds];

        let mut ledger = SplClaimLedger {
            token_program: &self.token_program,
            claim_mint: &mut self.claim_mint,
            holder_account: &mut self.owner_claim,
            holder: &self.owner,
            mint_authority: self.launch.to_account_info(),
            signer_seeds,
        };

        let burned = self.launch.pause(&self.owner.key(), &mut ledger)?;

        emit!(LaunchPaused {
            launch: self.launch.key(),
            burned: burned.to_token_amount()?,
        });
        Ok(())
    }
}
