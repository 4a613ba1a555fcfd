//! Launch Initialization
//!
//! Creates the launch account for a principal mint, its claim mint and the
//! vault that custodies deposits. Goals are set separately by the owner.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::amm::Claim;
use crate::state::{Governance, Launch};

/// Event emitted when a launch is created
#[event]
pub struct LaunchInitialized {
    pub launch: Pubkey,
    pub owner: Pubkey,
    pub principal_mint: Pubkey,
    pub claim_mint: Pubkey,
    pub pause_burn_amount: u64,
}

/// Accounts required to create a launch
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Launch owner (pays for every account created here)
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Asset deposited into the curve
    #[account(mint::token_program = token_program)]
    pub principal_mint: InterfaceAccount<'info, Mint>,

    /// Launch account (created)
    #[account(
        init,
        payer = owner,
        space = 8 + Launch::INIT_SPACE,
        seeds = [Launch::SEED, principal_mint.key().as_ref()],
        bump,
    )]
    pub launch: Account<'info, Launch>,

    /// Claim token mint, minted only by the launch
    #[account(
        init,
        payer = owner,
        seeds = [Launch::CLAIM_MINT_SEED, launch.key().as_ref()],
        bump,
        mint::decimals = principal_mint.decimals,
        mint::authority = launch,
        mint::token_program = token_program,
    )]
    pub claim_mint: InterfaceAccount<'info, Mint>,

    /// Vault custodying deposited principal
    #[account(
        init,
        payer = owner,
        associated_token::mint = principal_mint,
        associated_token::authority = launch,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, pause_burn_amount: u64, bumps: &InitializeBumps) -> Result<()> {
        let launch_key = self.launch.key();

        self.launch.set_inner(Launch {
            governance: Governance::new(self.owner.key(), Claim::from(pause_burn_amount)),
            principal_mint: self.principal_mint.key(),
            claim_mint: self.claim_mint.key(),
            vault: self.vault.key(),
            custodian: launch_key,
            bump: bumps.launch,
            claim_mint_bump: bumps.claim_mint,
            ..Launch::default()
        });

        msg!("Launch initialized: {}", launch_key);
        msg!("Owner: {}", self.owner.key());
        msg!("Principal mint: {}", self.principal_mint.key());
        msg!("Pause burn: {} claim units", pause_burn_amount);

        emit!(LaunchInitialized {
            launch: launch_key,
            owner: self.owner.key(),
            principal_mint: self.principal_mint.key(),
            claim_mint: self.claim_mint.key(),
            pause_burn_amount,
        });

        Ok(())
    }
}
