//! # Bootstrap Curve: Goal-Driven Token Launches
//!
//! Users deposit a principal asset and receive a claim token priced by a
//! virtual-pair bonding curve, and can redeem the claim token for principal
//! later.
//!
//! ## Overview
//!
//! The owner sets two goals, how much to raise and the average price buyers
//! should pay, and the curve offsets are derived from them. Pricing runs
//! on a synthetic pair that holds no liquidity of its own.
//!
//! ## How it works
//! - `amm` holds the curve math: parameters, quotes, fees, supply guard.
//! - `engine` settles trades against token and vault collaborators.
//! - If the claim supply grows outside the curve, redemptions switch to a
//!   pro-rata share of the vault so nobody can take more than their share.
//!

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod amm;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod state;

pub use instructions::*;

// Replace with your deployed program ID
declare_id!("FCvhwGZS4xiRzpK4QAUviLbviQgExghqeHQQmXx8xxux");

/// Bootstrap curve program
#[program]
pub mod bootstrap_curve {
    use super::*;

    /// Create a launch for a principal mint
    pub fn initialize(ctx: Context<Initialize>, pause_burn_amount: u64) -> Result<()> {
        ctx.accounts.initialize(pause_burn_amount, &ctx.bumps)
    }

    /// Derive the curve from a funding goal and average price (owner only)
    pub fn set_goals(
        ctx: Context<Admin>,
        funding_goal: u128,
        desired_average_price: u128,
    ) -> Result<()> {
        ctx.accounts.set_goals(funding_goal, desired_average_price)
    }

    /// Set the withdrawal fee in basis points (owner only)
    pub fn set_withdrawal_fee(ctx: Context<Admin>, withdrawal_fee_bps: u16) -> Result<()> {
        ctx.accounts.set_withdrawal_fee(withdrawal_fee_bps)
    }

    pub fn lock(ctx: Context<Admin>) -> Result<()> {
        ctx.accounts.lock()
    }

    pub fn unlock(ctx: Context<Admin>) -> Result<()> {
        ctx.accounts.unlock()
    }

    /// Pause trading by burning the configured amount of claim tokens
    pub fn pause(ctx: Context<PauseLaunch>) -> Result<()> {
        ctx.accounts.pause()
    }

    pub fn unpause(ctx: Context<Admin>) -> Result<()> {
        ctx.accounts.unpause()
    }

    /// Deposit principal, receive claim tokens
    pub fn add(ctx: Context<Trade>, input_amount: u64, min_bonding_out: u64) -> Result<u64> {
        ctx.accounts.add(input_amount, min_bonding_out)
    }

    /// Burn claim tokens, receive principal
    pub fn remove(ctx: Context<Trade>, bonding_amount: u64, min_input_out: u64) -> Result<u64> {
        ctx.accounts.remove(bonding_amount, min_input_out)
    }

    pub fn get_virtual_pair(ctx: Context<LaunchView>) -> Result<engine::VirtualPairView> {
        ctx.accounts.get_virtual_pair()
    }

    pub fn quote_add(ctx: Context<LaunchView>, amount: u64) -> Result<u64> {
        ctx.accounts.quote_add(amount)
    }

    pub fn quote_remove(ctx: Context<LaunchView>, amount: u64) -> Result<u64> {
        ctx.accounts.quote_remove(amount)
    }

    pub fn get_marginal_price(ctx: Context<LaunchView>) -> Result<u128> {
        ctx.accounts.get_marginal_price()
    }

    pub fn get_average_price(ctx: Context<LaunchView>) -> Result<u128> {
        ctx.accounts.get_average_price()
    }

    pub fn get_total_raised(ctx: Context<LaunchView>) -> Result<u64> {
        ctx.accounts.get_total_raised()
    }
}
