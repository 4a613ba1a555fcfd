//! # Settlement Engine
//!
//! Runs a full `add` or `remove` against a [`Launch`] and its collaborators.
//!
//! Every call is planned in full before anything moves:
//!
//! ```text
//! add:     guard ─▶ checks ─▶ plan_add ─▶ slippage ─▶ deposit ─▶ credit check
//!                 ─▶ curve ─▶ mint
//! remove:  guard ─▶ checks ─▶ plan_remove ─▶ slippage ─▶ vault check
//!                 ─▶ burn ─▶ curve / tracker ─▶ withdraw
//! ```
//!
//! The same planning functions back the read-only [`Preview`], so a quote
//! taken right before a call is exactly what the call settles for.

use anchor_lang::prelude::*;

use super::collaborators::{ClaimLedger, ClaimSupply, PrincipalVault, VaultBalance};
use super::guard::CallGuard;
use crate::amm::{self, proportional_share, Claim, CurveQuote, Principal, RedemptionMode, TradeHook, WideUint};
use crate::error::CurveError;
use crate::state::Launch;

/// Snapshot of the virtual pair returned by the query surface.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualPairView {
    pub x: u128,
    pub y: u128,
    pub k: WideUint,
}

/// What an add will settle for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddPlan {
    pub input: Principal,
    /// Base curve quote; the pair moves by this amount
    pub curve: CurveQuote<Claim>,
    /// Claim units minted to the trader after any hook adjustment
    pub bonding_out: Claim,
}

/// What a remove will settle for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovePlan {
    /// Claim units burned from the trader
    pub amount: Claim,
    pub mode: RedemptionMode,
    /// Withdrawal fee (curve mode only)
    pub fee: Claim,
    /// Claim units returned to the curve (curve mode only)
    pub effective: Claim,
    /// Base curve quote (curve mode only)
    pub curve: Option<CurveQuote<Principal>>,
    /// Principal paid to the trader
    pub input_out: Principal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddReceipt {
    pub input: Principal,
    pub bonding_out: Claim,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveReceipt {
    pub bonding_in: Claim,
    pub input_out: Principal,
    pub fee: Claim,
    pub mode: RedemptionMode,
}

pub fn plan_add(
    launch: &Launch,
    hook: Option<&dyn TradeHook>,
    trader: &Pubkey,
    input: Principal,
) -> Result<AddPlan> {
    let curve = amm::quote_add(&launch.curve, input)?;
    let bonding_out = match hook {
        Some(hook) => {
            let adjustment = hook.on_buy(trader, curve.amount.0, input.0)?;
            Claim(adjustment.settle(curve.amount.0))
        }
        None => curve.amount,
    };

    Ok(AddPlan {
        input,
        curve,
        bonding_out,
    })
}

/// Plan a redemption of `amount` against supply and vault balances observed
/// now, before the call's own burn.
pub fn plan_remove<S: ClaimSupply, B: VaultBalance>(
    launch: &Launch,
    supply: &S,
    vault: &B,
    hook: Option<&dyn TradeHook>,
    trader: &Pubkey,
    amount: Claim,
) -> Result<RemovePlan> {
    let observed_supply = supply.total_supply()?;
    let vault_balance = vault.balance_of(&launch.principal_mint, &launch.custodian)?;
    let mode = launch.supply.select_mode(observed_supply, vault_balance);

    match mode {
        RedemptionMode::Curve => {
            let split = launch.fee.apply(amount)?;
            let curve = amm::quote_remove(&launch.curve, split.effective)?;
            let input_out = match hook {
                Some(hook) => {
                    let adjustment = hook.on_sell(trader, curve.amount.0, split.effective.0)?;
                    Principal(adjustment.settle(curve.amount.0))
                }
                None => curve.amount,
            };

            Ok(RemovePlan {
                amount,
                mode,
                fee: split.fee,
                effective: split.effective,
                curve: Some(curve),
                input_out,
            })
        }
        RedemptionMode::Proportional { .. } => Ok(RemovePlan {
            amount,
            mode,
            fee: Claim::ZERO,
            effective: Claim::ZERO,
            curve: None,
            input_out: proportional_share(amount, vault_balance, observed_supply)?,
        }),
    }
}

/// Read-only view of a launch. Nothing reachable from here mutates state.
pub struct Preview<'a, S, B> {
    launch: &'a Launch,
    supply: S,
    vault: B,
    hook: Option<&'a dyn TradeHook>,
}

impl<'a, S: ClaimSupply, B: VaultBalance> Preview<'a, S, B> {
    pub fn new(launch: &'a Launch, supply: S, vault: B) -> Self {
        Self {
            launch,
            supply,
            vault,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: &'a dyn TradeHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn virtual_pair(&self) -> VirtualPairView {
        VirtualPairView {
            x: self.launch.curve.x,
            y: self.launch.curve.y,
            k: self.launch.curve.k,
        }
    }

    pub fn plan_add(&self, trader: &Pubkey, input: Principal) -> Result<AddPlan> {
        plan_add(self.launch, self.hook, trader, input)
    }

    pub fn plan_remove(&self, trader: &Pubkey, amount: Claim) -> Result<RemovePlan> {
        plan_remove(self.launch, &self.supply, &self.vault, self.hook, trader, amount)
    }

    pub fn quote_add(&self, trader: &Pubkey, input: Principal) -> Result<Claim> {
        Ok(self.plan_add(trader, input)?.bonding_out)
    }

    pub fn quote_remove(&self, trader: &Pubkey, amount: Claim) -> Result<Principal> {
        Ok(self.plan_remove(trader, amount)?.input_out)
    }

    pub fn marginal_price(&self) -> Result<u128> {
        self.launch.curve.marginal_price()
    }

    pub fn average_price(&self) -> Result<u128> {
        self.launch.curve.average_price()
    }

    pub fn total_raised(&self) -> Principal {
        self.launch.curve.total_raised()
    }
}

pub struct SettlementEngine<'a, L, V> {
    launch: &'a mut Launch,
    ledger: L,
    vault: V,
    hook: Option<&'a dyn TradeHook>,
}

impl<'a, L: ClaimLedger, V: PrincipalVault> SettlementEngine<'a, L, V> {
    pub fn new(launch: &'a mut Launch, ledger: L, vault: V) -> Self {
        Self {
            launch,
            ledger,
            vault,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: &'a dyn TradeHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn launch(&self) -> &Launch {
        self.launch
    }

    pub fn preview(&self) -> Preview<'_, &L, &V> {
        Preview {
            launch: self.launch,
            supply: &self.ledger,
            vault: &self.vault,
            hook: self.hook,
        }
    }

    /// Deposit `input` principal and mint claim units to `caller`.
    pub fn add(&mut self, caller: &Pubkey, input: Principal, min_bonding_out: Claim) -> Result<AddReceipt> {
        let mut launch = CallGuard::enter(&mut *self.launch)?;
        launch.ensure_tradable()?;
        require!(!input.is_zero(), CurveError::ZeroAmount);

        let plan = plan_add(&launch, self.hook, caller, input)?;
        require!(!plan.bonding_out.is_zero(), CurveError::ZeroAmount);
        require!(plan.bonding_out >= min_bonding_out, CurveError::SlippageExceeded);

        let asset = launch.principal_mint;
        let custodian = launch.custodian;
        let custody_before = self.vault.balance_of(&asset, &custodian)?;
        self.vault.deposit(&asset, input, caller, &custodian)?;
        // Mints that skim transfers would leave x ahead of custody.
        let credited = self
            .vault
            .balance_of(&asset, &custodian)?
            .checked_sub(custody_before)?;
        require!(credited == input, CurveError::DepositShortfall);

        launch
            .curve
            .apply_add(input, plan.curve.amount, plan.curve.divisor)?;
        launch.supply.record_mint(plan.bonding_out)?;
        self.ledger.mint(caller, plan.bonding_out)?;

        launch.commit();
        Ok(AddReceipt {
            input,
            bonding_out: plan.bonding_out,
        })
    }

    /// Burn `amount` claim units from `caller` and pay out principal.
    pub fn remove(&mut self, caller: &Pubkey, amount: Claim, min_input_out: Principal) -> Result<RemoveReceipt> {
        let mut launch = CallGuard::enter(&mut *self.launch)?;
        launch.ensure_tradable()?;
        require!(!amount.is_zero(), CurveError::ZeroAmount);
        require!(
            self.ledger.balance_of(caller)? >= amount,
            CurveError::InsufficientBalance
        );

        let plan = plan_remove(&launch, &self.ledger, &self.vault, self.hook, caller, amount)?;
        require!(plan.input_out >= min_input_out, CurveError::SlippageExceeded);

        let asset = launch.principal_mint;
        let custodian = launch.custodian;
        require!(
            self.vault.balance_of(&asset, &custodian)? >= plan.input_out,
            CurveError::InsufficientVaultBalance
        );

        self.ledger.burn(caller, amount)?;
        if let Some(curve) = plan.curve {
            launch
                .curve
                .apply_remove(plan.effective, curve.amount, curve.divisor)?;
        } else if let RedemptionMode::Proportional { observed_supply, vault_balance } = plan.mode {
            msg!(
                "Proportional redemption: supply {} exceeds legitimate {}, vault {}",
                observed_supply,
                launch.supply.last_known_legitimate_supply,
                vault_balance
            );
        }
        launch.supply.record_burn(amount);

        if !plan.input_out.is_zero() {
            self.vault.withdraw(&asset, plan.input_out, &custodian, caller)?;
        }

        launch.commit();
        Ok(RemoveReceipt {
            bonding_in: amount,
            input_out: plan.input_out,
            fee: plan.fee,
            mode: plan.mode,
        })
    }

    pub fn quote_add(&self, trader: &Pubkey, input: Principal) -> Result<Claim> {
        self.preview().quote_add(trader, input)
    }

    pub fn quote_remove(&self, trader: &Pubkey, amount: Claim) -> Result<Principal> {
        self.preview().quote_remove(trader, amount)
    }

    pub fn virtual_pair(&self) -> VirtualPairView {
        self.preview().virtual_pair()
    }

    pub fn marginal_price(&self) -> Result<u128> {
        self.preview().marginal_price()
    }

    pub fn average_price(&self) -> Result<u128> {
        self.preview().average_price()
    }

    pub fn total_raised(&self) -> Principal {
        self.preview().total_raised()
    }
}
