//! SPL Token Adapters
//!
//! Back the engine's collaborator traits with token-program CPIs. Each
//! adapter only knows the accounts passed to the current instruction and
//! refuses to act on any other holder.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, mint_to, transfer_checked, Burn, Mint, MintTo, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::amm::{Claim, Principal};
use crate::engine::{ClaimLedger, ClaimSupply, PrincipalVault, VaultBalance};
use crate::error::CurveError;

impl ClaimSupply for InterfaceAccount<'_, Mint> {
    fn total_supply(&self) -> Result<Claim> {
        Ok(Claim::from(self.supply))
    }
}

impl VaultBalance for InterfaceAccount<'_, TokenAccount> {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal> {
        require_keys_eq!(*asset, self.mint, CurveError::AccountMismatch);
        require_keys_eq!(*holder, self.owner, CurveError::AccountMismatch);
        Ok(Principal::from(self.amount))
    }
}

/// Claim token ledger for one holder.
///
/// Mints are signed by the launch PDA; burns by the holder.
pub struct SplClaimLedger<'a, 'info> {
    pub token_program: &'a Interface<'info, TokenInterface>,
    pub claim_mint: &'a mut InterfaceAccount<'info, Mint>,
    pub holder_account: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub holder: &'a Signer<'info>,
    pub mint_authority: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl ClaimSupply for SplClaimLedger<'_, '_> {
    fn total_supply(&self) -> Result<Claim> {
        Ok(Claim::from(self.claim_mint.supply))
    }
}

impl ClaimLedger for SplClaimLedger<'_, '_> {
    fn balance_of(&self, holder: &Pubkey) -> Result<Claim> {
        require_keys_eq!(*holder, self.holder_account.owner, CurveError::AccountMismatch);
        Ok(Claim::from(self.holder_account.amount))
    }

    fn mint(&mut self, to: &Pubkey, amount: Claim) -> Result<()> {
        require_keys_eq!(*to, self.holder_account.owner, CurveError::AccountMismatch);

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.claim_mint.to_account_info(),
                    to: self.holder_account.to_account_info(),
                    authority: self.mint_authority.clone(),
                },
                self.signer_seeds,
            ),
            amount.to_token_amount()?,
        )?;

        self.claim_mint.reload()?;
        self.holder_account.reload()
    }

    fn burn(&mut self, from: &Pubkey, amount: Claim) -> Result<()> {
        require_keys_eq!(*from, self.holder_account.owner, CurveError::AccountMismatch);
        require_keys_eq!(*from, self.holder.key(), CurveError::AccountMismatch);

        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.claim_mint.to_account_info(),
                    from: self.holder_account.to_account_info(),
                    authority: self.holder.to_account_info(),
                },
            ),
            amount.to_token_amount()?,
        )?;

        self.claim_mint.reload()?;
        self.holder_account.reload()
    }
}

/// Principal custody between one trader and the launch vault.
pub struct SplVault<'a, 'info> {
    pub token_program: &'a Interface<'info, TokenInterface>,
    pub principal_mint: &'a InterfaceAccount<'info, Mint>,
    pub vault: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub trader_account: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub trader: &'a Signer<'info>,
    pub vault_authority: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl SplVault<'_, '_> {
    fn check_asset(&self, asset: &Pubkey) -> Result<()> {
        require_keys_eq!(*asset, self.principal_mint.key(), CurveError::AccountMismatch);
        Ok(())
    }
}

impl VaultBalance for SplVault<'_, '_> {
    fn balance_of(&self, asset: &Pubkey, holder: &Pubkey) -> Result<Principal> {
        self.check_asset(asset)?;
        if *holder == self.vault.owner {
            Ok(Principal::from(self.vault.amount))
        } else if *holder == self.trader_account.owner {
            Ok(Principal::from(self.trader_account.amount))
        } else {
            err!(CurveError::AccountMismatch)
        }
    }
}

impl PrincipalVault for SplVault<'_, '_> {
    fn deposit(&mut self, asset: &Pubkey, amount: Principal, payer: &Pubkey, credit_to: &Pubkey) -> Result<()> {
        self.check_asset(asset)?;
        require_keys_eq!(*payer, self.trader.key(), CurveError::AccountMismatch);
        require_keys_eq!(*credit_to, self.vault.owner, CurveError::AccountMismatch);
        require!(
            self.trader_account.amount >= amount.to_token_amount()?,
            CurveError::InsufficientBalance
        );

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_account.to_account_info(),
                    mint: self.principal_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount.to_token_amount()?,
            self.principal_mint.decimals,
        )?;

        self.vault.reload()?;
        self.trader_account.reload()
    }

    fn withdraw(&mut self, asset: &Pubkey, amount: Principal, debit_from: &Pubkey, pay_to: &Pubkey) -> Result<()> {
        self.check_asset(asset)?;
        require_keys_eq!(*debit_from, self.vault.owner, CurveError::AccountMismatch);
        require_keys_eq!(*pay_to, self.trader_account.owner, CurveError::AccountMismatch);

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.principal_mint.to_account_info(),
                    to: self.trader_account.to_account_info(),
                    authority: self.vault_authority.clone(),
                },
                self.signer_seeds,
            ),
            amount.to_token_amount()?,
            self.principal_mint.decimals,
        )?;

        self.vault.reload()?;
        self.trader_account.reload()
    }
}
