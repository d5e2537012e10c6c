//! Conservation arithmetic between the vault balance and the wrapped supply.
//!
//! Every transition is computed here from live balances. Checks run before the
//! processor touches any account, except deposit settlement, which reads the
//! vault after the transfer and fails the whole instruction if it cannot
//! settle.

use crate::error::TokenizationWrapError;

/// Balances that must stay equal outside of recovery
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Custody {
    /// Unwrapped tokens held by the vault
    pub vault_balance: u64,
    /// Outstanding supply of the wrapped mint
    pub wrapped_supply: u64,
}

impl Custody {
    /// Creates a snapshot from live balances
    pub fn new(vault_balance: u64, wrapped_supply: u64) -> Self {
        Self {
            vault_balance,
            wrapped_supply,
        }
    }

    /// Whether every wrapped token is backed by exactly one unwrapped token
    pub fn is_balanced(&self) -> bool {
        self.vault_balance == self.wrapped_supply
    }

    /// State after depositing `amount` from a holder with
    /// `source_balance` unwrapped tokens
    pub fn wrap(&self, amount: u64, source_balance: u64) -> Result<Self, TokenizationWrapError> {
        if amount == 0 {
            return Err(TokenizationWrapError::ZeroAmount);
        }
        if source_balance < amount {
            return Err(TokenizationWrapError::InsufficientBalance);
        }
        Ok(Self {
            vault_balance: self
                .vault_balance
                .checked_add(amount)
                .ok_or(TokenizationWrapError::Overflow)?,
            wrapped_supply: self
                .wrapped_supply
                .checked_add(amount)
                .ok_or(TokenizationWrapError::Overflow)?,
        })
    }

    /// Wrapped tokens owed for a deposit that left the vault holding
    /// `vault_balance_after`, and the resulting state. A fee-bearing mint
    /// credits the vault less than was sent; only what arrived is backed.
    pub fn settle_deposit(
        &self,
        vault_balance_after: u64,
    ) -> Result<(u64, Self), TokenizationWrapError> {
        let deposited = vault_balance_after
            .checked_sub(self.vault_balance)
            .ok_or(TokenizationWrapError::InsufficientBalance)?;
        if deposited == 0 {
            return Err(TokenizationWrapError::ZeroAmount);
        }
        Ok((
            deposited,
            Self {
                vault_balance: vault_balance_after,
                wrapped_supply: self
                    .wrapped_supply
                    .checked_add(deposited)
                    .ok_or(TokenizationWrapError::Overflow)?,
            },
        ))
    }

    /// State after redeeming `amount` from a holder with `wrapped_balance`
    /// wrapped tokens
    pub fn unwrap(&self, amount: u64, wrapped_balance: u64) -> Result<Self, TokenizationWrapError> {
        if amount == 0 {
            return Err(TokenizationWrapError::ZeroAmount);
        }
        if wrapped_balance < amount {
            return Err(TokenizationWrapError::InsufficientBalance);
        }
        Ok(Self {
            vault_balance: self
                .vault_balance
                .checked_sub(amount)
                .ok_or(TokenizationWrapError::InsufficientBalance)?,
            wrapped_supply: self
                .wrapped_supply
                .checked_sub(amount)
                .ok_or(TokenizationWrapError::InsufficientBalance)?,
        })
    }

    /// Unwrapped tokens in the vault not backing any wrapped token.
    ///
    /// Zero when balanced. A vault holding less than the supply cannot be
    /// repaired by minting and fails with `InsufficientBalance`.
    pub fn surplus(&self) -> Result<u64, TokenizationWrapError> {
        self.vault_balance
            .checked_sub(self.wrapped_supply)
            .ok_or(TokenizationWrapError::InsufficientBalance)
    }

    /// Fails unless the vault may be closed without losing backing funds
    pub fn check_closable(&self) -> Result<(), TokenizationWrapError> {
        if self.vault_balance == 0 {
            Ok(())
        } else {
            Err(TokenizationWrapError::VaultNotEmpty)
        }
    }
}
