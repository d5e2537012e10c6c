//! Program instructions

use {
    crate::{get_config_address_for_program, get_role_address_for_program, state::RoleKind},
    solana_instruction::{AccountMeta, Instruction},
    solana_program_error::ProgramError,
    solana_pubkey::Pubkey,
};

/// Instructions supported by the Tokenization Wrap program
#[derive(Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum TokenizationWrapInstruction {
    /// Create a wrapped Token-2022 mint over an existing unwrapped mint, its
    /// config record and its vault. The signer pays for every new account
    /// and becomes the config owner.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Owner and funding account
    /// 1. `[w]` Wrapped mint to create, address must be:
    ///    `get_wrapped_mint_address(unwrapped_mint, salt)`
    /// 2. `[w]` Config to create, address must be:
    ///    `get_config_address(wrapped_mint)`
    /// 3. `[w]` Vault, address must be:
    ///    `get_vault_address(wrapped_mint, unwrapped_mint,
    ///    unwrapped_token_program)`
    /// 4. `[]` Unwrapped mint
    /// 5. `[]` System program
    /// 6. `[]` SPL Token-2022 program (wrapped mint)
    /// 7. `[]` SPL Token program for unwrapped mint
    /// 8. `[]` Associated token account program
    CreateMint {
        /// Disambiguator allowing several wrapped mints per unwrapped mint
        salt: [u8; 32],
        /// Wrapped token name
        name: String,
        /// Wrapped token symbol
        symbol: String,
        /// Wrapped token metadata uri
        uri: String,
    },

    /// Grant `role` to `user`. Granting an existing role is a no-op.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Config owner and funding account
    /// 1. `[]` Config
    /// 2. `[w]` Role grant, address must be:
    ///    `get_role_address(wrapped_mint, role, user)`
    /// 3. `[]` System program
    AddRole {
        /// Grantee
        user: Pubkey,
        /// Role to grant
        role: RoleKind,
    },

    /// Revoke `role` from `user`, returning the rent to the owner.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Config owner, receives the rent
    /// 1. `[]` Config
    /// 2. `[w]` Role grant, address must be:
    ///    `get_role_address(wrapped_mint, role, user)`
    RemoveRole {
        /// Grantee
        user: Pubkey,
        /// Role to revoke
        role: RoleKind,
    },

    /// Wrap tokens
    ///
    /// Move the caller's unwrapped tokens into the vault and mint the same
    /// number of wrapped tokens into the caller's wrapped token account,
    /// creating that account if needed. Caller must hold the `Wrapper` role.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Caller, authority of the unwrapped token account
    /// 1. `[]` Config
    /// 2. `[]` Caller's `Wrapper` role grant
    /// 3. `[w]` Wrapped mint
    /// 4. `[]` Unwrapped mint
    /// 5. `[w]` Caller's unwrapped token account (source)
    /// 6. `[w]` Caller's associated wrapped token account (destination)
    /// 7. `[w]` Vault
    /// 8. `[]` SPL Token program for unwrapped mint
    /// 9. `[]` SPL Token-2022 program (wrapped mint)
    /// 10. `[]` Associated token account program
    /// 11. `[]` System program
    /// 12. `..12+N` `[]` (Optional) transfer hook accounts of the unwrapped
    ///     mint
    Wrap {
        /// little-endian `u64` representing the amount to wrap
        amount: u64,
    },

    /// Unwrap tokens
    ///
    /// Burn the caller's wrapped tokens and transfer the same amount of
    /// unwrapped tokens from the vault to the caller. Caller must hold the
    /// `Wrapper` role.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Caller, authority of the wrapped token account
    /// 1. `[]` Config
    /// 2. `[]` Caller's `Wrapper` role grant
    /// 3. `[w]` Wrapped mint
    /// 4. `[]` Unwrapped mint
    /// 5. `[w]` Caller's wrapped token account (source)
    /// 6. `[w]` Caller's unwrapped token account (destination)
    /// 7. `[w]` Vault
    /// 8. `[]` SPL Token program for unwrapped mint
    /// 9. `[]` SPL Token-2022 program (wrapped mint)
    /// 10. `..10+N` `[]` (Optional) transfer hook accounts of the unwrapped
    ///     mint
    Unwrap {
        /// little-endian `u64` representing the amount to unwrap
        amount: u64,
    },

    /// Close an empty vault and return its rent to the owner. No further
    /// wrapping is possible for this wrapped mint.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Config owner, receives the rent
    /// 1. `[w]` Config
    /// 2. `[]` Wrapped mint (vault authority)
    /// 3. `[w]` Vault
    /// 4. `[]` SPL Token program for unwrapped mint
    CloseVault,

    /// Propose a new owner. Ownership moves only once the proposed owner
    /// accepts. Proposing the zero address cancels the transfer.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Config owner
    /// 1. `[w]` Config
    TransferOwnership {
        /// Proposed owner
        new_owner: Pubkey,
    },

    /// Accept a pending ownership transfer.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Pending owner
    /// 1. `[w]` Config
    AcceptOwnership,

    /// Mint wrapped tokens to the owner for every unwrapped token in the
    /// vault that does not back existing supply (e.g. a direct transfer into
    /// the vault). No-op when the vault is balanced.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[ws]` Config owner and funding account
    /// 1. `[]` Config
    /// 2. `[w]` Wrapped mint
    /// 3. `[]` Vault
    /// 4. `[w]` Owner's associated wrapped token account
    /// 5. `[]` SPL Token-2022 program (wrapped mint)
    /// 6. `[]` Associated token account program
    /// 7. `[]` System program
    RecoverMint,
}

fn unpack_pubkey(input: &[u8]) -> Result<(Pubkey, &[u8]), ProgramError> {
    if input.len() < 32 {
        return Err(ProgramError::InvalidInstructionData);
    }
    let (key, rest) = input.split_at(32);
    let key = Pubkey::try_from(key).map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((key, rest))
}

fn unpack_string(input: &[u8]) -> Result<(String, &[u8]), ProgramError> {
    if input.len() < 4 {
        return Err(ProgramError::InvalidInstructionData);
    }
    let (len, rest) = input.split_at(4);
    let len = u32::from_le_bytes(len.try_into().unwrap()) as usize;
    if rest.len() < len {
        return Err(ProgramError::InvalidInstructionData);
    }
    let (value, rest) = rest.split_at(len);
    let value =
        String::from_utf8(value.to_vec()).map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((value, rest))
}

fn pack_string(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

fn unpack_user_role(rest: &[u8]) -> Result<(Pubkey, RoleKind), ProgramError> {
    let (user, rest) = unpack_pubkey(rest)?;
    match rest {
        [role] => Ok((user, RoleKind::try_from(*role)?)),
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

impl TokenizationWrapInstruction {
    /// Packs a
    /// [`TokenizationWrapInstruction`](enum.TokenizationWrapInstruction.html)
    /// into a byte array.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        match self {
            TokenizationWrapInstruction::CreateMint {
                salt,
                name,
                symbol,
                uri,
            } => {
                buf.push(0);
                buf.extend_from_slice(salt);
                pack_string(&mut buf, name);
                pack_string(&mut buf, symbol);
                pack_string(&mut buf, uri);
            }
            TokenizationWrapInstruction::AddRole { user, role } => {
                buf.push(1);
                buf.extend_from_slice(user.as_ref());
                buf.push((*role).into());
            }
            TokenizationWrapInstruction::RemoveRole { user, role } => {
                buf.push(2);
                buf.extend_from_slice(user.as_ref());
                buf.push((*role).into());
            }
            TokenizationWrapInstruction::Wrap { amount } => {
                buf.push(3);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            TokenizationWrapInstruction::Unwrap { amount } => {
                buf.push(4);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            TokenizationWrapInstruction::CloseVault => buf.push(5),
            TokenizationWrapInstruction::TransferOwnership { new_owner } => {
                buf.push(6);
                buf.extend_from_slice(new_owner.as_ref());
            }
            TokenizationWrapInstruction::AcceptOwnership => buf.push(7),
            TokenizationWrapInstruction::RecoverMint => buf.push(8),
        }
        buf
    }

    /// Unpacks a byte array into a
    /// [`TokenizationWrapInstruction`](enum.TokenizationWrapInstruction.html).
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        match input.split_first() {
            Some((&0, rest)) if rest.len() >= 32 => {
                let (salt, rest) = rest.split_at(32);
                let salt: [u8; 32] = salt.try_into().unwrap();
                let (name, rest) = unpack_string(rest)?;
                let (symbol, rest) = unpack_string(rest)?;
                let (uri, rest) = unpack_string(rest)?;
                if !rest.is_empty() {
                    return Err(ProgramError::InvalidInstructionData);
                }
                Ok(TokenizationWrapInstruction::CreateMint {
                    salt,
                    name,
                    symbol,
                    uri,
                })
            }
            Some((&1, rest)) => {
                let (user, role) = unpack_user_role(rest)?;
                Ok(TokenizationWrapInstruction::AddRole { user, role })
            }
            Some((&2, rest)) => {
                let (user, role) = unpack_user_role(rest)?;
                Ok(TokenizationWrapInstruction::RemoveRole { user, role })
            }
            Some((&3, rest)) if rest.len() == 8 => {
                let amount = u64::from_le_bytes(rest.try_into().unwrap());
                Ok(TokenizationWrapInstruction::Wrap { amount })
            }
            Some((&4, rest)) if rest.len() == 8 => {
                let amount = u64::from_le_bytes(rest.try_into().unwrap());
                Ok(TokenizationWrapInstruction::Unwrap { amount })
            }
            Some((&5, [])) => Ok(TokenizationWrapInstruction::CloseVault),
            Some((&6, rest)) if rest.len() == 32 => {
                let (new_owner, _) = unpack_pubkey(rest)?;
                Ok(TokenizationWrapInstruction::TransferOwnership { new_owner })
            }
            Some((&7, [])) => Ok(TokenizationWrapInstruction::AcceptOwnership),
            Some((&8, [])) => Ok(TokenizationWrapInstruction::RecoverMint),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Creates `CreateMint` instruction.
#[allow(clippy::too_many_arguments)]
pub fn create_mint(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    config_address: &Pubkey,
    vault_address: &Pubkey,
    unwrapped_mint_address: &Pubkey,
    unwrapped_token_program_id: &Pubkey,
    salt: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*owner_address, true),
        AccountMeta::new(*wrapped_mint_address, false),
        AccountMeta::new(*config_address, false),
        AccountMeta::new(*vault_address, false),
        AccountMeta::new_readonly(*unwrapped_mint_address, false),
        AccountMeta::new_readonly(solana_system_interface::program::id(), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(*unwrapped_token_program_id, false),
        AccountMeta::new_readonly(spl_associated_token_account_client::program::id(), false),
    ];
    let data = TokenizationWrapInstruction::CreateMint {
        salt,
        name,
        symbol,
        uri,
    }
    .pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `AddRole` instruction.
pub fn add_role(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    user_address: &Pubkey,
    role: RoleKind,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let role_address =
        get_role_address_for_program(wrapped_mint_address, role, user_address, program_id);
    let accounts = vec![
        AccountMeta::new(*owner_address, true),
        AccountMeta::new_readonly(config_address, false),
        AccountMeta::new(role_address, false),
        AccountMeta::new_readonly(solana_system_interface::program::id(), false),
    ];
    let data = TokenizationWrapInstruction::AddRole {
        user: *user_address,
        role,
    }
    .pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `RemoveRole` instruction.
pub fn remove_role(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    user_address: &Pubkey,
    role: RoleKind,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let role_address =
        get_role_address_for_program(wrapped_mint_address, role, user_address, program_id);
    let accounts = vec![
        AccountMeta::new(*owner_address, true),
        AccountMeta::new_readonly(config_address, false),
        AccountMeta::new(role_address, false),
    ];
    let data = TokenizationWrapInstruction::RemoveRole {
        user: *user_address,
        role,
    }
    .pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `Wrap` instruction.
#[allow(clippy::too_many_arguments)]
pub fn wrap(
    program_id: &Pubkey,
    user_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    unwrapped_mint_address: &Pubkey,
    unwrapped_token_account_address: &Pubkey,
    wrapped_token_account_address: &Pubkey,
    vault_address: &Pubkey,
    unwrapped_token_program_id: &Pubkey,
    amount: u64,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let role_address = get_role_address_for_program(
        wrapped_mint_address,
        RoleKind::Wrapper,
        user_address,
        program_id,
    );
    let accounts = vec![
        AccountMeta::new(*user_address, true),
        AccountMeta::new_readonly(config_address, false),
        AccountMeta::new_readonly(role_address, false),
        AccountMeta::new(*wrapped_mint_address, false),
        AccountMeta::new_readonly(*unwrapped_mint_address, false),
        AccountMeta::new(*unwrapped_token_account_address, false),
        AccountMeta::new(*wrapped_token_account_address, false),
        AccountMeta::new(*vault_address, false),
        AccountMeta::new_readonly(*unwrapped_token_program_id, false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account_client::program::id(), false),
        AccountMeta::new_readonly(solana_system_interface::program::id(), false),
    ];
    let data = TokenizationWrapInstruction::Wrap { amount }.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `Unwrap` instruction.
#[allow(clippy::too_many_arguments)]
pub fn unwrap(
    program_id: &Pubkey,
    user_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    unwrapped_mint_address: &Pubkey,
    wrapped_token_account_address: &Pubkey,
    unwrapped_token_account_address: &Pubkey,
    vault_address: &Pubkey,
    unwrapped_token_program_id: &Pubkey,
    amount: u64,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let role_address = get_role_address_for_program(
        wrapped_mint_address,
        RoleKind::Wrapper,
        user_address,
        program_id,
    );
    let accounts = vec![
        AccountMeta::new(*user_address, true),
        AccountMeta::new_readonly(config_address, false),
        AccountMeta::new_readonly(role_address, false),
        AccountMeta::new(*wrapped_mint_address, false),
        AccountMeta::new_readonly(*unwrapped_mint_address, false),
        AccountMeta::new(*wrapped_token_account_address, false),
        AccountMeta::new(*unwrapped_token_account_address, false),
        AccountMeta::new(*vault_address, false),
        AccountMeta::new_readonly(*unwrapped_token_program_id, false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    let data = TokenizationWrapInstruction::Unwrap { amount }.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `CloseVault` instruction.
pub fn close_vault(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    vault_address: &Pubkey,
    unwrapped_token_program_id: &Pubkey,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let accounts = vec![
        AccountMeta::new(*owner_address, true),
        AccountMeta::new(config_address, false),
        AccountMeta::new_readonly(*wrapped_mint_address, false),
        AccountMeta::new(*vault_address, false),
        AccountMeta::new_readonly(*unwrapped_token_program_id, false),
    ];
    let data = TokenizationWrapInstruction::CloseVault.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `TransferOwnership` instruction.
pub fn transfer_ownership(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    new_owner_address: &Pubkey,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*owner_address, true),
        AccountMeta::new(config_address, false),
    ];
    let data = TokenizationWrapInstruction::TransferOwnership {
        new_owner: *new_owner_address,
    }
    .pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `AcceptOwnership` instruction.
pub fn accept_ownership(
    program_id: &Pubkey,
    pending_owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*pending_owner_address, true),
        AccountMeta::new(config_address, false),
    ];
    let data = TokenizationWrapInstruction::AcceptOwnership.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}

/// Creates `RecoverMint` instruction.
pub fn recover_mint(
    program_id: &Pubkey,
    owner_address: &Pubkey,
    wrapped_mint_address: &Pubkey,
    vault_address: &Pubkey,
    owner_wrapped_token_account_address: &Pubkey,
) -> Instruction {
    let config_address = get_config_address_for_program(wrapped_mint_address, program_id);
    let accounts = vec![
        AccountMeta::new(*owner_address, true),
        AccountMeta::new_readonly(config_address, false),
        AccountMeta::new(*wrapped_mint_address, false),
        AccountMeta::new_readonly(*vault_address, false),
        AccountMeta::new(*owner_wrapped_token_account_address, false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account_client::program::id(), false),
        AccountMeta::new_readonly(solana_system_interface::program::id(), false),
    ];
    let data = TokenizationWrapInstruction::RecoverMint.pack();
    Instruction::new_with_bytes(*program_id, &data, accounts)
}
