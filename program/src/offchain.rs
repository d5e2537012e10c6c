//! Instruction builders for unwrapped mints carrying a transfer hook

use {
    crate::instruction,
    solana_instruction::{AccountMeta, Instruction},
    solana_pubkey::Pubkey,
};

/// Creates `Wrap` instruction, appending the accounts the unwrapped mint's
/// transfer hook resolves for the deposit into the vault.
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
    transfer_hook_metas: Vec<AccountMeta>,
    amount: u64,
) -> Instruction {
    let mut instruction = instruction::wrap(
        program_id,
        user_address,
        wrapped_mint_address,
        unwrapped_mint_address,
        unwrapped_token_account_address,
        wrapped_token_account_address,
        vault_address,
        unwrapped_token_program_id,
        amount,
    );
    instruction.accounts.extend(transfer_hook_metas);
    instruction
}

/// Creates `Unwrap` instruction, appending the accounts the unwrapped mint's
/// transfer hook resolves for the release from the vault.
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
    transfer_hook_metas: Vec<AccountMeta>,
    amount: u64,
) -> Instruction {
    let mut instruction = instruction::unwrap(
        program_id,
        user_address,
        wrapped_mint_address,
        unwrapped_mint_address,
        wrapped_token_account_address,
        unwrapped_token_account_address,
        vault_address,
        unwrapped_token_program_id,
        amount,
    );
    instruction.accounts.extend(transfer_hook_metas);
    instruction
}
