//! Tokenization Wrap program
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod custody;
mod entrypoint;
pub mod error;
pub mod instruction;
pub mod metadata;
pub mod mint_customizer;
pub mod offchain;
pub mod processor;
pub mod state;

use {
    solana_pubkey::Pubkey,
    spl_associated_token_account_client::address::get_associated_token_address_with_program_id,
    state::RoleKind,
};

solana_pubkey::declare_id!("CWrapzUJ8VAakzdET6ryGZ7VJsPpyeivfbXhfaxT6KJv");

/// Maximum length in bytes of the wrapped mint's metadata name
pub const MAX_NAME_LENGTH: usize = 64;
/// Maximum length in bytes of the wrapped mint's metadata symbol
pub const MAX_SYMBOL_LENGTH: usize = 32;
/// Maximum length in bytes of the wrapped mint's metadata uri
pub const MAX_URI_LENGTH: usize = 512;

const WRAPPED_MINT_SEED: &[u8] = br"wrapped_mint";

pub(crate) fn get_wrapped_mint_seeds<'a>(
    unwrapped_mint: &'a Pubkey,
    salt: &'a [u8; 32],
) -> [&'a [u8]; 3] {
    [WRAPPED_MINT_SEED, unwrapped_mint.as_ref(), salt]
}

pub(crate) fn get_wrapped_mint_signer_seeds<'a>(
    unwrapped_mint: &'a Pubkey,
    salt: &'a [u8; 32],
    bump_seed: &'a [u8],
) -> [&'a [u8]; 4] {
    [WRAPPED_MINT_SEED, unwrapped_mint.as_ref(), salt, bump_seed]
}

/// Derives the wrapped mint address and bump seed for a specific
/// Tokenization Wrap program deployment.
pub fn get_wrapped_mint_address_with_seed_for_program(
    unwrapped_mint: &Pubkey,
    salt: &[u8; 32],
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&get_wrapped_mint_seeds(unwrapped_mint, salt), program_id)
}

/// Derive the wrapped mint address for an unwrapped mint and salt.
///
/// Each distinct salt yields an independent wrapped mint over the same
/// unwrapped mint.
pub fn get_wrapped_mint_address(unwrapped_mint: &Pubkey, salt: &[u8; 32]) -> Pubkey {
    get_wrapped_mint_address_for_program(unwrapped_mint, salt, &id())
}

/// Derive the wrapped mint address for a specific Tokenization Wrap program
/// deployment.
pub fn get_wrapped_mint_address_for_program(
    unwrapped_mint: &Pubkey,
    salt: &[u8; 32],
    program_id: &Pubkey,
) -> Pubkey {
    get_wrapped_mint_address_with_seed_for_program(unwrapped_mint, salt, program_id).0
}

const WRAPPED_MINT_STATE_SEED: &[u8] = br"wrapped_mint_state";

pub(crate) fn get_config_signer_seeds<'a>(
    wrapped_mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 3] {
    [WRAPPED_MINT_STATE_SEED, wrapped_mint.as_ref(), bump_seed]
}

/// Derives the config address and bump seed for a specific Tokenization
/// Wrap program deployment.
pub fn get_config_address_with_seed_for_program(
    wrapped_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WRAPPED_MINT_STATE_SEED, wrapped_mint.as_ref()], program_id)
}

/// Derive the address of the `WrappedMintConfig` governing a wrapped mint
pub fn get_config_address(wrapped_mint: &Pubkey) -> Pubkey {
    get_config_address_for_program(wrapped_mint, &id())
}

/// Derive the config address for a specific Tokenization Wrap program
/// deployment.
pub fn get_config_address_for_program(wrapped_mint: &Pubkey, program_id: &Pubkey) -> Pubkey {
    get_config_address_with_seed_for_program(wrapped_mint, program_id).0
}

const WRAPPED_ROLE_SEED: &[u8] = br"wrapped_role";

pub(crate) fn get_role_signer_seeds<'a>(
    wrapped_mint: &'a Pubkey,
    role: &'a [u8],
    user: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 5] {
    [
        WRAPPED_ROLE_SEED,
        wrapped_mint.as_ref(),
        role,
        user.as_ref(),
        bump_seed,
    ]
}

/// Derives the role grant address and bump seed for a specific Tokenization
/// Wrap program deployment.
pub fn get_role_address_with_seed_for_program(
    wrapped_mint: &Pubkey,
    role: RoleKind,
    user: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    let role_seed = [u8::from(role)];
    Pubkey::find_program_address(
        &[
            WRAPPED_ROLE_SEED,
            wrapped_mint.as_ref(),
            &role_seed,
            user.as_ref(),
        ],
        program_id,
    )
}

/// Derive the address of the `RoleGrant` giving `user` the `role` on a
/// wrapped mint
pub fn get_role_address(wrapped_mint: &Pubkey, role: RoleKind, user: &Pubkey) -> Pubkey {
    get_role_address_for_program(wrapped_mint, role, user, &id())
}

/// Derive the role grant address for a specific Tokenization Wrap program
/// deployment.
pub fn get_role_address_for_program(
    wrapped_mint: &Pubkey,
    role: RoleKind,
    user: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    get_role_address_with_seed_for_program(wrapped_mint, role, user, program_id).0
}

/// Derive the vault `ATA` holding the unwrapped tokens that back a wrapped
/// mint. The vault is owned by the wrapped mint address itself.
pub fn get_vault_address(
    wrapped_mint: &Pubkey,
    unwrapped_mint: &Pubkey,
    unwrapped_token_program_id: &Pubkey,
) -> Pubkey {
    get_associated_token_address_with_program_id(
        wrapped_mint,
        unwrapped_mint,
        unwrapped_token_program_id,
    )
}

/// Derive the vault `ATA` for a specific Tokenization Wrap program
/// deployment, starting from the unwrapped mint and salt.
pub fn get_vault_address_for_program(
    unwrapped_mint: &Pubkey,
    salt: &[u8; 32],
    unwrapped_token_program_id: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    let wrapped_mint = get_wrapped_mint_address_for_program(unwrapped_mint, salt, program_id);
    get_vault_address(&wrapped_mint, unwrapped_mint, unwrapped_token_program_id)
}

/// Derive the associated wrapped token account of `owner`
pub fn get_wrapped_token_address(owner: &Pubkey, wrapped_mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, wrapped_mint, &spl_token_2022::id())
}
