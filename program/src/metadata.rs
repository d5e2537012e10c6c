//! Token metadata of the wrapped mint

use {
    crate::{error::TokenizationWrapError, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH},
    solana_account_info::AccountInfo,
    solana_cpi::invoke_signed,
    solana_program_error::{ProgramError, ProgramResult},
    solana_pubkey::Pubkey,
    spl_pod::optional_keys::OptionalNonZeroPubkey,
    spl_token_metadata_interface::{instruction::initialize, state::TokenMetadata},
};

/// Rejects metadata fields longer than the wrapped mint accepts
pub fn check_metadata_lengths(
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<(), TokenizationWrapError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(TokenizationWrapError::NameTooLong);
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(TokenizationWrapError::SymbolTooLong);
    }
    if uri.len() > MAX_URI_LENGTH {
        return Err(TokenizationWrapError::UriTooLong);
    }
    Ok(())
}

/// Metadata stored in the wrapped mint
pub fn wrapped_mint_metadata(
    wrapped_mint: &Pubkey,
    update_authority: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
) -> TokenMetadata {
    TokenMetadata {
        update_authority: OptionalNonZeroPubkey(*update_authority),
        mint: *wrapped_mint,
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        additional_metadata: vec![],
    }
}

/// Writes `metadata` into the wrapped mint. The wrapped mint is its own mint
/// authority, so `signer_seeds` are the wrapped mint seeds.
pub fn initialize_wrapped_mint_metadata<'a>(
    wrapped_token_program_account: &AccountInfo<'a>,
    wrapped_mint_account: &AccountInfo<'a>,
    update_authority_account: &AccountInfo<'a>,
    metadata: TokenMetadata,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let update_authority = Option::<Pubkey>::from(metadata.update_authority)
        .ok_or(ProgramError::InvalidArgument)?;
    invoke_signed(
        &initialize(
            wrapped_token_program_account.key,
            wrapped_mint_account.key,
            &update_authority,
            wrapped_mint_account.key,
            wrapped_mint_account.key,
            metadata.name,
            metadata.symbol,
            metadata.uri,
        ),
        &[
            wrapped_mint_account.clone(),
            update_authority_account.clone(),
            wrapped_mint_account.clone(),
        ],
        &[signer_seeds],
    )
}
