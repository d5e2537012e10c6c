use {
    solana_account_info::AccountInfo,
    solana_program_error::{ProgramError, ProgramResult},
    solana_pubkey::Pubkey,
};

/// Shapes the Token-2022 mint created for each wrapped mint.
pub trait MintCustomizer {
    /// Size of the wrapped mint account before `InitializeMint2`. Extensions
    /// written afterwards (e.g. token metadata) reallocate on their own.
    fn get_token_2022_mint_space() -> Result<usize, ProgramError>;

    /// Initializes the extensions that must precede `InitializeMint2`,
    /// granting their authorities to `authority`
    fn initialize_extensions(
        wrapped_mint_account: &AccountInfo,
        wrapped_token_program_account: &AccountInfo,
        authority: &Pubkey,
    ) -> ProgramResult;

    /// Freeze authority and decimals the wrapped mint is initialized with
    fn get_freeze_auth_and_decimals(
        unwrapped_mint_account: &AccountInfo,
        authority: &Pubkey,
    ) -> Result<(Option<Pubkey>, u8), ProgramError>;
}
