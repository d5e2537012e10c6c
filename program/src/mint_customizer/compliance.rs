use {
    crate::mint_customizer::interface::MintCustomizer,
    solana_account_info::AccountInfo,
    solana_cpi::invoke,
    solana_program_error::{ProgramError, ProgramResult},
    solana_pubkey::Pubkey,
    spl_token_2022::{
        extension::{
            confidential_transfer::instruction::initialize_mint as initialize_confidential_transfer_mint,
            default_account_state::instruction::initialize_default_account_state,
            metadata_pointer::instruction::initialize as initialize_metadata_pointer,
            pausable::instruction::initialize as initialize_pausable,
            scaled_ui_amount::instruction::initialize as initialize_scaled_ui_amount,
            transfer_hook::instruction::initialize as initialize_transfer_hook, ExtensionType,
            PodStateWithExtensions,
        },
        instruction::{initialize_mint_close_authority, initialize_permanent_delegate},
        pod::PodMint,
        state::AccountState,
    },
};

/// Extensions of every wrapped mint, in initialization order
pub const WRAPPED_MINT_EXTENSIONS: [ExtensionType; 8] = [
    ExtensionType::MetadataPointer,
    ExtensionType::PermanentDelegate,
    ExtensionType::TransferHook,
    ExtensionType::DefaultAccountState,
    ExtensionType::Pausable,
    ExtensionType::MintCloseAuthority,
    ExtensionType::ScaledUiAmount,
    ExtensionType::ConfidentialTransferMint,
];

/// Wrapped mint administered by its creator, who holds every authority:
/// - metadata pointer to the mint itself
/// - permanent delegate, able to move or burn from any holder
/// - transfer hook, with no hook program until the authority sets one
/// - new accounts start `Initialized` and can be frozen one by one
/// - pause switch over transfers, mints and burns
/// - mint close authority
/// - scaled UI amount, starting at a multiplier of 1
/// - confidential transfers, approved manually and without an auditor
pub struct ComplianceMintCustomizer;

impl MintCustomizer for ComplianceMintCustomizer {
    fn get_token_2022_mint_space() -> Result<usize, ProgramError> {
        ExtensionType::try_calculate_account_len::<PodMint>(&WRAPPED_MINT_EXTENSIONS)
    }

    fn initialize_extensions(
        wrapped_mint_account: &AccountInfo,
        wrapped_token_program_account: &AccountInfo,
        authority: &Pubkey,
    ) -> ProgramResult {
        let token_program_id = wrapped_token_program_account.key;
        let mint = wrapped_mint_account.key;

        let instructions = [
            initialize_metadata_pointer(token_program_id, mint, Some(*authority), Some(*mint))?,
            initialize_permanent_delegate(token_program_id, mint, authority)?,
            initialize_transfer_hook(token_program_id, mint, Some(*authority), None)?,
            initialize_default_account_state(token_program_id, mint, &AccountState::Initialized)?,
            initialize_pausable(token_program_id, mint, authority)?,
            initialize_mint_close_authority(token_program_id, mint, Some(authority))?,
            initialize_scaled_ui_amount(token_program_id, mint, Some(*authority), 1.0)?,
            initialize_confidential_transfer_mint(
                token_program_id,
                mint,
                Some(*authority),
                false,
                None,
            )?,
        ];
        for instruction in &instructions {
            invoke(instruction, &[wrapped_mint_account.clone()])?;
        }
        Ok(())
    }

    fn get_freeze_auth_and_decimals(
        unwrapped_mint_account: &AccountInfo,
        authority: &Pubkey,
    ) -> Result<(Option<Pubkey>, u8), ProgramError> {
        let unwrapped_mint_data = unwrapped_mint_account.try_borrow_data()?;
        let decimals = PodStateWithExtensions::<PodMint>::unpack(&unwrapped_mint_data)?
            .base
            .decimals;
        Ok((Some(*authority), decimals))
    }
}
