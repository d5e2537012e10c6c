#![cfg(feature = "test-sbf")]

mod helpers;

use {
    helpers::{
        custom_error, TestContext, TokenProgram, DECIMALS, NAME, SALT, SYMBOL, URI,
    },
    mollusk_svm::result::Check,
    solana_program_option::COption,
    solana_pubkey::Pubkey,
    spl_pod::{optional_keys::OptionalNonZeroPubkey, primitives::PodBool},
    spl_token_2022::{
        extension::{
            confidential_transfer::ConfidentialTransferMint,
            default_account_state::DefaultAccountState, metadata_pointer::MetadataPointer,
            mint_close_authority::MintCloseAuthority, pausable::PausableConfig,
            permanent_delegate::PermanentDelegate, scaled_ui_amount::ScaledUiAmountConfig,
            transfer_hook::TransferHook, BaseStateWithExtensions, StateWithExtensions,
        },
        state::{Account as TokenAccount, AccountState, Mint},
    },
    tokenization_wrap::{
        error::TokenizationWrapError, get_config_address, get_vault_address,
        get_wrapped_mint_address, instruction::create_mint,
        mint_customizer::compliance::WRAPPED_MINT_EXTENSIONS,
    },
};

fn assert_created(context: &TestContext) {
    let config = context.config();
    assert_eq!(config.wrapped_mint, context.wrapped_mint);
    assert_eq!(config.owner, context.owner);
    assert_eq!(config.pending_owner(), None);
    assert_eq!(config.unwrapped_mint, context.unwrapped_mint);
    assert_eq!(config.unwrapped_mint_vault, context.vault);
    assert_eq!(config.unwrapped_token_program, context.token_program.id());
    assert_eq!(config.salt, SALT);
    assert!(!config.is_vault_closed());
    assert_eq!(
        context.account(&context.config).unwrap().owner,
        tokenization_wrap::id()
    );

    // wrapped mint copies decimals, is its own mint authority and is
    // administered by the owner
    let wrapped_mint_account = context.account(&context.wrapped_mint).unwrap();
    assert_eq!(wrapped_mint_account.owner, spl_token_2022::id());
    let wrapped_mint = context.wrapped_mint_state();
    assert_eq!(wrapped_mint.decimals, DECIMALS);
    assert_eq!(wrapped_mint.supply, 0);
    assert_eq!(wrapped_mint.mint_authority, COption::Some(context.wrapped_mint));
    assert_eq!(wrapped_mint.freeze_authority, COption::Some(context.owner));
    assert_wrapped_mint_extensions(context);

    let metadata = context.wrapped_metadata();
    assert_eq!(metadata.name, NAME);
    assert_eq!(metadata.symbol, SYMBOL);
    assert_eq!(metadata.uri, URI);
    assert_eq!(metadata.mint, context.wrapped_mint);
    assert_eq!(metadata.update_authority, OptionalNonZeroPubkey(context.owner));

    // empty vault held by the wrapped mint
    let vault_account = context.account(&context.vault).unwrap();
    assert_eq!(vault_account.owner, context.token_program.id());
    let vault = StateWithExtensions::<TokenAccount>::unpack(&vault_account.data)
        .unwrap()
        .base;
    assert_eq!(vault.mint, context.unwrapped_mint);
    assert_eq!(vault.owner, context.wrapped_mint);
    assert_eq!(vault.amount, 0);
}

fn assert_wrapped_mint_extensions(context: &TestContext) {
    let owner = OptionalNonZeroPubkey(context.owner);
    let wrapped_mint_account = context.account(&context.wrapped_mint).unwrap();
    let state = StateWithExtensions::<Mint>::unpack(&wrapped_mint_account.data).unwrap();
    let extension_types = state.get_extension_types().unwrap();
    for extension_type in WRAPPED_MINT_EXTENSIONS {
        assert!(
            extension_types.contains(&extension_type),
            "missing {extension_type:?}"
        );
    }

    let pointer = state.get_extension::<MetadataPointer>().unwrap();
    assert_eq!(pointer.authority, owner);
    assert_eq!(
        pointer.metadata_address,
        OptionalNonZeroPubkey(context.wrapped_mint)
    );

    let delegate = state.get_extension::<PermanentDelegate>().unwrap();
    assert_eq!(delegate.delegate, owner);

    let hook = state.get_extension::<TransferHook>().unwrap();
    assert_eq!(hook.authority, owner);
    assert_eq!(hook.program_id, OptionalNonZeroPubkey::default());

    let default_state = state.get_extension::<DefaultAccountState>().unwrap();
    assert_eq!(default_state.state, AccountState::Initialized as u8);

    let pausable = state.get_extension::<PausableConfig>().unwrap();
    assert_eq!(pausable.authority, owner);
    assert_eq!(pausable.paused, PodBool::from(false));

    let close_authority = state.get_extension::<MintCloseAuthority>().unwrap();
    assert_eq!(close_authority.close_authority, owner);

    let scaled = state.get_extension::<ScaledUiAmountConfig>().unwrap();
    assert_eq!(scaled.authority, owner);
    assert_eq!(f64::from(scaled.multiplier), 1.0);

    let confidential = state.get_extension::<ConfidentialTransferMint>().unwrap();
    assert_eq!(confidential.authority, owner);
    assert_eq!(confidential.auto_approve_new_accounts, PodBool::from(false));
}

#[test]
fn test_create_mint_spl_token() {
    let context = TestContext::with_wrapped_mint(TokenProgram::SplToken);
    assert_created(&context);
}

#[test]
fn test_create_mint_token_2022() {
    let context = TestContext::with_wrapped_mint(TokenProgram::SplToken2022);
    assert_created(&context);
}

#[test]
fn test_create_mint_twice_fails() {
    let mut context = TestContext::with_wrapped_mint(TokenProgram::SplToken);
    context.create_mint(&[custom_error(TokenizationWrapError::RecordAlreadyExists)]);
}

#[test]
fn test_create_mint_metadata_too_long() {
    let cases = [
        ("n".repeat(65), SYMBOL.to_string(), URI.to_string(), TokenizationWrapError::NameTooLong),
        (NAME.to_string(), "s".repeat(33), URI.to_string(), TokenizationWrapError::SymbolTooLong),
        (NAME.to_string(), SYMBOL.to_string(), "u".repeat(513), TokenizationWrapError::UriTooLong),
    ];
    for (name, symbol, uri, error) in cases {
        let mut context = TestContext::new(TokenProgram::SplToken);
        let instruction = create_mint(
            &tokenization_wrap::id(),
            &context.owner,
            &context.wrapped_mint,
            &context.config,
            &context.vault,
            &context.unwrapped_mint,
            &context.token_program.id(),
            SALT,
            name,
            symbol,
            uri,
        );
        context.process(&instruction, &[custom_error(error)]);
        assert!(context.account(&context.config).is_none());
    }
}

#[test]
fn test_create_mint_wrong_addresses() {
    let mut context = TestContext::new(TokenProgram::SplToken);
    let build = |context: &TestContext| {
        create_mint(
            &tokenization_wrap::id(),
            &context.owner,
            &context.wrapped_mint,
            &context.config,
            &context.vault,
            &context.unwrapped_mint,
            &context.token_program.id(),
            SALT,
            NAME.to_string(),
            SYMBOL.to_string(),
            URI.to_string(),
        )
    };

    let mut instruction = build(&context);
    instruction.accounts[1].pubkey = Pubkey::new_unique();
    context.process(
        &instruction,
        &[custom_error(TokenizationWrapError::WrappedMintMismatch)],
    );

    let mut instruction = build(&context);
    instruction.accounts[2].pubkey = Pubkey::new_unique();
    context.process(
        &instruction,
        &[custom_error(TokenizationWrapError::ConfigMismatch)],
    );

    let mut instruction = build(&context);
    instruction.accounts[3].pubkey = Pubkey::new_unique();
    context.process(
        &instruction,
        &[custom_error(TokenizationWrapError::VaultMismatch)],
    );

    // unwrapped token program must own the unwrapped mint
    let mut instruction = build(&context);
    instruction.accounts[7].pubkey = spl_token_2022::id();
    context.process(
        &instruction,
        &[custom_error(TokenizationWrapError::InvalidTokenProgram)],
    );

    // wrapped mint is always Token-2022
    let mut instruction = build(&context);
    instruction.accounts[6].pubkey = spl_token::id();
    context.process(
        &instruction,
        &[custom_error(TokenizationWrapError::InvalidTokenProgram)],
    );

    assert!(context.account(&context.config).is_none());
    assert!(context.account(&context.wrapped_mint).is_none());
}

#[test]
fn test_salts_create_independent_wrapped_mints() {
    let mut context = TestContext::with_wrapped_mint(TokenProgram::SplToken);
    let salt = [8; 32];
    let wrapped_mint = get_wrapped_mint_address(&context.unwrapped_mint, &salt);
    let config = get_config_address(&wrapped_mint);
    let vault = get_vault_address(&wrapped_mint, &context.unwrapped_mint, &spl_token::id());
    assert_ne!(wrapped_mint, context.wrapped_mint);

    let instruction = create_mint(
        &tokenization_wrap::id(),
        &context.owner,
        &wrapped_mint,
        &config,
        &vault,
        &context.unwrapped_mint,
        &spl_token::id(),
        salt,
        NAME.to_string(),
        SYMBOL.to_string(),
        URI.to_string(),
    );
    context.process(&instruction, &[Check::success()]);

    assert!(context.account(&config).is_some());
    assert!(context.account(&vault).is_some());
    // first deployment untouched
    assert_created(&context);
}

#[test]
fn test_create_mint_prefunded_address() {
    let mut context = TestContext::new(TokenProgram::SplToken);
    // lamports sent ahead of time cannot block creation
    context
        .accounts
        .insert(context.wrapped_mint, helpers::system_account(1_000));
    context
        .accounts
        .insert(context.config, helpers::system_account(1_000));
    context.create_mint(&[Check::success()]);
    assert_created(&context);
}
