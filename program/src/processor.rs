//! Program state processor

use {
    crate::{
        custody::Custody,
        error::TokenizationWrapError,
        get_config_address_with_seed_for_program, get_config_signer_seeds,
        get_role_address_with_seed_for_program, get_role_signer_seeds, get_vault_address,
        get_wrapped_mint_address_with_seed_for_program, get_wrapped_mint_signer_seeds,
        get_wrapped_token_address,
        instruction::TokenizationWrapInstruction,
        metadata::{
            check_metadata_lengths, initialize_wrapped_mint_metadata, wrapped_mint_metadata,
        },
        mint_customizer::{compliance::ComplianceMintCustomizer, interface::MintCustomizer},
        state::{RoleGrant, RoleKind, WrappedMintConfig},
    },
    solana_account_info::{next_account_info, AccountInfo},
    solana_cpi::{invoke, invoke_signed},
    solana_msg::msg,
    solana_program_error::{ProgramError, ProgramResult},
    solana_pubkey::Pubkey,
    solana_rent::Rent,
    solana_system_interface::{
        instruction::{allocate, assign, transfer},
        program as system_program,
    },
    solana_sysvar::Sysvar,
    spl_associated_token_account_client::instruction::create_associated_token_account_idempotent,
    spl_pod::{optional_keys::OptionalNonZeroPubkey, primitives::PodBool},
    spl_token_2022::{
        extension::PodStateWithExtensions,
        instruction::{burn, close_account, initialize_mint2, mint_to},
        onchain::invoke_transfer_checked,
        pod::{PodAccount, PodMint},
    },
};

/// Funds, allocates and assigns a PDA. Lamports already sitting at the
/// address count towards `lamports`, so a pre-funded address cannot block
/// creation.
fn create_pda_account<'a>(
    payer_account: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    owner: &Pubkey,
    space: usize,
    lamports: u64,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let shortfall = lamports.saturating_sub(new_account.lamports());
    if shortfall > 0 {
        invoke(
            &transfer(payer_account.key, new_account.key, shortfall),
            &[payer_account.clone(), new_account.clone()],
        )?;
    }
    invoke_signed(
        &allocate(new_account.key, space as u64),
        &[new_account.clone()],
        &[signer_seeds],
    )?;
    invoke_signed(
        &assign(new_account.key, owner),
        &[new_account.clone()],
        &[signer_seeds],
    )
}

/// Deletes a program-owned account, sending its rent to `destination_account`
fn close_program_account(
    account: &AccountInfo,
    destination_account: &AccountInfo,
) -> ProgramResult {
    let destination_lamports = destination_account
        .lamports()
        .checked_add(account.lamports())
        .ok_or(TokenizationWrapError::Overflow)?;
    **destination_account.try_borrow_mut_lamports()? = destination_lamports;
    **account.try_borrow_mut_lamports()? = 0;
    account.resize(0)?;
    account.assign(&system_program::id());
    Ok(())
}

/// Reads and authenticates a `WrappedMintConfig`
fn load_config(
    program_id: &Pubkey,
    config_account: &AccountInfo,
) -> Result<WrappedMintConfig, ProgramError> {
    if config_account.data_is_empty() {
        msg!("No config at {}", config_account.key);
        return Err(TokenizationWrapError::RecordNotFound.into());
    }
    if config_account.owner != program_id {
        return Err(TokenizationWrapError::InvalidConfigOwner.into());
    }
    let config = {
        let data = config_account.try_borrow_data()?;
        *WrappedMintConfig::unpack(&data)?
    };
    let bump_seed = [config.config_bump];
    let expected_address = Pubkey::create_program_address(
        &get_config_signer_seeds(&config.wrapped_mint, &bump_seed),
        program_id,
    )
    .map_err(|_| TokenizationWrapError::ConfigMismatch)?;
    if expected_address != *config_account.key {
        msg!("Config account address does not match expected PDA");
        return Err(TokenizationWrapError::ConfigMismatch.into());
    }
    Ok(config)
}

fn save_config(config_account: &AccountInfo, config: &WrappedMintConfig) -> ProgramResult {
    let mut data = config_account.try_borrow_mut_data()?;
    *WrappedMintConfig::unpack_mut(&mut data)? = *config;
    Ok(())
}

/// Fails unless `owner_account` signed and is the config owner
fn authorize_owner(
    config: &WrappedMintConfig,
    owner_account: &AccountInfo,
    config_account: &AccountInfo,
    operation: &str,
) -> ProgramResult {
    if !owner_account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }
    if let Err(err) = config.check_owner(owner_account.key) {
        msg!(
            "{}: {} is not the owner of config {}",
            operation,
            owner_account.key,
            config_account.key
        );
        return Err(err.into());
    }
    Ok(())
}

/// Fails unless `role_account` is the live grant of `role` to `user`
fn check_role(
    program_id: &Pubkey,
    config_account: &AccountInfo,
    wrapped_mint: &Pubkey,
    role_account: &AccountInfo,
    role: RoleKind,
    user: &Pubkey,
    operation: &str,
) -> ProgramResult {
    let granted = role_account.owner == program_id && {
        let data = role_account.try_borrow_data()?;
        match RoleGrant::unpack(&data) {
            Ok(grant) if grant.grants(wrapped_mint, role, user) => {
                let role_seed = [grant.role];
                let bump_seed = [grant.bump];
                Pubkey::create_program_address(
                    &get_role_signer_seeds(wrapped_mint, &role_seed, user, &bump_seed),
                    program_id,
                )
                .is_ok_and(|address| address == *role_account.key)
            }
            _ => false,
        }
    };
    if !granted {
        msg!(
            "{}: {} does not hold the {:?} role of config {}",
            operation,
            user,
            role,
            config_account.key
        );
        return Err(TokenizationWrapError::MissingRole.into());
    }
    Ok(())
}

fn check_wrapped_mint(config: &WrappedMintConfig, wrapped_mint_account: &AccountInfo) -> ProgramResult {
    if *wrapped_mint_account.key != config.wrapped_mint {
        return Err(TokenizationWrapError::WrappedMintMismatch.into());
    }
    Ok(())
}

fn check_unwrapped_mint(
    config: &WrappedMintConfig,
    unwrapped_mint_account: &AccountInfo,
) -> ProgramResult {
    if *unwrapped_mint_account.key != config.unwrapped_mint {
        return Err(TokenizationWrapError::UnwrappedMintMismatch.into());
    }
    Ok(())
}

fn check_vault(config: &WrappedMintConfig, vault_account: &AccountInfo) -> ProgramResult {
    if config.is_vault_closed() {
        return Err(TokenizationWrapError::VaultClosed.into());
    }
    if *vault_account.key != config.unwrapped_mint_vault {
        return Err(TokenizationWrapError::VaultMismatch.into());
    }
    Ok(())
}

fn check_wrapped_token_program(wrapped_token_program_account: &AccountInfo) -> ProgramResult {
    if *wrapped_token_program_account.key != spl_token_2022::id() {
        msg!("Wrapped mint must be owned by SPL Token-2022");
        return Err(TokenizationWrapError::InvalidTokenProgram.into());
    }
    Ok(())
}

fn check_unwrapped_token_program(
    config: &WrappedMintConfig,
    unwrapped_token_program_account: &AccountInfo,
) -> ProgramResult {
    if *unwrapped_token_program_account.key != config.unwrapped_token_program {
        return Err(TokenizationWrapError::InvalidTokenProgram.into());
    }
    Ok(())
}

fn token_account_amount(token_account: &AccountInfo) -> Result<u64, ProgramError> {
    let data = token_account.try_borrow_data()?;
    let account = PodStateWithExtensions::<PodAccount>::unpack(&data)?.base;
    Ok(u64::from(account.amount))
}

/// Returns `(supply, decimals)`
fn mint_supply_and_decimals(mint_account: &AccountInfo) -> Result<(u64, u8), ProgramError> {
    let data = mint_account.try_borrow_data()?;
    let mint = PodStateWithExtensions::<PodMint>::unpack(&data)?.base;
    Ok((u64::from(mint.supply), mint.decimals))
}

/// Processes [`CreateMint`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_create_mint<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
    salt: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let wrapped_mint_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let unwrapped_mint_account = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;
    let wrapped_token_program_account = next_account_info(account_info_iter)?;
    let unwrapped_token_program_account = next_account_info(account_info_iter)?;
    let associated_token_program_account = next_account_info(account_info_iter)?;

    check_metadata_lengths(&name, &symbol, &uri)?;

    if !owner_account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    check_wrapped_token_program(wrapped_token_program_account)?;
    let unwrapped_token_program_id = unwrapped_token_program_account.key;
    if unwrapped_mint_account.owner != unwrapped_token_program_id
        || (*unwrapped_token_program_id != spl_token::id()
            && *unwrapped_token_program_id != spl_token_2022::id())
    {
        msg!("Unwrapped mint is not owned by the given SPL Token program");
        return Err(TokenizationWrapError::InvalidTokenProgram.into());
    }

    // PDA derivation validation

    let (wrapped_mint_address, wrapped_mint_bump) =
        get_wrapped_mint_address_with_seed_for_program(
            unwrapped_mint_account.key,
            &salt,
            program_id,
        );
    if *wrapped_mint_account.key != wrapped_mint_address {
        msg!("Wrapped mint account address does not match expected PDA");
        return Err(TokenizationWrapError::WrappedMintMismatch.into());
    }

    let (config_address, config_bump) =
        get_config_address_with_seed_for_program(&wrapped_mint_address, program_id);
    if *config_account.key != config_address {
        msg!("Config account address does not match expected PDA");
        return Err(TokenizationWrapError::ConfigMismatch.into());
    }

    let vault_address = get_vault_address(
        &wrapped_mint_address,
        unwrapped_mint_account.key,
        unwrapped_token_program_id,
    );
    if *vault_account.key != vault_address {
        msg!("Vault account address is not the wrapped mint's associated token account");
        return Err(TokenizationWrapError::VaultMismatch.into());
    }

    if wrapped_mint_account.data_len() > 0 || config_account.data_len() > 0 {
        msg!("Wrapped mint or config already initialized");
        return Err(TokenizationWrapError::RecordAlreadyExists.into());
    }

    // Initialize the wrapped mint

    let (freeze_authority, decimals) = ComplianceMintCustomizer::get_freeze_auth_and_decimals(
        unwrapped_mint_account,
        owner_account.key,
    )?;
    let metadata = wrapped_mint_metadata(
        &wrapped_mint_address,
        owner_account.key,
        &name,
        &symbol,
        &uri,
    );

    let rent = Rent::get()?;
    let mint_space = ComplianceMintCustomizer::get_token_2022_mint_space()?;
    // Token metadata reallocates the mint after initialization
    let mint_lamports = rent.minimum_balance(
        mint_space
            .checked_add(metadata.tlv_size_of()?)
            .ok_or(TokenizationWrapError::Overflow)?,
    );

    let wrapped_mint_bump_seed = [wrapped_mint_bump];
    let wrapped_mint_signer_seeds = get_wrapped_mint_signer_seeds(
        unwrapped_mint_account.key,
        &salt,
        &wrapped_mint_bump_seed,
    );
    create_pda_account(
        owner_account,
        wrapped_mint_account,
        wrapped_token_program_account.key,
        mint_space,
        mint_lamports,
        &wrapped_mint_signer_seeds,
    )?;

    ComplianceMintCustomizer::initialize_extensions(
        wrapped_mint_account,
        wrapped_token_program_account,
        owner_account.key,
    )?;

    invoke(
        &initialize_mint2(
            wrapped_token_program_account.key,
            wrapped_mint_account.key,
            wrapped_mint_account.key,
            freeze_authority.as_ref(),
            decimals,
        )?,
        &[wrapped_mint_account.clone()],
    )?;

    initialize_wrapped_mint_metadata(
        wrapped_token_program_account,
        wrapped_mint_account,
        owner_account,
        metadata,
        &wrapped_mint_signer_seeds,
    )?;

    // Initialize config PDA

    let config_bump_seed = [config_bump];
    let config_signer_seeds = get_config_signer_seeds(&wrapped_mint_address, &config_bump_seed);
    create_pda_account(
        owner_account,
        config_account,
        program_id,
        WrappedMintConfig::LEN,
        rent.minimum_balance(WrappedMintConfig::LEN),
        &config_signer_seeds,
    )?;
    save_config(
        config_account,
        &WrappedMintConfig {
            wrapped_mint: wrapped_mint_address,
            owner: *owner_account.key,
            pending_owner: OptionalNonZeroPubkey::default(),
            unwrapped_mint: *unwrapped_mint_account.key,
            unwrapped_mint_vault: vault_address,
            unwrapped_token_program: *unwrapped_token_program_id,
            salt,
            wrapped_mint_bump,
            config_bump,
            vault_closed: PodBool::from(false),
        },
    )?;

    // Vault is the wrapped mint's ATA for the unwrapped mint

    invoke(
        &create_associated_token_account_idempotent(
            owner_account.key,
            &wrapped_mint_address,
            unwrapped_mint_account.key,
            unwrapped_token_program_id,
        ),
        &[
            owner_account.clone(),
            vault_account.clone(),
            wrapped_mint_account.clone(),
            unwrapped_mint_account.clone(),
            system_program_account.clone(),
            unwrapped_token_program_account.clone(),
            associated_token_program_account.clone(),
        ],
    )?;

    msg!(
        "Created wrapped mint {} over {}, config {}, vault {}",
        wrapped_mint_address,
        unwrapped_mint_account.key,
        config_address,
        vault_address
    );
    Ok(())
}

/// Processes [`AddRole`](enum.TokenizationWrapInstruction.html) instruction.
pub fn process_add_role<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
    user: Pubkey,
    role: RoleKind,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let role_account = next_account_info(account_info_iter)?;
    let _system_program_account = next_account_info(account_info_iter)?;

    let config = load_config(program_id, config_account)?;
    authorize_owner(&config, owner_account, config_account, "AddRole")?;

    let (role_address, role_bump) =
        get_role_address_with_seed_for_program(&config.wrapped_mint, role, &user, program_id);
    if *role_account.key != role_address {
        msg!("Role account address does not match expected PDA");
        return Err(TokenizationWrapError::RoleMismatch.into());
    }

    if role_account.data_len() > 0 {
        let data = role_account.try_borrow_data()?;
        return match RoleGrant::unpack(&data) {
            Ok(grant)
                if role_account.owner == program_id
                    && grant.grants(&config.wrapped_mint, role, &user) =>
            {
                msg!("{} already holds the {:?} role", user, role);
                Ok(())
            }
            _ => Err(TokenizationWrapError::RecordAlreadyExists.into()),
        };
    }

    let role_seed = [u8::from(role)];
    let bump_seed = [role_bump];
    let signer_seeds = get_role_signer_seeds(&config.wrapped_mint, &role_seed, &user, &bump_seed);
    let rent = Rent::get()?;
    create_pda_account(
        owner_account,
        role_account,
        program_id,
        RoleGrant::LEN,
        rent.minimum_balance(RoleGrant::LEN),
        &signer_seeds,
    )?;

    let mut data = role_account.try_borrow_mut_data()?;
    *RoleGrant::unpack_mut(&mut data)? = RoleGrant {
        wrapped_mint: config.wrapped_mint,
        user,
        role: role.into(),
        bump: role_bump,
    };

    msg!("Granted {:?} role to {}", role, user);
    Ok(())
}

/// Processes [`RemoveRole`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_remove_role(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    user: Pubkey,
    role: RoleKind,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let role_account = next_account_info(account_info_iter)?;

    let config = load_config(program_id, config_account)?;
    authorize_owner(&config, owner_account, config_account, "RemoveRole")?;

    let (role_address, _) =
        get_role_address_with_seed_for_program(&config.wrapped_mint, role, &user, program_id);
    if *role_account.key != role_address {
        msg!("Role account address does not match expected PDA");
        return Err(TokenizationWrapError::RoleMismatch.into());
    }
    if role_account.data_is_empty() || role_account.owner != program_id {
        return Err(TokenizationWrapError::RoleNotFound.into());
    }

    close_program_account(role_account, owner_account)?;

    msg!("Revoked {:?} role from {}", role, user);
    Ok(())
}

/// Processes [`Wrap`](enum.TokenizationWrapInstruction.html) instruction.
pub fn process_wrap<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let user_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let role_account = next_account_info(account_info_iter)?;
    let wrapped_mint_account = next_account_info(account_info_iter)?;
    let unwrapped_mint_account = next_account_info(account_info_iter)?;
    let user_unwrapped_token_account = next_account_info(account_info_iter)?;
    let user_wrapped_token_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let unwrapped_token_program_account = next_account_info(account_info_iter)?;
    let wrapped_token_program_account = next_account_info(account_info_iter)?;
    let associated_token_program_account = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;
    let additional_accounts = account_info_iter.as_slice();

    if !user_account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let config = load_config(program_id, config_account)?;
    check_role(
        program_id,
        config_account,
        &config.wrapped_mint,
        role_account,
        RoleKind::Wrapper,
        user_account.key,
        "Wrap",
    )?;
    check_wrapped_mint(&config, wrapped_mint_account)?;
    check_unwrapped_mint(&config, unwrapped_mint_account)?;
    check_vault(&config, vault_account)?;
    check_unwrapped_token_program(&config, unwrapped_token_program_account)?;
    check_wrapped_token_program(wrapped_token_program_account)?;

    if *user_wrapped_token_account.key
        != get_wrapped_token_address(user_account.key, &config.wrapped_mint)
    {
        msg!("Destination is not the caller's associated wrapped token account");
        return Err(ProgramError::InvalidAccountData);
    }

    let (wrapped_supply, wrapped_decimals) = mint_supply_and_decimals(wrapped_mint_account)?;
    let (_, unwrapped_decimals) = mint_supply_and_decimals(unwrapped_mint_account)?;
    if wrapped_decimals != unwrapped_decimals {
        return Err(TokenizationWrapError::DecimalsMismatch.into());
    }

    let custody = Custody::new(token_account_amount(vault_account)?, wrapped_supply);
    custody.wrap(amount, token_account_amount(user_unwrapped_token_account)?)?;

    invoke(
        &create_associated_token_account_idempotent(
            user_account.key,
            user_account.key,
            wrapped_mint_account.key,
            wrapped_token_program_account.key,
        ),
        &[
            user_account.clone(),
            user_wrapped_token_account.clone(),
            wrapped_mint_account.clone(),
            system_program_account.clone(),
            wrapped_token_program_account.clone(),
            associated_token_program_account.clone(),
        ],
    )?;

    // Deposit unwrapped tokens into the vault

    invoke_transfer_checked(
        unwrapped_token_program_account.key,
        user_unwrapped_token_account.clone(),
        unwrapped_mint_account.clone(),
        vault_account.clone(),
        user_account.clone(),
        additional_accounts,
        amount,
        unwrapped_decimals,
        &[],
    )?;

    // Mint what the vault was credited, net of any transfer fee

    let (deposited, _) = custody.settle_deposit(token_account_amount(vault_account)?)?;
    if deposited != amount {
        msg!("Transfer fee withheld {}", amount.saturating_sub(deposited));
    }

    let bump_seed = [config.wrapped_mint_bump];
    let signer_seeds =
        get_wrapped_mint_signer_seeds(&config.unwrapped_mint, &config.salt, &bump_seed);
    invoke_signed(
        &mint_to(
            wrapped_token_program_account.key,
            wrapped_mint_account.key,
            user_wrapped_token_account.key,
            wrapped_mint_account.key,
            &[],
            deposited,
        )?,
        &[
            wrapped_mint_account.clone(),
            user_wrapped_token_account.clone(),
            wrapped_mint_account.clone(),
        ],
        &[&signer_seeds],
    )?;

    msg!("Wrapped {} for {}", deposited, user_account.key);
    Ok(())
}

/// Processes [`Unwrap`](enum.TokenizationWrapInstruction.html) instruction.
pub fn process_unwrap<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let user_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let role_account = next_account_info(account_info_iter)?;
    let wrapped_mint_account = next_account_info(account_info_iter)?;
    let unwrapped_mint_account = next_account_info(account_info_iter)?;
    let user_wrapped_token_account = next_account_info(account_info_iter)?;
    let user_unwrapped_token_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let unwrapped_token_program_account = next_account_info(account_info_iter)?;
    let wrapped_token_program_account = next_account_info(account_info_iter)?;
    let additional_accounts = account_info_iter.as_slice();

    if !user_account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let config = load_config(program_id, config_account)?;
    check_role(
        program_id,
        config_account,
        &config.wrapped_mint,
        role_account,
        RoleKind::Wrapper,
        user_account.key,
        "Unwrap",
    )?;
    check_wrapped_mint(&config, wrapped_mint_account)?;
    check_unwrapped_mint(&config, unwrapped_mint_account)?;
    check_vault(&config, vault_account)?;
    check_unwrapped_token_program(&config, unwrapped_token_program_account)?;
    check_wrapped_token_program(wrapped_token_program_account)?;

    let (wrapped_supply, wrapped_decimals) = mint_supply_and_decimals(wrapped_mint_account)?;
    let (_, unwrapped_decimals) = mint_supply_and_decimals(unwrapped_mint_account)?;
    if wrapped_decimals != unwrapped_decimals {
        return Err(TokenizationWrapError::DecimalsMismatch.into());
    }

    let custody = Custody::new(token_account_amount(vault_account)?, wrapped_supply);
    custody.unwrap(amount, token_account_amount(user_wrapped_token_account)?)?;

    // Burn wrapped tokens

    invoke(
        &burn(
            wrapped_token_program_account.key,
            user_wrapped_token_account.key,
            wrapped_mint_account.key,
            user_account.key,
            &[],
            amount,
        )?,
        &[
            user_wrapped_token_account.clone(),
            wrapped_mint_account.clone(),
            user_account.clone(),
        ],
    )?;

    // Release unwrapped tokens from the vault

    let bump_seed = [config.wrapped_mint_bump];
    let signer_seeds =
        get_wrapped_mint_signer_seeds(&config.unwrapped_mint, &config.salt, &bump_seed);
    invoke_transfer_checked(
        unwrapped_token_program_account.key,
        vault_account.clone(),
        unwrapped_mint_account.clone(),
        user_unwrapped_token_account.clone(),
        wrapped_mint_account.clone(),
        additional_accounts,
        amount,
        unwrapped_decimals,
        &[&signer_seeds],
    )?;

    msg!("Unwrapped {} for {}", amount, user_account.key);
    Ok(())
}

/// Processes [`CloseVault`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_close_vault<'a>(program_id: &Pubkey, accounts: &[AccountInfo<'a>]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let wrapped_mint_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let unwrapped_token_program_account = next_account_info(account_info_iter)?;

    let mut config = load_config(program_id, config_account)?;
    authorize_owner(&config, owner_account, config_account, "CloseVault")?;
    check_wrapped_mint(&config, wrapped_mint_account)?;
    check_vault(&config, vault_account)?;
    check_unwrapped_token_program(&config, unwrapped_token_program_account)?;

    let (wrapped_supply, _) = mint_supply_and_decimals(wrapped_mint_account)?;
    Custody::new(token_account_amount(vault_account)?, wrapped_supply).check_closable()?;

    let bump_seed = [config.wrapped_mint_bump];
    let signer_seeds =
        get_wrapped_mint_signer_seeds(&config.unwrapped_mint, &config.salt, &bump_seed);
    invoke_signed(
        &close_account(
            unwrapped_token_program_account.key,
            vault_account.key,
            owner_account.key,
            wrapped_mint_account.key,
            &[],
        )?,
        &[
            vault_account.clone(),
            owner_account.clone(),
            wrapped_mint_account.clone(),
        ],
        &[&signer_seeds],
    )?;

    config.vault_closed = PodBool::from(true);
    save_config(config_account, &config)?;

    msg!("Closed vault {}", vault_account.key);
    Ok(())
}

/// Processes [`TransferOwnership`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_transfer_ownership(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    new_owner: Pubkey,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;

    let mut config = load_config(program_id, config_account)?;
    authorize_owner(&config, owner_account, config_account, "TransferOwnership")?;

    config.propose_owner(&new_owner);
    save_config(config_account, &config)?;

    match config.pending_owner() {
        Some(pending_owner) => msg!("Proposed {} as owner of {}", pending_owner, config_account.key),
        None => msg!("Cancelled ownership transfer of {}", config_account.key),
    }
    Ok(())
}

/// Processes [`AcceptOwnership`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_accept_ownership(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let pending_owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;

    if !pending_owner_account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let mut config = load_config(program_id, config_account)?;
    if let Err(err) = config.accept_owner(pending_owner_account.key) {
        msg!(
            "AcceptOwnership: {} is not the pending owner of config {}",
            pending_owner_account.key,
            config_account.key
        );
        return Err(err.into());
    }
    save_config(config_account, &config)?;

    msg!("{} is now owner of {}", config.owner, config_account.key);
    Ok(())
}

/// Processes [`RecoverMint`](enum.TokenizationWrapInstruction.html)
/// instruction.
pub fn process_recover_mint<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let owner_account = next_account_info(account_info_iter)?;
    let config_account = next_account_info(account_info_iter)?;
    let wrapped_mint_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let owner_wrapped_token_account = next_account_info(account_info_iter)?;
    let wrapped_token_program_account = next_account_info(account_info_iter)?;
    let associated_token_program_account = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;

    let config = load_config(program_id, config_account)?;
    authorize_owner(&config, owner_account, config_account, "RecoverMint")?;
    check_wrapped_mint(&config, wrapped_mint_account)?;
    check_vault(&config, vault_account)?;
    check_wrapped_token_program(wrapped_token_program_account)?;

    if *owner_wrapped_token_account.key
        != get_wrapped_token_address(owner_account.key, &config.wrapped_mint)
    {
        msg!("Destination is not the owner's associated wrapped token account");
        return Err(ProgramError::InvalidAccountData);
    }

    let (wrapped_supply, _) = mint_supply_and_decimals(wrapped_mint_account)?;
    let surplus = Custody::new(token_account_amount(vault_account)?, wrapped_supply).surplus()?;
    if surplus == 0 {
        msg!("Vault is balanced, nothing to recover");
        return Ok(());
    }

    invoke(
        &create_associated_token_account_idempotent(
            owner_account.key,
            owner_account.key,
            wrapped_mint_account.key,
            wrapped_token_program_account.key,
        ),
        &[
            owner_account.clone(),
            owner_wrapped_token_account.clone(),
            wrapped_mint_account.clone(),
            system_program_account.clone(),
            wrapped_token_program_account.clone(),
            associated_token_program_account.clone(),
        ],
    )?;

    let bump_seed = [config.wrapped_mint_bump];
    let signer_seeds =
        get_wrapped_mint_signer_seeds(&config.unwrapped_mint, &config.salt, &bump_seed);
    invoke_signed(
        &mint_to(
            wrapped_token_program_account.key,
            wrapped_mint_account.key,
            owner_wrapped_token_account.key,
            wrapped_mint_account.key,
            &[],
            surplus,
        )?,
        &[
            wrapped_mint_account.clone(),
            owner_wrapped_token_account.clone(),
            wrapped_mint_account.clone(),
        ],
        &[&signer_seeds],
    )?;

    msg!("Recovered {} wrapped tokens to {}", surplus, owner_account.key);
    Ok(())
}

/// Instruction processor
pub fn process_instruction<'a>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'a>],
    input: &[u8],
) -> ProgramResult {
    match TokenizationWrapInstruction::unpack(input)? {
        TokenizationWrapInstruction::CreateMint {
            salt,
            name,
            symbol,
            uri,
        } => {
            msg!("Instruction: CreateMint");
            process_create_mint(program_id, accounts, salt, name, symbol, uri)
        }
        TokenizationWrapInstruction::AddRole { user, role } => {
            msg!("Instruction: AddRole");
            process_add_role(program_id, accounts, user, role)
        }
        TokenizationWrapInstruction::RemoveRole { user, role } => {
            msg!("Instruction: RemoveRole");
            process_remove_role(program_id, accounts, user, role)
        }
        TokenizationWrapInstruction::Wrap { amount } => {
            msg!("Instruction: Wrap");
            process_wrap(program_id, accounts, amount)
        }
        TokenizationWrapInstruction::Unwrap { amount } => {
            msg!("Instruction: Unwrap");
            process_unwrap(program_id, accounts, amount)
        }
        TokenizationWrapInstruction::CloseVault => {
            msg!("Instruction: CloseVault");
            process_close_vault(program_id, accounts)
        }
        TokenizationWrapInstruction::TransferOwnership { new_owner } => {
            msg!("Instruction: TransferOwnership");
            process_transfer_ownership(program_id, accounts, new_owner)
        }
        TokenizationWrapInstruction::AcceptOwnership => {
            msg!("Instruction: AcceptOwnership");
            process_accept_ownership(program_id, accounts)
        }
        TokenizationWrapInstruction::RecoverMint => {
            msg!("Instruction: RecoverMint");
            process_recover_mint(program_id, accounts)
        }
    }
}
