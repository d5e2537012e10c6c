#![allow(dead_code)]

use {
    mollusk_svm::{
        program::{
            create_program_account_loader_v3, keyed_account_for_system_program, loader_keys,
        },
        result::{Check, InstructionResult, ProgramResult},
        Mollusk,
    },
    solana_account::Account,
    solana_instruction::{AccountMeta, Instruction},
    solana_program_option::COption,
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    spl_associated_token_account_client::address::get_associated_token_address_with_program_id,
    spl_pod::optional_keys::OptionalNonZeroPubkey,
    spl_tlv_account_resolution::{account::ExtraAccountMeta, state::ExtraAccountMetaList},
    spl_token_2022::{
        extension::{
            transfer_fee::{TransferFee, TransferFeeAmount, TransferFeeConfig},
            transfer_hook::{TransferHook, TransferHookAccount},
            BaseStateWithExtensions, BaseStateWithExtensionsMut, ExtensionType,
            StateWithExtensions, StateWithExtensionsMut,
        },
        state::{Account as TokenAccount, AccountState, Mint},
    },
    spl_token_metadata_interface::state::TokenMetadata,
    spl_transfer_hook_interface::{
        get_extra_account_metas_address, instruction::ExecuteInstruction,
    },
    std::collections::HashMap,
    tokenization_wrap::{
        get_config_address, get_role_address, get_vault_address, get_wrapped_mint_address,
        get_wrapped_token_address, instruction, offchain,
        state::{RoleGrant, RoleKind, WrappedMintConfig},
    },
};

pub const DECIMALS: u8 = 8;
pub const SALT: [u8; 32] = [7; 32];
pub const NAME: &str = "Wrapped Test Token";
pub const SYMBOL: &str = "wTEST";
pub const URI: &str = "https://example.com/wtest.json";
pub const FREEZE_AUTHORITY: Pubkey =
    Pubkey::from_str_const("11111115q4EpJaTXAZWpCg3J2zppWGSZ46KXozzo9");
/// Transfer fee of fee-bearing unwrapped mints, 1%
pub const TRANSFER_FEE_BASIS_POINTS: u16 = 100;

const LAMPORTS: u64 = 100_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenProgram {
    SplToken,
    SplToken2022,
}

impl TokenProgram {
    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::SplToken => spl_token::id(),
            TokenProgram::SplToken2022 => spl_token_2022::id(),
        }
    }
}

pub fn init_mollusk() -> Mollusk {
    let mut mollusk = Mollusk::new(&tokenization_wrap::id(), "tokenization_wrap");
    mollusk_svm_programs_token::token::add_program(&mut mollusk);
    mollusk_svm_programs_token::token2022::add_program(&mut mollusk);
    mollusk_svm_programs_token::associated_token::add_program(&mut mollusk);
    mollusk
}

pub fn system_account(lamports: u64) -> Account {
    Account::new(lamports, 0, &solana_system_interface::program::id())
}

// spl_token and spl_token_2022 share the base layout, only the owner differs
pub fn setup_mint(
    token_program: TokenProgram,
    mint_authority: Pubkey,
    supply: u64,
    decimals: u8,
) -> Account {
    let state = spl_token::state::Mint {
        decimals,
        is_initialized: true,
        supply,
        mint_authority: COption::Some(mint_authority),
        freeze_authority: COption::Some(FREEZE_AUTHORITY),
    };
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    state.pack_into_slice(&mut data);
    Account {
        lamports: LAMPORTS,
        data,
        owner: token_program.id(),
        ..Default::default()
    }
}

/// Token-2022 mint carrying `extensions`. A transfer hook points at the
/// counting test hook program.
pub fn setup_token_2022_mint(
    mint_authority: Pubkey,
    supply: u64,
    decimals: u8,
    extensions: &[ExtensionType],
) -> Account {
    let mint_len = ExtensionType::try_calculate_account_len::<Mint>(extensions).unwrap();
    let mut data = vec![0u8; mint_len];
    let mut state = StateWithExtensionsMut::<Mint>::unpack_uninitialized(&mut data).unwrap();
    for extension in extensions {
        match extension {
            ExtensionType::TransferFeeConfig => {
                let transfer_fee = TransferFee {
                    epoch: 0.into(),
                    maximum_fee: u64::MAX.into(),
                    transfer_fee_basis_points: TRANSFER_FEE_BASIS_POINTS.into(),
                };
                let config = state.init_extension::<TransferFeeConfig>(true).unwrap();
                config.older_transfer_fee = transfer_fee;
                config.newer_transfer_fee = transfer_fee;
            }
            ExtensionType::TransferHook => {
                let hook = state.init_extension::<TransferHook>(true).unwrap();
                hook.program_id = OptionalNonZeroPubkey(test_transfer_hook::id());
            }
            other => panic!("unsupported mint extension {other:?}"),
        }
    }
    state.base = Mint {
        mint_authority: COption::Some(mint_authority),
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::Some(FREEZE_AUTHORITY),
    };
    state.pack_base();
    state.init_account_type().unwrap();
    Account {
        lamports: LAMPORTS,
        data,
        owner: spl_token_2022::id(),
        ..Default::default()
    }
}

/// Token-2022 account carrying the account side of its mint's extensions
pub fn setup_token_2022_account(
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
    extensions: &[ExtensionType],
) -> Account {
    let account_len = ExtensionType::try_calculate_account_len::<TokenAccount>(extensions).unwrap();
    let mut data = vec![0u8; account_len];
    let mut state =
        StateWithExtensionsMut::<TokenAccount>::unpack_uninitialized(&mut data).unwrap();
    for extension in extensions {
        match extension {
            ExtensionType::TransferFeeAmount => {
                state.init_extension::<TransferFeeAmount>(true).unwrap();
            }
            ExtensionType::TransferHookAccount => {
                state.init_extension::<TransferHookAccount>(true).unwrap();
            }
            other => panic!("unsupported account extension {other:?}"),
        }
    }
    state.base = TokenAccount {
        mint,
        owner,
        amount,
        state: AccountState::Initialized,
        ..Default::default()
    };
    state.pack_base();
    state.init_account_type().unwrap();
    Account {
        lamports: LAMPORTS,
        data,
        owner: spl_token_2022::id(),
        ..Default::default()
    }
}

/// Validation account of the test hook, asking for `counter` on every
/// transfer of `mint`
fn setup_validation_state(mint: &Pubkey, counter: &Pubkey) -> (Pubkey, Account) {
    let extra_account_metas = [ExtraAccountMeta::new_with_pubkey(counter, false, true).unwrap()];
    let account_size = ExtraAccountMetaList::size_of(extra_account_metas.len()).unwrap();
    let mut data = vec![0u8; account_size];
    ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, &extra_account_metas).unwrap();
    (
        get_extra_account_metas_address(mint, &test_transfer_hook::id()),
        Account {
            lamports: LAMPORTS,
            data,
            owner: test_transfer_hook::id(),
            ..Default::default()
        },
    )
}

pub fn setup_token_account(
    token_program: TokenProgram,
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
) -> Account {
    let state = spl_token::state::Account {
        mint,
        owner,
        amount,
        delegate: COption::None,
        state: spl_token::state::AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    state.pack_into_slice(&mut data);
    Account {
        lamports: LAMPORTS,
        data,
        owner: token_program.id(),
        ..Default::default()
    }
}

pub fn custom_error(error: tokenization_wrap::error::TokenizationWrapError) -> Check<'static> {
    Check::err(error.into())
}

/// Accounts of one wrapped mint deployment, threaded through successive
/// instructions the way a ledger would keep them.
pub struct TestContext {
    pub mollusk: Mollusk,
    pub accounts: HashMap<Pubkey, Account>,
    pub token_program: TokenProgram,
    pub owner: Pubkey,
    pub unwrapped_mint: Pubkey,
    pub wrapped_mint: Pubkey,
    pub config: Pubkey,
    pub vault: Pubkey,
    /// Extensions every unwrapped token account carries
    pub unwrapped_account_extensions: Vec<ExtensionType>,
    /// Accounts appended to wrap and unwrap for the unwrapped mint's hook
    pub transfer_hook_metas: Vec<AccountMeta>,
}

impl TestContext {
    /// Fresh ledger holding an unwrapped mint with no supply
    pub fn new(token_program: TokenProgram) -> Self {
        Self::with_unwrapped_mint(
            token_program,
            setup_mint(token_program, Pubkey::new_unique(), 0, DECIMALS),
        )
    }

    /// Fresh ledger holding a Token-2022 unwrapped mint with no supply that
    /// carries `mint_extensions`
    pub fn with_unwrapped_mint_extensions(mint_extensions: &[ExtensionType]) -> Self {
        let mut context = Self::with_unwrapped_mint(
            TokenProgram::SplToken2022,
            setup_token_2022_mint(Pubkey::new_unique(), 0, DECIMALS, mint_extensions),
        );
        context.unwrapped_account_extensions =
            ExtensionType::get_required_init_account_extensions(mint_extensions);
        if mint_extensions.contains(&ExtensionType::TransferHook) {
            context.install_transfer_hook();
        }
        context
    }

    fn with_unwrapped_mint(token_program: TokenProgram, unwrapped_mint_account: Account) -> Self {
        let mollusk = init_mollusk();
        let owner = Pubkey::new_unique();
        let unwrapped_mint = Pubkey::new_unique();
        let wrapped_mint = get_wrapped_mint_address(&unwrapped_mint, &SALT);

        let mut accounts = HashMap::new();
        for (key, account) in [
            keyed_account_for_system_program(),
            mollusk_svm_programs_token::token::keyed_account(),
            mollusk_svm_programs_token::token2022::keyed_account(),
            mollusk_svm_programs_token::associated_token::keyed_account(),
        ] {
            accounts.insert(key, account);
        }
        accounts.insert(owner, system_account(LAMPORTS));
        accounts.insert(unwrapped_mint, unwrapped_mint_account);

        Self {
            mollusk,
            accounts,
            token_program,
            owner,
            unwrapped_mint,
            wrapped_mint,
            config: get_config_address(&wrapped_mint),
            vault: get_vault_address(&wrapped_mint, &unwrapped_mint, &token_program.id()),
            unwrapped_account_extensions: vec![],
            transfer_hook_metas: vec![],
        }
    }

    /// Loads the counting hook program with its validation and counter
    /// accounts, in the order a client resolves them
    fn install_transfer_hook(&mut self) {
        let hook_program_id = test_transfer_hook::id();
        self.mollusk
            .add_program(&hook_program_id, "test_transfer_hook", &loader_keys::LOADER_V3);

        let counter = Pubkey::new_unique();
        self.accounts.insert(
            counter,
            Account {
                lamports: LAMPORTS,
                data: vec![0],
                owner: hook_program_id,
                ..Default::default()
            },
        );
        let (validation_state, validation_account) =
            setup_validation_state(&self.unwrapped_mint, &counter);
        self.accounts.insert(validation_state, validation_account);
        self.accounts.insert(
            hook_program_id,
            create_program_account_loader_v3(&hook_program_id),
        );

        self.transfer_hook_metas = vec![
            AccountMeta::new(counter, false),
            AccountMeta::new_readonly(hook_program_id, false),
            AccountMeta::new_readonly(validation_state, false),
        ];
    }

    /// Times the test hook ran
    pub fn transfer_hook_count(&self) -> u8 {
        self.transfer_hook_metas
            .first()
            .and_then(|counter| self.accounts.get(&counter.pubkey))
            .map(|counter| counter.data[0])
            .unwrap_or(0)
    }

    /// Fresh ledger with the wrapped mint already created by `owner`
    pub fn with_wrapped_mint(token_program: TokenProgram) -> Self {
        let mut context = Self::new(token_program);
        context.create_mint(&[Check::success()]);
        context
    }

    /// Runs `instruction` against the ledger, keeping the resulting accounts
    /// only when it succeeds
    pub fn process(&mut self, instruction: &Instruction, checks: &[Check]) -> InstructionResult {
        let mut accounts: Vec<(Pubkey, Account)> = vec![];
        for meta in &instruction.accounts {
            if accounts.iter().all(|(key, _)| *key != meta.pubkey) {
                let account = self.accounts.get(&meta.pubkey).cloned().unwrap_or_default();
                accounts.push((meta.pubkey, account));
            }
        }
        let result = self
            .mollusk
            .process_and_validate_instruction(instruction, &accounts, checks);
        if matches!(result.program_result, ProgramResult::Success) {
            for (key, account) in &result.resulting_accounts {
                self.accounts.insert(*key, account.clone());
            }
        }
        result
    }

    pub fn fund_lamports(&mut self, key: &Pubkey) {
        self.accounts.insert(*key, system_account(LAMPORTS));
    }

    pub fn user_unwrapped_address(&self, user: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(
            user,
            &self.unwrapped_mint,
            &self.token_program.id(),
        )
    }

    pub fn user_wrapped_address(&self, user: &Pubkey) -> Pubkey {
        get_wrapped_token_address(user, &self.wrapped_mint)
    }

    fn add_unwrapped_supply(&mut self, amount: u64) {
        let mint = self.accounts.get_mut(&self.unwrapped_mint).unwrap();
        let mut state = StateWithExtensionsMut::<Mint>::unpack(&mut mint.data).unwrap();
        state.base.supply = state.base.supply.checked_add(amount).unwrap();
        state.pack_base();
    }

    /// Creates a funded user holding `amount` unwrapped tokens
    pub fn new_user(&mut self, amount: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.fund_lamports(&user);
        let token_account = if self.unwrapped_account_extensions.is_empty() {
            setup_token_account(self.token_program, self.unwrapped_mint, user, amount)
        } else {
            setup_token_2022_account(
                self.unwrapped_mint,
                user,
                amount,
                &self.unwrapped_account_extensions,
            )
        };
        self.accounts
            .insert(self.user_unwrapped_address(&user), token_account);
        self.add_unwrapped_supply(amount);
        user
    }

    /// Sends unwrapped tokens straight to the vault, bypassing `Wrap`
    pub fn inflate_vault(&mut self, amount: u64) {
        let vault = self.accounts.get_mut(&self.vault).unwrap();
        let mut state = spl_token::state::Account::unpack_from_slice(&vault.data).unwrap();
        state.amount = state.amount.checked_add(amount).unwrap();
        state.pack_into_slice(&mut vault.data);
        self.add_unwrapped_supply(amount);
    }

    pub fn create_mint(&mut self, checks: &[Check]) -> InstructionResult {
        let instruction = instruction::create_mint(
            &tokenization_wrap::id(),
            &self.owner,
            &self.wrapped_mint,
            &self.config,
            &self.vault,
            &self.unwrapped_mint,
            &self.token_program.id(),
            SALT,
            NAME.to_string(),
            SYMBOL.to_string(),
            URI.to_string(),
        );
        self.process(&instruction, checks)
    }

    pub fn add_role(
        &mut self,
        signer: &Pubkey,
        user: &Pubkey,
        role: RoleKind,
        checks: &[Check],
    ) -> InstructionResult {
        let instruction =
            instruction::add_role(&tokenization_wrap::id(), signer, &self.wrapped_mint, user, role);
        self.process(&instruction, checks)
    }

    pub fn remove_role(
        &mut self,
        signer: &Pubkey,
        user: &Pubkey,
        role: RoleKind,
        checks: &[Check],
    ) -> InstructionResult {
        let instruction = instruction::remove_role(
            &tokenization_wrap::id(),
            signer,
            &self.wrapped_mint,
            user,
            role,
        );
        self.process(&instruction, checks)
    }

    pub fn wrap(&mut self, user: &Pubkey, amount: u64, checks: &[Check]) -> InstructionResult {
        let instruction = offchain::wrap(
            &tokenization_wrap::id(),
            user,
            &self.wrapped_mint,
            &self.unwrapped_mint,
            &self.user_unwrapped_address(user),
            &self.user_wrapped_address(user),
            &self.vault,
            &self.token_program.id(),
            self.transfer_hook_metas.clone(),
            amount,
        );
        self.process(&instruction, checks)
    }

    pub fn unwrap(&mut self, user: &Pubkey, amount: u64, checks: &[Check]) -> InstructionResult {
        let instruction = offchain::unwrap(
            &tokenization_wrap::id(),
            user,
            &self.wrapped_mint,
            &self.unwrapped_mint,
            &self.user_wrapped_address(user),
            &self.user_unwrapped_address(user),
            &self.vault,
            &self.token_program.id(),
            self.transfer_hook_metas.clone(),
            amount,
        );
        self.process(&instruction, checks)
    }

    pub fn close_vault(&mut self, signer: &Pubkey, checks: &[Check]) -> InstructionResult {
        let instruction = instruction::close_vault(
            &tokenization_wrap::id(),
            signer,
            &self.wrapped_mint,
            &self.vault,
            &self.token_program.id(),
        );
        self.process(&instruction, checks)
    }

    pub fn transfer_ownership(
        &mut self,
        signer: &Pubkey,
        new_owner: &Pubkey,
        checks: &[Check],
    ) -> InstructionResult {
        let instruction = instruction::transfer_ownership(
            &tokenization_wrap::id(),
            signer,
            &self.wrapped_mint,
            new_owner,
        );
        self.process(&instruction, checks)
    }

    pub fn accept_ownership(&mut self, signer: &Pubkey, checks: &[Check]) -> InstructionResult {
        let instruction =
            instruction::accept_ownership(&tokenization_wrap::id(), signer, &self.wrapped_mint);
        self.process(&instruction, checks)
    }

    pub fn recover_mint(&mut self, signer: &Pubkey, checks: &[Check]) -> InstructionResult {
        let instruction = instruction::recover_mint(
            &tokenization_wrap::id(),
            signer,
            &self.wrapped_mint,
            &self.vault,
            &get_wrapped_token_address(signer, &self.wrapped_mint),
        );
        self.process(&instruction, checks)
    }

    pub fn account(&self, key: &Pubkey) -> Option<&Account> {
        self.accounts.get(key).filter(|account| account.lamports > 0)
    }

    pub fn config(&self) -> WrappedMintConfig {
        *WrappedMintConfig::unpack(&self.account(&self.config).unwrap().data).unwrap()
    }

    pub fn role_grant(&self, user: &Pubkey, role: RoleKind) -> Option<RoleGrant> {
        self.account(&get_role_address(&self.wrapped_mint, role, user))
            .filter(|account| account.owner == tokenization_wrap::id())
            .map(|account| *RoleGrant::unpack(&account.data).unwrap())
    }

    pub fn token_balance(&self, key: &Pubkey) -> u64 {
        self.account(key)
            .map(|account| {
                StateWithExtensions::<TokenAccount>::unpack(&account.data)
                    .unwrap()
                    .base
                    .amount
            })
            .unwrap_or(0)
    }

    pub fn vault_balance(&self) -> u64 {
        self.token_balance(&self.vault)
    }

    pub fn unwrapped_balance(&self, user: &Pubkey) -> u64 {
        self.token_balance(&self.user_unwrapped_address(user))
    }

    pub fn wrapped_balance(&self, user: &Pubkey) -> u64 {
        self.token_balance(&self.user_wrapped_address(user))
    }

    pub fn wrapped_mint_state(&self) -> Mint {
        StateWithExtensions::<Mint>::unpack(&self.account(&self.wrapped_mint).unwrap().data)
            .unwrap()
            .base
    }

    pub fn wrapped_supply(&self) -> u64 {
        self.wrapped_mint_state().supply
    }

    pub fn wrapped_metadata(&self) -> TokenMetadata {
        StateWithExtensions::<Mint>::unpack(&self.account(&self.wrapped_mint).unwrap().data)
            .unwrap()
            .get_variable_len_extension::<TokenMetadata>()
            .unwrap()
    }

    pub fn assert_conserved(&self) {
        assert_eq!(self.vault_balance(), self.wrapped_supply());
    }

    /// Wrapped mint deployment with `user` granted the `Wrapper` role
    pub fn with_wrapper(token_program: TokenProgram, amount: u64) -> (Self, Pubkey) {
        let mut context = Self::with_wrapped_mint(token_program);
        let user = context.new_user(amount);
        let owner = context.owner;
        context.add_role(&owner, &user, RoleKind::Wrapper, &[Check::success()]);
        (context, user)
    }
}
