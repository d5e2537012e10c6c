#![allow(dead_code)]

use {
    solana_cli_config::Config as SolanaConfig,
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_instruction::Instruction,
    solana_keypair::{write_keypair_file, Keypair},
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_sdk_ids::bpf_loader_upgradeable,
    solana_signer::Signer,
    solana_test_validator::{TestValidator, TestValidatorGenesis, UpgradeableProgramInfo},
    solana_transaction::Transaction,
    spl_associated_token_account_client::{
        address::get_associated_token_address_with_program_id,
        instruction::create_associated_token_account_idempotent,
    },
    spl_token::state::Mint as SplTokenMint,
    spl_token_2022::{extension::PodStateWithExtensions, pod::PodAccount},
    std::{path::PathBuf, process::Command, sync::Arc},
    tempfile::NamedTempFile,
};

pub const TOKENIZATION_WRAP_CLI_BIN: &str = env!("CARGO_BIN_EXE_tokenization-wrap");
pub const DECIMALS: u8 = 8;

pub struct TestEnv {
    pub rpc_client: Arc<RpcClient>,
    pub payer: Keypair,
    pub config_file_path: String,
    // Persist these to keep them in scope
    _validator: TestValidator,
    _keypair_file: NamedTempFile,
    _config_file: NamedTempFile,
}

pub async fn start_validator() -> (TestValidator, Keypair) {
    solana_logger::setup();
    let mut test_validator_genesis = TestValidatorGenesis::default();

    test_validator_genesis.add_upgradeable_programs_with_path(&[UpgradeableProgramInfo {
        program_id: tokenization_wrap::id(),
        loader: bpf_loader_upgradeable::id(),
        program_path: PathBuf::from("../../target/deploy/tokenization_wrap.so"),
        upgrade_authority: Pubkey::default(),
    }]);

    test_validator_genesis.start_async().await
}

pub async fn setup_test_env() -> TestEnv {
    let (validator, payer) = start_validator().await;
    let rpc_client = Arc::new(validator.get_async_rpc_client());

    // Write payer keypair to a temporary file
    let keypair_file = NamedTempFile::new().unwrap();
    write_keypair_file(&payer, &keypair_file).unwrap();
    let keypair_file_path = keypair_file.path().to_str().unwrap().to_string();

    // Create and save CLI configuration file
    let config_file = NamedTempFile::new().unwrap();
    let config_file_path = config_file.path().to_str().unwrap().to_string();
    let solana_config = SolanaConfig {
        json_rpc_url: validator.rpc_url(),
        websocket_url: validator.rpc_pubsub_url(),
        keypair_path: keypair_file_path,
        ..SolanaConfig::default()
    };
    solana_config.save(&config_file_path).unwrap();

    TestEnv {
        payer,
        rpc_client,
        config_file_path,
        _keypair_file: keypair_file,
        _config_file: config_file,
        _validator: validator,
    }
}

/// Runs the CLI against the test validator, asserting success, and returns
/// its JSON output
pub fn run_cli(env: &TestEnv, args: &[&str]) -> serde_json::Value {
    let output = Command::new(TOKENIZATION_WRAP_CLI_BIN)
        .args(args)
        .args(["-C", &env.config_file_path, "--output", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Runs the CLI against the test validator and returns whether it succeeded
pub fn cli_succeeds(env: &TestEnv, args: &[&str]) -> bool {
    Command::new(TOKENIZATION_WRAP_CLI_BIN)
        .args(args)
        .args(["-C", &env.config_file_path, "--output", "json"])
        .output()
        .unwrap()
        .status
        .success()
}

pub fn json_pubkey(value: &serde_json::Value, field: &str) -> Pubkey {
    value[field].as_str().unwrap().parse().unwrap()
}

pub async fn send(env: &TestEnv, instructions: &[Instruction], signers: &[&Keypair]) {
    let mut all_signers = vec![&env.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&env.payer.pubkey()),
        &all_signers,
        env.rpc_client.get_latest_blockhash().await.unwrap(),
    );
    env.rpc_client
        .send_and_confirm_transaction(&transaction)
        .await
        .unwrap();
}

pub async fn create_unwrapped_mint(env: &TestEnv, token_program: &Pubkey) -> Pubkey {
    let mint_account = Keypair::new();
    let rent = env
        .rpc_client
        .get_minimum_balance_for_rent_exemption(SplTokenMint::LEN)
        .await
        .unwrap();

    send(
        env,
        &[
            solana_system_interface::instruction::create_account(
                &env.payer.pubkey(),
                &mint_account.pubkey(),
                rent,
                SplTokenMint::LEN as u64,
                token_program,
            ),
            spl_token_2022::instruction::initialize_mint(
                token_program,
                &mint_account.pubkey(),
                &env.payer.pubkey(),
                None,
                DECIMALS,
            )
            .unwrap(),
        ],
        &[&mint_account],
    )
    .await;

    mint_account.pubkey()
}

/// Creates the payer's associated token account for `mint` and mints
/// `amount` into it
pub async fn fund_payer(
    env: &TestEnv,
    token_program: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Pubkey {
    let ata =
        get_associated_token_address_with_program_id(&env.payer.pubkey(), mint, token_program);

    send(
        env,
        &[
            create_associated_token_account_idempotent(
                &env.payer.pubkey(),
                &env.payer.pubkey(),
                mint,
                token_program,
            ),
            spl_token_2022::instruction::mint_to(
                token_program,
                mint,
                &ata,
                &env.payer.pubkey(),
                &[],
                amount,
            )
            .unwrap(),
        ],
        &[],
    )
    .await;

    ata
}

pub async fn token_balance(env: &TestEnv, address: &Pubkey) -> u64 {
    let data = env.rpc_client.get_account_data(address).await.unwrap();
    let state = PodStateWithExtensions::<PodAccount>::unpack(&data).unwrap();
    state.base.amount.into()
}

/// Creates a wrapped mint owned by the payer over a fresh unwrapped mint
/// and returns `(unwrapped_mint, create-mint output)`
pub async fn create_wrapped_mint(
    env: &TestEnv,
    token_program: &Pubkey,
) -> (Pubkey, serde_json::Value) {
    let unwrapped_mint = create_unwrapped_mint(env, token_program).await;
    let output = run_cli(
        env,
        &[
            "create-mint",
            &unwrapped_mint.to_string(),
            "Wrapped Token",
            "WTKN",
            "--uri",
            "https://example.com/wtkn.json",
        ],
    );
    (unwrapped_mint, output)
}
