use {
    crate::{config::Config, output::println_display, Error},
    anyhow::anyhow,
    clap::{value_parser, ArgMatches, Args},
    solana_clap_v3_utils::{
        input_parsers::signer::SignerSource,
        keypair::{pubkey_from_path, signer_from_source_with_config, SignerFromPathConfig},
    },
    solana_cli_output::{return_signers_data, CliSignOnlyData, ReturnSignersConfig},
    solana_hash::Hash,
    solana_instruction::{AccountMeta, Instruction},
    solana_presigner::Presigner,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_signature::Signature,
    solana_signer::Signer,
    solana_transaction::Transaction,
    spl_token_2022::{
        extension::PodStateWithExtensions,
        offchain::{add_extra_account_metas, AccountFetchError},
        pod::{PodAccount, PodMint},
    },
    std::{rc::Rc, str::FromStr, sync::Arc},
    tokenization_wrap::{
        get_config_address_for_program,
        state::{RoleKind, WrappedMintConfig},
    },
};

pub fn parse_pubkey(value: &str) -> Result<Pubkey, String> {
    parse_address(value, "pubkey")
}

fn parse_address(path: &str, name: &str) -> Result<Pubkey, String> {
    let mut wallet_manager = None;
    pubkey_from_path(&ArgMatches::default(), path, name, &mut wallet_manager)
        .map_err(|_| format!("Failed to load pubkey {} at {}", name, path))
}

pub fn parse_token_program(value: &str) -> Result<Pubkey, String> {
    let pubkey = parse_pubkey(value)?;
    if pubkey == spl_token::id() || pubkey == spl_token_2022::id() {
        Ok(pubkey)
    } else {
        Err("Invalid token program. Must be spl-token or spl-token-2022".to_string())
    }
}

/// Salts are 32 raw bytes, written in base58 like an address
pub fn parse_salt(value: &str) -> Result<[u8; 32], String> {
    Pubkey::from_str(value)
        .map(|pubkey| pubkey.to_bytes())
        .map_err(|_| format!("Invalid salt {value}. Must be 32 bytes encoded in base58"))
}

pub fn parse_role(value: &str) -> Result<RoleKind, String> {
    match value {
        "default" => Ok(RoleKind::Default),
        "wrapper" => Ok(RoleKind::Wrapper),
        _ => Err(format!("Invalid role {value}. Must be `default` or `wrapper`")),
    }
}

pub fn role_name(role: RoleKind) -> &'static str {
    match role {
        RoleKind::Default => "default",
        RoleKind::Wrapper => "wrapper",
    }
}

pub fn parse_presigner(value: &str) -> Result<Presigner, String> {
    let (pubkey_string, sig_string) = value
        .split_once('=')
        .ok_or("failed to split `pubkey=signature` pair")?;
    let pubkey = Pubkey::from_str(pubkey_string)
        .map_err(|_| "Failed to parse pubkey from string".to_string())?;
    let sig = Signature::from_str(sig_string)
        .map_err(|_| "Failed to parse signature from string".to_string())?;
    Ok(Presigner::new(&pubkey, &sig))
}

/// Arguments for building a transaction offline and collecting its
/// signatures separately
#[derive(Clone, Debug, Args)]
pub struct OfflineArgs {
    #[clap(long, value_parser = value_parser!(Hash))]
    pub blockhash: Option<Hash>,

    /// Signatures to add to transaction.
    /// Often the `PUBKEY=SIGNATURE` output from a --sign-only signer.
    #[clap(
        long,
        multiple = true,
        value_parser = parse_presigner,
        requires = "blockhash"
    )]
    pub signer: Option<Vec<Presigner>>,

    /// Do not broadcast signed transaction, just sign
    #[clap(long)]
    pub sign_only: bool,
}

/// Resolves an authority argument, falling back to the fee payer
pub fn signer_or_fee_payer(
    config: &Config,
    source: Option<&SignerSource>,
    name: &str,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> Result<Arc<dyn Signer>, Error> {
    match source {
        Some(source) => {
            // NullSigner allowed so the authority can sign offline
            let signer = signer_from_source_with_config(
                matches,
                source,
                name,
                wallet_manager,
                &SignerFromPathConfig {
                    allow_null_signer: true,
                },
            )
            .map_err(|e| e.to_string())?;
            Ok(Arc::from(signer))
        }
        None => config.fee_payer(),
    }
}

pub async fn get_account_owner(config: &Config, address: &Pubkey) -> Result<Pubkey, Error> {
    Ok(config.rpc_client.get_account(address).await?.owner)
}

/// Fetches and decodes the config governing `wrapped_mint`
pub async fn get_wrapped_mint_config(
    config: &Config,
    wrapped_mint: &Pubkey,
) -> Result<(Pubkey, WrappedMintConfig), Error> {
    let address = get_config_address_for_program(wrapped_mint, &config.program_id);
    let account = config
        .rpc_client
        .get_account(&address)
        .await
        .map_err(|_| anyhow!("No config at {address}, {wrapped_mint} is not a wrapped mint"))?;
    if account.owner != config.program_id {
        return Err(anyhow!("Config {address} is not owned by {}", config.program_id).into());
    }
    let state = *WrappedMintConfig::unpack(&account.data)?;
    Ok((address, state))
}

pub async fn get_token_balance(config: &Config, address: &Pubkey) -> Result<u64, Error> {
    let account = config.rpc_client.get_account(address).await?;
    let state = PodStateWithExtensions::<PodAccount>::unpack(&account.data)?;
    Ok(state.base.amount.into())
}

pub async fn get_mint_supply_and_decimals(
    config: &Config,
    mint: &Pubkey,
) -> Result<(u64, u8), Error> {
    let account = config.rpc_client.get_account(mint).await?;
    let state = PodStateWithExtensions::<PodMint>::unpack(&account.data)?;
    Ok((state.base.supply.into(), state.base.decimals))
}

/// Resolves the accounts a transfer hook on the unwrapped mint needs for a
/// transfer between `source` and `destination`. Empty for mints without a
/// hook.
pub async fn get_transfer_hook_metas(
    config: &Config,
    unwrapped_token_program: &Pubkey,
    source: &Pubkey,
    unwrapped_mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Result<Vec<AccountMeta>, Error> {
    if *unwrapped_token_program != spl_token_2022::id() {
        return Ok(vec![]);
    }

    let (_, decimals) = get_mint_supply_and_decimals(config, unwrapped_mint).await?;

    let mut instruction = spl_token_2022::instruction::transfer_checked(
        unwrapped_token_program,
        source,
        unwrapped_mint,
        destination,
        authority,
        &[],
        amount,
        decimals,
    )?;
    let base_accounts = instruction.accounts.len();

    let rpc_client = config.rpc_client.clone();
    add_extra_account_metas(
        &mut instruction,
        source,
        unwrapped_mint,
        destination,
        authority,
        amount,
        |address| {
            let rpc_client = rpc_client.clone();
            async move {
                rpc_client
                    .get_account_with_commitment(&address, rpc_client.commitment())
                    .await
                    .map(|response| response.value.map(|account| account.data))
                    .map_err(|error| -> AccountFetchError { Box::new(error) })
            }
        },
    )
    .await?;

    Ok(instruction.accounts.split_off(base_accounts))
}

/// Signs with the fee payer and `authority`, then sends or simulates
pub async fn sign_and_process(
    config: &Config,
    instructions: &[Instruction],
    authority: &Arc<dyn Signer>,
) -> Result<Option<Signature>, Error> {
    let payer = config.fee_payer()?;

    let mut signers = vec![payer.clone()];
    if authority.pubkey() != payer.pubkey() {
        signers.push(authority.clone());
    }

    let blockhash = config.rpc_client.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    transaction.try_sign(&signers, blockhash)?;

    process_transaction(config, transaction).await
}

/// Like `sign_and_process`, but honors `OfflineArgs`: a supplied blockhash,
/// pre-made signatures, and returning the partially signed transaction
/// instead of sending it.
pub async fn sign_and_process_offline(
    config: &Config,
    instructions: &[Instruction],
    authority: &Arc<dyn Signer>,
    offline: &OfflineArgs,
) -> Result<(Vec<Signature>, Option<CliSignOnlyData>), Error> {
    let payer = config.fee_payer()?;

    let blockhash = match offline.blockhash {
        Some(hash) => hash,
        None => config.rpc_client.get_latest_blockhash().await?,
    };

    let mut signers = vec![payer.clone()];
    if authority.pubkey() != payer.pubkey() {
        signers.push(authority.clone());
    }

    // Pre-signed transactions can be passed as --signer `PUBKEY=SIGNATURE`
    if let Some(pre_signers) = &offline.signer {
        for signer in pre_signers {
            signers.push(Arc::new(signer.clone()));
        }
    }

    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    transaction.try_partial_sign(&signers, blockhash)?;

    if offline.sign_only {
        let sign_only_data = return_signers_data(
            &transaction,
            &ReturnSignersConfig {
                dump_transaction_message: true,
            },
        );
        return Ok((transaction.signatures, Some(sign_only_data)));
    }

    process_transaction(config, transaction.clone()).await?;
    Ok((transaction.signatures, None))
}

pub async fn process_transaction(
    config: &Config,
    transaction: Transaction,
) -> Result<Option<Signature>, Error> {
    if config.dry_run {
        let simulation_data = config.rpc_client.simulate_transaction(&transaction).await?;

        if config.verbose() {
            if let Some(logs) = simulation_data.value.logs {
                for log in logs {
                    println!("    {}", log);
                }
            }

            println!(
                "\nSimulation succeeded, consumed {} compute units",
                simulation_data.value.units_consumed.unwrap_or_default()
            );
        } else {
            println_display(config, "Simulation succeeded".to_string());
        }

        Ok(None)
    } else {
        Ok(Some(
            config
                .rpc_client
                .send_and_confirm_transaction_with_spinner(&transaction)
                .await?,
        ))
    }
}
