use {
    crate::{
        common::{
            get_mint_supply_and_decimals, get_token_balance, get_wrapped_mint_config, parse_pubkey,
            sign_and_process, signer_or_fee_payer,
        },
        config::Config,
        output::{format_output, println_display, writeln_pubkey, writeln_signature},
        CommandResult,
    },
    anyhow::anyhow,
    clap::{ArgMatches, Args},
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_clap_v3_utils::input_parsers::signer::{SignerSource, SignerSourceParserBuilder},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_signature::Signature,
    solana_signer::Signer,
    tokenization_wrap::{
        get_wrapped_token_address,
        instruction::{close_vault, recover_mint},
    },
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Args)]
pub struct VaultArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// Signer source of the wrapped mint owner if different from fee payer
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub owner: Option<SignerSource>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseVaultOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub vault_address: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for CloseVaultOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Closed vault:", &self.vault_address)?;
        writeln_signature(f, &self.signature)
    }
}

impl QuietDisplay for CloseVaultOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for CloseVaultOutput {}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverMintOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub recipient_token_account: Pubkey,
    pub vault_balance: u64,
    pub wrapped_supply: u64,
    pub recovered_amount: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for RecoverMintOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(
            f,
            "Recipient wrapped token account:",
            &self.recipient_token_account,
        )?;
        writeln_name_value(f, "Vault balance:", &self.vault_balance.to_string())?;
        writeln_name_value(f, "Wrapped supply:", &self.wrapped_supply.to_string())?;
        writeln_name_value(f, "Recovered amount:", &self.recovered_amount.to_string())?;
        writeln_signature(f, &self.signature)
    }
}

impl QuietDisplay for RecoverMintOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for RecoverMintOutput {}

pub async fn command_close_vault(
    config: &Config,
    args: VaultArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let owner = signer_or_fee_payer(config, args.owner.as_ref(), "owner", matches, wallet_manager)?;
    let (_, wrapped_mint_config) = get_wrapped_mint_config(config, &args.wrapped_mint).await?;
    if wrapped_mint_config.is_vault_closed() {
        return Err(anyhow!("Vault of {} is already closed", args.wrapped_mint).into());
    }

    let vault_address = wrapped_mint_config.unwrapped_mint_vault;
    println_display(config, format!("Closing vault {vault_address}"));

    let instruction = close_vault(
        &config.program_id,
        &owner.pubkey(),
        &args.wrapped_mint,
        &vault_address,
        &wrapped_mint_config.unwrapped_token_program,
    );
    let signature = sign_and_process(config, &[instruction], &owner).await?;

    Ok(format_output(
        config,
        CloseVaultOutput {
            wrapped_mint_address: args.wrapped_mint,
            vault_address,
            signature,
        },
    ))
}

pub async fn command_recover_mint(
    config: &Config,
    args: VaultArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let owner = signer_or_fee_payer(config, args.owner.as_ref(), "owner", matches, wallet_manager)?;
    let (_, wrapped_mint_config) = get_wrapped_mint_config(config, &args.wrapped_mint).await?;
    if wrapped_mint_config.is_vault_closed() {
        return Err(anyhow!("Vault of {} is closed", args.wrapped_mint).into());
    }

    let vault_address = wrapped_mint_config.unwrapped_mint_vault;
    let vault_balance = get_token_balance(config, &vault_address).await?;
    let (wrapped_supply, _) = get_mint_supply_and_decimals(config, &args.wrapped_mint).await?;
    let recovered_amount = vault_balance.saturating_sub(wrapped_supply);

    let recipient_token_account = get_wrapped_token_address(&owner.pubkey(), &args.wrapped_mint);

    let signature = if recovered_amount == 0 {
        println_display(config, "Nothing to recover".to_string());
        None
    } else {
        println_display(
            config,
            format!("Recovering {recovered_amount} tokens into {recipient_token_account}"),
        );
        let instruction = recover_mint(
            &config.program_id,
            &owner.pubkey(),
            &args.wrapped_mint,
            &vault_address,
            &recipient_token_account,
        );
        sign_and_process(config, &[instruction], &owner).await?
    };

    Ok(format_output(
        config,
        RecoverMintOutput {
            wrapped_mint_address: args.wrapped_mint,
            recipient_token_account,
            vault_balance,
            wrapped_supply,
            recovered_amount,
            signature,
        },
    ))
}
