use {
    crate::{
        common::{
            get_transfer_hook_metas, get_wrapped_mint_config, parse_pubkey,
            sign_and_process_offline, signer_or_fee_payer, OfflineArgs,
        },
        config::Config,
        output::{format_output, println_display, writeln_pubkey},
        CommandResult,
    },
    clap::{ArgMatches, Args},
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_clap_v3_utils::input_parsers::signer::{SignerSource, SignerSourceParserBuilder},
    solana_cli_output::{
        display::writeln_name_value, CliSignOnlyData, QuietDisplay, VerboseDisplay,
    },
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_signature::Signature,
    solana_signer::Signer,
    spl_associated_token_account_client::address::get_associated_token_address_with_program_id,
    tokenization_wrap::{get_wrapped_token_address, offchain::unwrap},
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Args)]
pub struct UnwrapArgs {
    /// The address of the wrapped mint to unwrap from
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// The amount of tokens to unwrap
    #[clap(value_parser)]
    pub amount: u64,

    /// Signer source of the wrapper if different from fee payer. Must hold
    /// the wrapper role; wrapped tokens are burned from its associated
    /// token account.
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub user: Option<SignerSource>,

    /// The address of the token account to receive the unwrapped tokens.
    /// If not provided, defaults to the user's associated token account.
    #[clap(long, value_parser = parse_pubkey)]
    pub recipient_token_account: Option<Pubkey>,

    #[clap(flatten)]
    pub offline: OfflineArgs,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwrapOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub unwrapped_mint_address: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_token_account: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    pub recipient_token_account: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    pub vault_address: Pubkey,

    pub amount: u64,

    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub signatures: Vec<Signature>,

    pub sign_only_data: Option<CliSignOnlyData>,
}

impl Display for UnwrapOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Unwrapped mint address:", &self.unwrapped_mint_address)?;
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Wrapped token account:", &self.wrapped_token_account)?;
        writeln_pubkey(
            f,
            "Recipient unwrapped token account:",
            &self.recipient_token_account,
        )?;
        writeln_pubkey(f, "Vault address:", &self.vault_address)?;
        writeln_name_value(f, "Amount:", &self.amount.to_string())?;

        if let Some(data) = &self.sign_only_data {
            writeln!(f, "{}", data)?;
        } else {
            writeln!(f, "Signers:")?;
            for signature in &self.signatures {
                writeln!(f, "  {signature}")?;
            }
        }

        Ok(())
    }
}

impl QuietDisplay for UnwrapOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for UnwrapOutput {}

pub async fn command_unwrap(
    config: &Config,
    args: UnwrapArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let user = signer_or_fee_payer(config, args.user.as_ref(), "user", matches, wallet_manager)?;
    let (_, wrapped_mint_config) = get_wrapped_mint_config(config, &args.wrapped_mint).await?;

    let unwrapped_mint = wrapped_mint_config.unwrapped_mint;
    let unwrapped_token_program = wrapped_mint_config.unwrapped_token_program;
    let vault_address = wrapped_mint_config.unwrapped_mint_vault;

    if !args.offline.sign_only {
        println_display(
            config,
            format!(
                "Unwrapping {} tokens to mint {}",
                args.amount, unwrapped_mint
            ),
        );
    }

    let wrapped_token_account = get_wrapped_token_address(&user.pubkey(), &args.wrapped_mint);
    let recipient_token_account = args.recipient_token_account.unwrap_or_else(|| {
        get_associated_token_address_with_program_id(
            &user.pubkey(),
            &unwrapped_mint,
            &unwrapped_token_program,
        )
    });

    // the vault releases under the wrapped mint's authority
    let transfer_hook_metas = get_transfer_hook_metas(
        config,
        &unwrapped_token_program,
        &vault_address,
        &unwrapped_mint,
        &recipient_token_account,
        &args.wrapped_mint,
        args.amount,
    )
    .await?;

    let instruction = unwrap(
        &config.program_id,
        &user.pubkey(),
        &args.wrapped_mint,
        &unwrapped_mint,
        &wrapped_token_account,
        &recipient_token_account,
        &vault_address,
        &unwrapped_token_program,
        transfer_hook_metas,
        args.amount,
    );

    let (signatures, sign_only_data) =
        sign_and_process_offline(config, &[instruction], &user, &args.offline).await?;

    Ok(format_output(
        config,
        UnwrapOutput {
            unwrapped_mint_address: unwrapped_mint,
            wrapped_mint_address: args.wrapped_mint,
            wrapped_token_account,
            recipient_token_account,
            vault_address,
            amount: args.amount,
            signatures,
            sign_only_data,
        },
    ))
}
