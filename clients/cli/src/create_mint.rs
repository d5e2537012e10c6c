use {
    crate::{
        common::{
            get_account_owner, parse_pubkey, parse_salt, parse_token_program, sign_and_process,
            signer_or_fee_payer,
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
        get_config_address_for_program, get_vault_address, get_wrapped_mint_address_for_program,
        instruction::create_mint, metadata::check_metadata_lengths,
    },
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Args)]
pub struct CreateMintArgs {
    /// The address of the mint to wrap
    #[clap(value_parser = parse_pubkey)]
    pub unwrapped_mint: Pubkey,

    /// Metadata name of the wrapped mint
    pub name: String,

    /// Metadata symbol of the wrapped mint
    pub symbol: String,

    /// Metadata uri of the wrapped mint
    #[clap(long, default_value = "")]
    pub uri: String,

    /// Base58 encoded 32 byte salt. Each salt yields a distinct wrapped mint
    /// over the same unwrapped mint.
    #[clap(long, value_parser = parse_salt, default_value = "11111111111111111111111111111111")]
    pub salt: [u8; 32],

    /// Signer source of the owner of the new wrapped mint, who also pays for
    /// its accounts. Defaults to the fee payer.
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub owner: Option<SignerSource>,

    /// The address of the token program that the unwrapped mint belongs to,
    /// queried if not provided
    #[clap(long, value_parser = parse_token_program)]
    pub unwrapped_token_program: Option<Pubkey>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMintOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub unwrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub config_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub vault_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub owner: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for CreateMintOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Unwrapped mint address:", &self.unwrapped_mint_address)?;
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Config address:", &self.config_address)?;
        writeln_pubkey(f, "Vault address:", &self.vault_address)?;
        writeln_pubkey(f, "Owner:", &self.owner)?;
        writeln_name_value(f, "Name:", &self.name)?;
        writeln_name_value(f, "Symbol:", &self.symbol)?;
        writeln_name_value(f, "Uri:", &self.uri)?;
        writeln_signature(f, &self.signature)
    }
}

impl QuietDisplay for CreateMintOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for CreateMintOutput {}

pub async fn command_create_mint(
    config: &Config,
    args: CreateMintArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    check_metadata_lengths(&args.name, &args.symbol, &args.uri)?;

    let owner = signer_or_fee_payer(config, args.owner.as_ref(), "owner", matches, wallet_manager)?;

    let unwrapped_token_program = match args.unwrapped_token_program {
        Some(program_id) => program_id,
        None => get_account_owner(config, &args.unwrapped_mint).await?,
    };
    if unwrapped_token_program != spl_token::id() && unwrapped_token_program != spl_token_2022::id()
    {
        return Err(anyhow!("{} is not owned by a token program", args.unwrapped_mint).into());
    }

    let wrapped_mint_address =
        get_wrapped_mint_address_for_program(&args.unwrapped_mint, &args.salt, &config.program_id);
    let config_address = get_config_address_for_program(&wrapped_mint_address, &config.program_id);
    let vault_address = get_vault_address(
        &wrapped_mint_address,
        &args.unwrapped_mint,
        &unwrapped_token_program,
    );

    println_display(
        config,
        format!("Creating wrapped mint for {}", args.unwrapped_mint),
    );

    let instruction = create_mint(
        &config.program_id,
        &owner.pubkey(),
        &wrapped_mint_address,
        &config_address,
        &vault_address,
        &args.unwrapped_mint,
        &unwrapped_token_program,
        args.salt,
        args.name.clone(),
        args.symbol.clone(),
        args.uri.clone(),
    );

    let signature = sign_and_process(config, &[instruction], &owner).await?;

    Ok(format_output(
        config,
        CreateMintOutput {
            unwrapped_mint_address: args.unwrapped_mint,
            wrapped_mint_address,
            config_address,
            vault_address,
            owner: owner.pubkey(),
            name: args.name,
            symbol: args.symbol,
            uri: args.uri,
            signature,
        },
    ))
}
