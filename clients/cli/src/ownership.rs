use {
    crate::{
        common::{get_wrapped_mint_config, parse_pubkey, sign_and_process, signer_or_fee_payer},
        config::Config,
        output::{format_output, println_display, writeln_pubkey, writeln_signature},
        CommandResult,
    },
    anyhow::anyhow,
    clap::{ArgMatches, Args},
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_clap_v3_utils::input_parsers::signer::{SignerSource, SignerSourceParserBuilder},
    solana_cli_output::{QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    solana_signature::Signature,
    solana_signer::Signer,
    tokenization_wrap::instruction::{accept_ownership, transfer_ownership},
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Args)]
pub struct TransferOwnershipArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// Proposed next owner. It takes over once it accepts.
    #[clap(value_parser = parse_pubkey, required_unless_present = "cancel")]
    pub new_owner: Option<Pubkey>,

    /// Withdraw a pending proposal instead
    #[clap(long, conflicts_with = "new_owner")]
    pub cancel: bool,

    /// Signer source of the current owner if different from fee payer
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub owner: Option<SignerSource>,
}

#[derive(Clone, Debug, Args)]
pub struct AcceptOwnershipArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// Signer source of the pending owner if different from fee payer
    #[clap(
        long,
        value_parser = SignerSourceParserBuilder::default().allow_all().build()
    )]
    pub pending_owner: Option<SignerSource>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub owner: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub pending_owner: Option<Pubkey>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for OwnershipOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Owner:", &self.owner)?;
        if let Some(pending_owner) = &self.pending_owner {
            writeln_pubkey(f, "Pending owner:", pending_owner)?;
        }
        writeln_signature(f, &self.signature)
    }
}

impl QuietDisplay for OwnershipOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for OwnershipOutput {}

pub async fn command_transfer_ownership(
    config: &Config,
    args: TransferOwnershipArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let owner = signer_or_fee_payer(config, args.owner.as_ref(), "owner", matches, wallet_manager)?;
    get_wrapped_mint_config(config, &args.wrapped_mint).await?;

    // proposing the default address clears the pending owner
    let pending_owner = if args.cancel { None } else { args.new_owner };
    let proposed = pending_owner.unwrap_or_default();
    match pending_owner {
        Some(new_owner) => println_display(
            config,
            format!("Proposing {new_owner} as owner of {}", args.wrapped_mint),
        ),
        None => println_display(
            config,
            format!("Cancelling ownership transfer of {}", args.wrapped_mint),
        ),
    }

    let instruction = transfer_ownership(
        &config.program_id,
        &owner.pubkey(),
        &args.wrapped_mint,
        &proposed,
    );
    let signature = sign_and_process(config, &[instruction], &owner).await?;

    Ok(format_output(
        config,
        OwnershipOutput {
            wrapped_mint_address: args.wrapped_mint,
            owner: owner.pubkey(),
            pending_owner,
            signature,
        },
    ))
}

pub async fn command_accept_ownership(
    config: &Config,
    args: AcceptOwnershipArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let pending_owner = signer_or_fee_payer(
        config,
        args.pending_owner.as_ref(),
        "pending_owner",
        matches,
        wallet_manager,
    )?;
    let (_, wrapped_mint_config) = get_wrapped_mint_config(config, &args.wrapped_mint).await?;
    if wrapped_mint_config.pending_owner() != Some(pending_owner.pubkey()) {
        return Err(anyhow!(
            "{} is not the pending owner of {}",
            pending_owner.pubkey(),
            args.wrapped_mint
        )
        .into());
    }

    println_display(
        config,
        format!(
            "Accepting ownership of {} as {}",
            args.wrapped_mint,
            pending_owner.pubkey()
        ),
    );

    let instruction = accept_ownership(
        &config.program_id,
        &pending_owner.pubkey(),
        &args.wrapped_mint,
    );
    let signature = sign_and_process(config, &[instruction], &pending_owner).await?;

    Ok(format_output(
        config,
        OwnershipOutput {
            wrapped_mint_address: args.wrapped_mint,
            owner: pending_owner.pubkey(),
            pending_owner: None,
            signature,
        },
    ))
}
