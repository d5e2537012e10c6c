use {
    crate::{
        common::{
            get_wrapped_mint_config, parse_pubkey, parse_role, role_name, sign_and_process,
            signer_or_fee_payer,
        },
        config::Config,
        output::{format_output, println_display, writeln_pubkey, writeln_signature},
        CommandResult,
    },
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
        get_role_address_for_program,
        instruction::{add_role, remove_role},
        state::RoleKind,
    },
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Clone, Debug, Args)]
pub struct RoleArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// The user receiving or losing the role
    #[clap(value_parser = parse_pubkey)]
    pub user: Pubkey,

    /// Role to grant or revoke: `wrapper` or `default`
    #[clap(long, value_parser = parse_role, default_value = "wrapper")]
    pub role: RoleKind,

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
pub struct RoleOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub user: Pubkey,
    pub role: String,
    #[serde_as(as = "DisplayFromStr")]
    pub role_address: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub signature: Option<Signature>,
}

impl Display for RoleOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "User:", &self.user)?;
        writeln_name_value(f, "Role:", &self.role)?;
        writeln_pubkey(f, "Role address:", &self.role_address)?;
        writeln_signature(f, &self.signature)
    }
}

impl QuietDisplay for RoleOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for RoleOutput {}

async fn command_role(
    config: &Config,
    args: RoleArgs,
    grant: bool,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    let owner = signer_or_fee_payer(config, args.owner.as_ref(), "owner", matches, wallet_manager)?;

    // fail early on an unknown wrapped mint
    get_wrapped_mint_config(config, &args.wrapped_mint).await?;

    let role_address = get_role_address_for_program(
        &args.wrapped_mint,
        args.role,
        &args.user,
        &config.program_id,
    );

    let instruction = if grant {
        println_display(
            config,
            format!(
                "Granting {} role on {} to {}",
                role_name(args.role),
                args.wrapped_mint,
                args.user
            ),
        );
        add_role(
            &config.program_id,
            &owner.pubkey(),
            &args.wrapped_mint,
            &args.user,
            args.role,
        )
    } else {
        println_display(
            config,
            format!(
                "Revoking {} role on {} from {}",
                role_name(args.role),
                args.wrapped_mint,
                args.user
            ),
        );
        remove_role(
            &config.program_id,
            &owner.pubkey(),
            &args.wrapped_mint,
            &args.user,
            args.role,
        )
    };

    let signature = sign_and_process(config, &[instruction], &owner).await?;

    Ok(format_output(
        config,
        RoleOutput {
            wrapped_mint_address: args.wrapped_mint,
            user: args.user,
            role: role_name(args.role).to_string(),
            role_address,
            signature,
        },
    ))
}

pub async fn command_add_role(
    config: &Config,
    args: RoleArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    command_role(config, args, true, matches, wallet_manager).await
}

pub async fn command_remove_role(
    config: &Config,
    args: RoleArgs,
    matches: &ArgMatches,
    wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
) -> CommandResult {
    command_role(config, args, false, matches, wallet_manager).await
}
