use {
    crate::{
        common::parse_pubkey,
        config::Config,
        create_mint::{command_create_mint, CreateMintArgs},
        find_pdas::{command_get_pdas, FindPdasArgs},
        output::parse_output_format,
        ownership::{
            command_accept_ownership, command_transfer_ownership, AcceptOwnershipArgs,
            TransferOwnershipArgs,
        },
        roles::{command_add_role, command_remove_role, RoleArgs},
        show::{command_show_config, command_show_role, ShowConfigArgs, ShowRoleArgs},
        unwrap::{command_unwrap, UnwrapArgs},
        vault::{command_close_vault, command_recover_mint, VaultArgs},
        wrap::{command_wrap, WrapArgs},
        CommandResult,
    },
    clap::{
        builder::{PossibleValuesParser, TypedValueParser},
        ArgMatches, Parser, Subcommand,
    },
    solana_clap_v3_utils::input_parsers::{
        parse_url_or_moniker,
        signer::{SignerSource, SignerSourceParserBuilder},
    },
    solana_cli_output::OutputFormat,
    solana_pubkey::Pubkey,
    solana_remote_wallet::remote_wallet::RemoteWalletManager,
    std::rc::Rc,
};

#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "A command line tool for interacting with the Tokenization Wrap program"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Configuration file to use
    #[clap(global(true), short = 'C', long = "config", id = "PATH")]
    pub config_file: Option<String>,

    /// Simulate transaction instead of executing
    #[clap(global(true), long, alias = "dryrun")]
    pub dry_run: bool,

    /// URL for Solana JSON `RPC` or moniker (or their first letter):
    /// [`mainnet-beta`, `testnet`, `devnet`, `localhost`].
    /// Default from the configuration file.
    #[clap(
        global(true),
        short = 'u',
        long = "url",
        id = "URL_OR_MONIKER",
        value_parser = parse_url_or_moniker,
    )]
    pub json_rpc_url: Option<String>,

    /// Specify the fee-payer account. This may be a keypair file, the ASK
    /// keyword or the pubkey of an offline signer, provided an appropriate
    /// --signer argument is also passed. Defaults to the client keypair.
    #[clap(
        global(true),
        long,
        id = "PAYER_KEYPAIR",
        value_parser = SignerSourceParserBuilder::default().allow_all().build(),
    )]
    pub fee_payer: Option<SignerSource>,

    /// Address of the Tokenization Wrap program, if not the default
    /// deployment
    #[clap(global(true), long, value_parser = parse_pubkey)]
    pub program_id: Option<Pubkey>,

    /// Show additional information
    #[clap(global(true), short, long)]
    pub verbose: bool,

    /// Return information in specified output format
    #[clap(
        global(true),
        long = "output",
        id = "FORMAT",
        conflicts_with = "verbose",
        value_parser = PossibleValuesParser::new([
            "display",
            "json",
            "json-compact",
            "quiet",
            "verbose"
        ]).map(|o| parse_output_format(&o)),
    )]
    pub output_format: Option<OutputFormat>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a wrapped mint, its config and vault for a given SPL Token
    CreateMint(CreateMintArgs),
    /// Find the addresses derived for a wrapped mint
    FindPdas(FindPdasArgs),
    /// Grant a role on a wrapped mint
    AddRole(RoleArgs),
    /// Revoke a role on a wrapped mint
    RemoveRole(RoleArgs),
    /// Deposit SPL tokens into the vault and mint their wrapped version
    Wrap(WrapArgs),
    /// Burn wrapped tokens and release their unwrapped version from the vault
    Unwrap(UnwrapArgs),
    /// Close the empty vault of a wrapped mint, ending wrapping for good
    CloseVault(VaultArgs),
    /// Propose a new owner for a wrapped mint
    TransferOwnership(TransferOwnershipArgs),
    /// Become the owner of a wrapped mint as its pending owner
    AcceptOwnership(AcceptOwnershipArgs),
    /// Mint the vault surplus over the wrapped supply to the owner
    RecoverMint(VaultArgs),
    /// Display the config of a wrapped mint
    ShowConfig(ShowConfigArgs),
    /// Display whether a user holds a role on a wrapped mint
    ShowRole(ShowRoleArgs),
}

impl Command {
    pub async fn execute(
        self,
        config: &Config,
        matches: &ArgMatches,
        wallet_manager: &mut Option<Rc<RemoteWalletManager>>,
    ) -> CommandResult {
        match self {
            Command::CreateMint(args) => {
                command_create_mint(config, args, matches, wallet_manager).await
            }
            Command::FindPdas(args) => command_get_pdas(config, args).await,
            Command::AddRole(args) => command_add_role(config, args, matches, wallet_manager).await,
            Command::RemoveRole(args) => {
                command_remove_role(config, args, matches, wallet_manager).await
            }
            Command::Wrap(args) => command_wrap(config, args, matches, wallet_manager).await,
            Command::Unwrap(args) => command_unwrap(config, args, matches, wallet_manager).await,
            Command::CloseVault(args) => {
                command_close_vault(config, args, matches, wallet_manager).await
            }
            Command::TransferOwnership(args) => {
                command_transfer_ownership(config, args, matches, wallet_manager).await
            }
            Command::AcceptOwnership(args) => {
                command_accept_ownership(config, args, matches, wallet_manager).await
            }
            Command::RecoverMint(args) => {
                command_recover_mint(config, args, matches, wallet_manager).await
            }
            Command::ShowConfig(args) => command_show_config(config, args).await,
            Command::ShowRole(args) => command_show_role(config, args).await,
        }
    }
}
