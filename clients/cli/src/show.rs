use {
    crate::{
        common::{get_wrapped_mint_config, parse_pubkey, parse_role, role_name},
        config::Config,
        output::{format_output, writeln_pubkey},
        CommandResult,
    },
    clap::Args,
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_cli_output::{display::writeln_name_value, QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    tokenization_wrap::{
        get_role_address_for_program,
        state::{RoleGrant, RoleKind},
    },
    std::fmt::{Display, Formatter},
};

#[derive(Clone, Debug, Args)]
pub struct ShowConfigArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,
}

#[derive(Clone, Debug, Args)]
pub struct ShowRoleArgs {
    /// The address of the wrapped mint
    #[clap(value_parser = parse_pubkey)]
    pub wrapped_mint: Pubkey,

    /// The user to look up
    #[clap(value_parser = parse_pubkey)]
    pub user: Pubkey,

    /// Role to look up: `wrapper` or `default`
    #[clap(long, value_parser = parse_role, default_value = "wrapper")]
    pub role: RoleKind,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub config_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub owner: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub pending_owner: Option<Pubkey>,
    #[serde_as(as = "DisplayFromStr")]
    pub unwrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub vault_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub unwrapped_token_program: Pubkey,
    /// Base58, as accepted by `--salt`
    pub salt: String,
    pub vault_closed: bool,
}

impl Display for ConfigOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Config address:", &self.config_address)?;
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Owner:", &self.owner)?;
        match &self.pending_owner {
            Some(pending_owner) => writeln_pubkey(f, "Pending owner:", pending_owner)?,
            None => writeln_name_value(f, "Pending owner:", "none")?,
        }
        writeln_pubkey(f, "Unwrapped mint address:", &self.unwrapped_mint_address)?;
        writeln_pubkey(f, "Vault address:", &self.vault_address)?;
        writeln_pubkey(f, "Unwrapped token program:", &self.unwrapped_token_program)?;
        writeln_name_value(f, "Salt:", &self.salt)?;
        writeln_name_value(f, "Vault closed:", &self.vault_closed.to_string())
    }
}

impl QuietDisplay for ConfigOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for ConfigOutput {}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGrantOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub role_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub user: Pubkey,
    pub role: String,
    pub granted: bool,
}

impl Display for RoleGrantOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Role address:", &self.role_address)?;
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "User:", &self.user)?;
        writeln_name_value(f, "Role:", &self.role)?;
        writeln_name_value(f, "Granted:", &self.granted.to_string())
    }
}

impl QuietDisplay for RoleGrantOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for RoleGrantOutput {}

pub async fn command_show_config(config: &Config, args: ShowConfigArgs) -> CommandResult {
    let (config_address, wrapped_mint_config) =
        get_wrapped_mint_config(config, &args.wrapped_mint).await?;

    Ok(format_output(
        config,
        ConfigOutput {
            config_address,
            wrapped_mint_address: wrapped_mint_config.wrapped_mint,
            owner: wrapped_mint_config.owner,
            pending_owner: wrapped_mint_config.pending_owner(),
            unwrapped_mint_address: wrapped_mint_config.unwrapped_mint,
            vault_address: wrapped_mint_config.unwrapped_mint_vault,
            unwrapped_token_program: wrapped_mint_config.unwrapped_token_program,
            salt: Pubkey::new_from_array(wrapped_mint_config.salt).to_string(),
            vault_closed: wrapped_mint_config.is_vault_closed(),
        },
    ))
}

pub async fn command_show_role(config: &Config, args: ShowRoleArgs) -> CommandResult {
    let role_address = get_role_address_for_program(
        &args.wrapped_mint,
        args.role,
        &args.user,
        &config.program_id,
    );

    // an empty or missing account means no grant
    let account = config
        .rpc_client
        .get_account_with_commitment(&role_address, config.rpc_client.commitment())
        .await?
        .value;
    let granted = match account {
        Some(account) if account.owner == config.program_id => RoleGrant::unpack(&account.data)
            .map(|grant| grant.grants(&args.wrapped_mint, args.role, &args.user))
            .unwrap_or(false),
        _ => false,
    };

    Ok(format_output(
        config,
        RoleGrantOutput {
            role_address,
            wrapped_mint_address: args.wrapped_mint,
            user: args.user,
            role: role_name(args.role).to_string(),
            granted,
        },
    ))
}
