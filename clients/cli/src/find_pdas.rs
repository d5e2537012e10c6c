use {
    crate::{
        common::{parse_pubkey, parse_salt, parse_token_program},
        config::Config,
        output::{format_output, writeln_pubkey},
        CommandResult,
    },
    clap::Args,
    serde_derive::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    solana_cli_output::{QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    tokenization_wrap::{
        get_config_address_for_program, get_role_address_for_program, get_vault_address,
        get_wrapped_mint_address_for_program, get_wrapped_token_address, state::RoleKind,
    },
    std::fmt::{Display, Formatter},
};

#[derive(Clone, Debug, Args)]
pub struct FindPdasArgs {
    /// The address of the mint to wrap
    #[clap(value_parser = parse_pubkey)]
    pub unwrapped_mint: Pubkey,

    /// The address of the token program that the unwrapped mint belongs to
    #[clap(value_parser = parse_token_program)]
    pub unwrapped_token_program: Pubkey,

    /// Base58 encoded 32 byte salt of the wrapped mint
    #[clap(long, value_parser = parse_salt, default_value = "11111111111111111111111111111111")]
    pub salt: [u8; 32],

    /// Also derive the wrapper role grant and wrapped token account of this
    /// user
    #[clap(long, value_parser = parse_pubkey)]
    pub user: Option<Pubkey>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdasOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub wrapped_mint_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub config_address: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub vault_address: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper_role_address: Option<Pubkey>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped_token_address: Option<Pubkey>,
}

impl Display for PdasOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_pubkey(f, "Wrapped mint address:", &self.wrapped_mint_address)?;
        writeln_pubkey(f, "Config address:", &self.config_address)?;
        writeln_pubkey(f, "Vault address:", &self.vault_address)?;
        if let Some(address) = &self.wrapper_role_address {
            writeln_pubkey(f, "Wrapper role address:", address)?;
        }
        if let Some(address) = &self.wrapped_token_address {
            writeln_pubkey(f, "Wrapped token address:", address)?;
        }

        Ok(())
    }
}

impl QuietDisplay for PdasOutput {
    fn write_str(&self, _: &mut dyn std::fmt::Write) -> std::fmt::Result {
        Ok(())
    }
}
impl VerboseDisplay for PdasOutput {}

pub async fn command_get_pdas(config: &Config, args: FindPdasArgs) -> CommandResult {
    let wrapped_mint_address =
        get_wrapped_mint_address_for_program(&args.unwrapped_mint, &args.salt, &config.program_id);
    let config_address = get_config_address_for_program(&wrapped_mint_address, &config.program_id);
    let vault_address = get_vault_address(
        &wrapped_mint_address,
        &args.unwrapped_mint,
        &args.unwrapped_token_program,
    );

    let wrapper_role_address = args.user.map(|user| {
        get_role_address_for_program(
            &wrapped_mint_address,
            RoleKind::Wrapper,
            &user,
            &config.program_id,
        )
    });
    let wrapped_token_address = args
        .user
        .map(|user| get_wrapped_token_address(&user, &wrapped_mint_address));

    Ok(format_output(
        config,
        PdasOutput {
            wrapped_mint_address,
            config_address,
            vault_address,
            wrapper_role_address,
            wrapped_token_address,
        },
    ))
}
