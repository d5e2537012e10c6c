use {
    crate::config::Config,
    serde::Serialize,
    solana_cli_output::{display::writeln_name_value, OutputFormat, QuietDisplay, VerboseDisplay},
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    std::fmt::{Display, Formatter},
};

pub fn parse_output_format(output_format: &str) -> OutputFormat {
    match output_format {
        "display" => OutputFormat::Display,
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "quiet" => OutputFormat::DisplayQuiet,
        "verbose" => OutputFormat::DisplayVerbose,
        _ => unreachable!(),
    }
}

pub fn println_display(config: &Config, message: String) {
    match config.output_format {
        OutputFormat::Display | OutputFormat::DisplayVerbose => {
            println!("{}", message);
        }
        _ => {}
    }
}

pub fn format_output<T>(config: &Config, command_output: T) -> String
where
    T: Serialize + Display + QuietDisplay + VerboseDisplay,
{
    config.output_format.formatted_string(&command_output)
}

pub fn writeln_pubkey(f: &mut Formatter<'_>, name: &str, pubkey: &Pubkey) -> std::fmt::Result {
    writeln_name_value(f, name, &pubkey.to_string())
}

/// Simulated transactions have no signature to show
pub fn writeln_signature(f: &mut Formatter<'_>, signature: &Option<Signature>) -> std::fmt::Result {
    if let Some(signature) = signature {
        writeln_name_value(f, "Signature:", &signature.to_string())?;
    }
    Ok(())
}
