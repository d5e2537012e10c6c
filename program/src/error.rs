//! Error types

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    solana_decode_error::DecodeError,
    solana_msg::msg,
    solana_program_error::ProgramError,
    thiserror::Error,
};

/// Errors that may be returned by the Tokenization Wrap program.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq, FromPrimitive)]
pub enum TokenizationWrapError {
    // 0
    /// Caller is not the owner of the wrapped mint config
    #[error("Caller is not the owner of the wrapped mint config")]
    Unauthorized,
    /// Caller is not the pending owner of the wrapped mint config
    #[error("Caller is not the pending owner of the wrapped mint config")]
    NotPendingOwner,
    /// Caller does not hold the role required for this operation
    #[error("Caller does not hold the role required for this operation")]
    MissingRole,
    /// Role grant to remove does not exist
    #[error("Role grant to remove does not exist")]
    RoleNotFound,
    /// Vault still holds unwrapped tokens
    #[error("Vault still holds unwrapped tokens")]
    VaultNotEmpty,

    // 5
    /// Amount arithmetic overflowed
    #[error("Amount arithmetic overflowed")]
    Overflow,
    /// Source account balance is lower than the requested amount
    #[error("Source account balance is lower than the requested amount")]
    InsufficientBalance,
    /// No record exists at the derived address
    #[error("No record exists at the derived address")]
    RecordNotFound,
    /// A record already exists at the derived address
    #[error("A record already exists at the derived address")]
    RecordAlreadyExists,
    /// Wrap or unwrap amount should be positive
    #[error("Wrap or unwrap amount should be positive")]
    ZeroAmount,

    // 10
    /// Role kind byte is not a known role
    #[error("Role kind byte is not a known role")]
    InvalidRole,
    /// Metadata name is too long
    #[error("Metadata name is too long")]
    NameTooLong,
    /// Metadata symbol is too long
    #[error("Metadata symbol is too long")]
    SymbolTooLong,
    /// Metadata uri is too long
    #[error("Metadata uri is too long")]
    UriTooLong,
    /// Wrapped mint account address does not match expected PDA
    #[error("Wrapped mint account address does not match expected PDA")]
    WrappedMintMismatch,

    // 15
    /// Config account address does not match expected PDA
    #[error("Config account address does not match expected PDA")]
    ConfigMismatch,
    /// Role account address does not match expected PDA
    #[error("Role account address does not match expected PDA")]
    RoleMismatch,
    /// Vault account address does not match the config
    #[error("Vault account address does not match the config")]
    VaultMismatch,
    /// Unwrapped mint does not match the config
    #[error("Unwrapped mint does not match the config")]
    UnwrappedMintMismatch,
    /// Config account is not owned by the tokenization wrap program
    #[error("Config account is not owned by the tokenization wrap program")]
    InvalidConfigOwner,

    // 20
    /// Vault has been closed for this wrapped mint
    #[error("Vault has been closed for this wrapped mint")]
    VaultClosed,
    /// Token program is not the expected SPL Token program
    #[error("Token program is not the expected SPL Token program")]
    InvalidTokenProgram,
    /// Wrapped and unwrapped mints have different decimals
    #[error("Wrapped and unwrapped mints have different decimals")]
    DecimalsMismatch,
}

impl From<TokenizationWrapError> for ProgramError {
    fn from(e: TokenizationWrapError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for TokenizationWrapError {
    fn type_of() -> &'static str {
        "TokenizationWrapError"
    }
}

/// Logs program errors, expanding custom codes into their message
pub fn log_error(err: &ProgramError) {
    msg!(&err.to_string());
    if let ProgramError::Custom(code) = err {
        if let Some(custom) = TokenizationWrapError::from_u32(*code) {
            msg!(&custom.to_string());
        }
    }
}
