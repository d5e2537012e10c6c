//! Program state

use {
    crate::error::TokenizationWrapError,
    bytemuck::{Pod, Zeroable},
    solana_program_error::ProgramError,
    solana_pubkey::Pubkey,
    spl_pod::{optional_keys::OptionalNonZeroPubkey, primitives::PodBool},
};

/// Administrative record of one wrapped mint.
///
/// Lives at `get_config_address(wrapped_mint)`. Exactly one exists per
/// `(unwrapped_mint, salt)` pair since the wrapped mint address is itself
/// derived from that pair.
///
/// Try to fetch the account at `get_config_address`.
///  * if it doesn't exist, the wrapped mint was never created
///  * if it exists, it names the unwrapped mint, vault and current owner
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct WrappedMintConfig {
    /// Wrapped mint governed by this config
    pub wrapped_mint: Pubkey,
    /// Current administrative authority
    pub owner: Pubkey,
    /// Proposed next owner, empty unless an ownership transfer is in flight
    pub pending_owner: OptionalNonZeroPubkey,
    /// Mint of the backing asset
    pub unwrapped_mint: Pubkey,
    /// Token account holding the backing asset
    pub unwrapped_mint_vault: Pubkey,
    /// Token program owning the unwrapped mint and vault
    pub unwrapped_token_program: Pubkey,
    /// Disambiguates wrapped mints over the same unwrapped mint
    pub salt: [u8; 32],
    /// Bump seed of the wrapped mint address
    pub wrapped_mint_bump: u8,
    /// Bump seed of this config's address
    pub config_bump: u8,
    /// Set once the vault has been closed; wrapping stops for good
    pub vault_closed: PodBool,
}

impl WrappedMintConfig {
    /// Size of the serialized config
    pub const LEN: usize = std::mem::size_of::<Self>();

    /// Decodes a config from account data
    pub fn unpack(data: &[u8]) -> Result<&Self, ProgramError> {
        bytemuck::try_from_bytes(data).map_err(|_| ProgramError::InvalidAccountData)
    }

    /// Decodes a mutable config from account data
    pub fn unpack_mut(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        bytemuck::try_from_bytes_mut(data).map_err(|_| ProgramError::InvalidAccountData)
    }

    /// Proposed next owner, if any
    pub fn pending_owner(&self) -> Option<Pubkey> {
        Option::<Pubkey>::from(self.pending_owner)
    }

    /// Whether the vault has been closed
    pub fn is_vault_closed(&self) -> bool {
        bool::from(self.vault_closed)
    }

    /// Fails unless `caller` is the current owner
    pub fn check_owner(&self, caller: &Pubkey) -> Result<(), TokenizationWrapError> {
        if self.owner == *caller {
            Ok(())
        } else {
            Err(TokenizationWrapError::Unauthorized)
        }
    }

    /// Records `new_owner` as pending. Overwrites any earlier proposal; the
    /// zero address cancels the transfer in flight.
    pub fn propose_owner(&mut self, new_owner: &Pubkey) {
        self.pending_owner = if *new_owner == Pubkey::default() {
            OptionalNonZeroPubkey::default()
        } else {
            OptionalNonZeroPubkey(*new_owner)
        };
    }

    /// Hands authority to the pending owner. Only the pending owner may call
    /// this; on success the pending slot is cleared.
    pub fn accept_owner(&mut self, caller: &Pubkey) -> Result<(), TokenizationWrapError> {
        match self.pending_owner() {
            Some(pending) if pending == *caller => {
                self.owner = pending;
                self.pending_owner = OptionalNonZeroPubkey::default();
                Ok(())
            }
            _ => Err(TokenizationWrapError::NotPendingOwner),
        }
    }
}

/// Kinds of permission a `RoleGrant` can confer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum RoleKind {
    /// Reserved, gates no operation
    Default = 0,
    /// May wrap and unwrap
    Wrapper = 1,
}

impl From<RoleKind> for u8 {
    fn from(role: RoleKind) -> Self {
        role as u8
    }
}

impl TryFrom<u8> for RoleKind {
    type Error = TokenizationWrapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RoleKind::Default),
            1 => Ok(RoleKind::Wrapper),
            _ => Err(TokenizationWrapError::InvalidRole),
        }
    }
}

/// Capability record.
///
/// Its existence at `get_role_address(wrapped_mint, role, user)` is the
/// permission itself; there is no enabled flag to flip.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RoleGrant {
    /// Wrapped mint the grant is scoped to
    pub wrapped_mint: Pubkey,
    /// Grantee
    pub user: Pubkey,
    /// `RoleKind` as a byte
    pub role: u8,
    /// Bump seed of this grant's address
    pub bump: u8,
}

impl RoleGrant {
    /// Size of the serialized grant
    pub const LEN: usize = std::mem::size_of::<Self>();

    /// Decodes a grant from account data
    pub fn unpack(data: &[u8]) -> Result<&Self, ProgramError> {
        bytemuck::try_from_bytes(data).map_err(|_| ProgramError::InvalidAccountData)
    }

    /// Decodes a mutable grant from account data
    pub fn unpack_mut(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        bytemuck::try_from_bytes_mut(data).map_err(|_| ProgramError::InvalidAccountData)
    }

    /// Role conferred by this grant
    pub fn role_kind(&self) -> Result<RoleKind, TokenizationWrapError> {
        RoleKind::try_from(self.role)
    }

    /// Whether this grant confers `role` on `user` for `wrapped_mint`
    pub fn grants(&self, wrapped_mint: &Pubkey, role: RoleKind, user: &Pubkey) -> bool {
        self.wrapped_mint == *wrapped_mint && self.user == *user && self.role == u8::from(role)
    }
}
