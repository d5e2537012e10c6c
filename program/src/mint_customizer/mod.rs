//! Mint `customizer` interface and implementations

/// `MintCustomizer` trait definition
pub mod interface;
/// Creator-administered version of the mint
pub mod compliance;
