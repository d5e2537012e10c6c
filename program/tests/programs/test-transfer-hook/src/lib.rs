//! Transfer hook that counts how often it runs

mod entrypoint;
pub mod processor;

solana_pubkey::declare_id!("8W78SmBRQbt2E73dUEwDsCw8kb5S7FVk7trBh458iLsE");
