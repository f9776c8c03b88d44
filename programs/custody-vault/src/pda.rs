//! Deterministic account addressing.
//!
//! Protocol configs and vault records are never indexed. Their addresses are
//! recomputed from a fixed tag and the key they belong to, and handlers
//! compare every caller-supplied address against the recomputed one.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey::{MAX_SEED_LEN, PUBKEY_BYTES};

use crate::{
    constants::{PROTOCOL_SEED, VAULT_SEED},
    error::CustodyError,
};

/// Derives the program address and canonical bump for `(tag, seed)`.
///
/// The seed must be a full 32-byte key. With a fixed-width seed, distinct
/// `(tag, seed)` pairs never concatenate to the same seed bytes.
pub fn derive(tag: &[u8], seed: &[u8]) -> Result<(Pubkey, u8)> {
    require!(
        !tag.is_empty() && tag.len() <= MAX_SEED_LEN,
        CustodyError::InvalidSeed
    );
    require!(seed.len() == PUBKEY_BYTES, CustodyError::InvalidSeed);

    Pubkey::try_find_program_address(&[tag, seed], &crate::ID)
        .ok_or_else(|| error!(CustodyError::InvalidSeed))
}

/// Address of the protocol config owned by `admin`.
pub fn protocol_address(admin: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(PROTOCOL_SEED, admin.as_ref())
}

/// Address of the vault record for `asset`.
pub fn vault_address(asset: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(VAULT_SEED, asset.as_ref())
}
