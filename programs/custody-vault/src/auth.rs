//! Capability predicates shared by lock and swap.

use anchor_lang::prelude::*;

use crate::error::CustodyError;

/// The signer must be the asset's current holder.
pub fn require_holder(holder: &Pubkey, authority: &Pubkey) -> Result<()> {
    require_keys_eq!(*holder, *authority, CustodyError::Unauthorized);
    Ok(())
}

/// The supplied collection must be the one recorded on the asset.
pub fn require_collection(recorded: &Pubkey, supplied: &Pubkey) -> Result<()> {
    require_keys_eq!(*recorded, *supplied, CustodyError::InvalidCollection);
    Ok(())
}

/// The supplied owner must be the admin stored in the protocol config.
pub fn require_admin(admin: &Pubkey, owner: &Pubkey) -> Result<()> {
    require_keys_eq!(*admin, *owner, CustodyError::Unauthorized);
    Ok(())
}

/// The payer's balance must cover `amount`.
pub fn require_funds(balance: u64, amount: u64) -> Result<()> {
    require_gte!(balance, amount, CustodyError::InsufficientFunds);
    Ok(())
}
