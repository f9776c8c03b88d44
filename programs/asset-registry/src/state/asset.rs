use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, MAX_URI_LEN};

/// A collectible. The asset id is the address of this account.
#[account]
pub struct Asset {
    /// The collection the asset was minted into
    pub collection: Pubkey,
    /// Current holder; the only field rewritten after creation
    pub holder: Pubkey,
    /// Authority over metadata (the collection for collection assets)
    pub update_authority: Pubkey,
    pub name: String,
    pub uri: String,
}

impl Asset {
    pub const LEN: usize = 8 + // discriminator
        32 + // collection
        32 + // holder
        32 + // update_authority
        4 + MAX_NAME_LEN + // name
        4 + MAX_URI_LEN; // uri
}
