use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, MAX_URI_LEN};

#[account]
pub struct Collection {
    /// Authority allowed to mint assets into this collection
    pub update_authority: Pubkey,
    /// Number of assets minted so far
    pub num_minted: u32,
    pub name: String,
    pub uri: String,
}

impl Collection {
    pub const LEN: usize = 8 + // discriminator
        32 + // update_authority
        4 + // num_minted
        4 + MAX_NAME_LEN + // name
        4 + MAX_URI_LEN; // uri
}
