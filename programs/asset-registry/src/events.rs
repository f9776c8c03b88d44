use anchor_lang::prelude::*;

#[event]
pub struct CollectionCreated {
    pub collection: Pubkey,
    pub update_authority: Pubkey,
}

#[event]
pub struct AssetCreated {
    pub asset: Pubkey,
    pub collection: Pubkey,
    pub holder: Pubkey,
}

#[event]
pub struct AssetTransferred {
    pub asset: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
}
