use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub protocol: Pubkey,
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub rent_fee: u64,
}

#[event]
pub struct AssetLocked {
    pub asset: Pubkey,
    pub vault: Pubkey,
    pub previous_owner: Pubkey,
    pub rent_fee: u64,
}

#[event]
pub struct AssetSwapped {
    pub asset: Pubkey,
    pub vault: Pubkey,
    pub previous_owner: Pubkey,
    pub acquirer: Pubkey,
    pub price: u64,
}
