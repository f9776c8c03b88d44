pub mod auth;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

use anchor_lang::prelude::*;
use asset_registry::{CreateAssetArgs, CreateCollectionArgs};

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Eo7yJZoGS3GPBvfPdgwwZpxbkUwSD2tRua5Rx4FMj3fp");

#[program]
pub mod custody_vault {
    use super::*;

    pub fn initialize_protocol(ctx: Context<InitializeProtocol>, rent_fee: u64) -> Result<()> {
        initialize_protocol::handler(ctx, rent_fee)
    }

    pub fn lock_asset(ctx: Context<LockAsset>) -> Result<()> {
        lock_asset::handler(ctx)
    }

    pub fn swap_asset(ctx: Context<SwapAsset>) -> Result<()> {
        swap_asset::handler(ctx)
    }

    pub fn create_collection(ctx: Context<CreateCollection>, args: CreateCollectionArgs) -> Result<()> {
        create_collection::handler(ctx, args)
    }

    pub fn create_asset(ctx: Context<CreateAsset>, args: CreateAssetArgs) -> Result<()> {
        create_asset::handler(ctx, args)
    }
}
