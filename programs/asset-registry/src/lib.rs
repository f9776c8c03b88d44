pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("GB4BScTHjacy6eTiwSEL826dZi8LCS3A2gLUea6gHysj");

#[program]
pub mod asset_registry {
    use super::*;

    pub fn create_collection(ctx: Context<CreateCollection>, args: CreateCollectionArgs) -> Result<()> {
        create_collection::handler(ctx, args)
    }

    pub fn create_asset(ctx: Context<CreateAsset>, args: CreateAssetArgs) -> Result<()> {
        create_asset::handler(ctx, args)
    }

    pub fn transfer_asset(ctx: Context<TransferAsset>) -> Result<()> {
        transfer_asset::handler(ctx)
    }
}
