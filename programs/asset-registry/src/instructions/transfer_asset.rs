use anchor_lang::prelude::*;

use crate::{
    error::RegistryError,
    events::AssetTransferred,
    state::{Asset, Collection},
};

#[derive(Accounts)]
pub struct TransferAsset<'info> {
    #[account(
        mut,
        has_one = collection @ RegistryError::CollectionMismatch,
    )]
    pub asset: Account<'info, Asset>,

    pub collection: Account<'info, Collection>,

    /// Current holder of the asset
    pub authority: Signer<'info>,

    /// CHECK: Any address may become the holder
    pub new_holder: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<TransferAsset>) -> Result<()> {
    let asset = &mut ctx.accounts.asset;

    require_keys_eq!(
        asset.holder,
        ctx.accounts.authority.key(),
        RegistryError::NotHolder
    );

    let from = asset.holder;
    asset.holder = ctx.accounts.new_holder.key();

    emit!(AssetTransferred {
        asset: asset.key(),
        from,
        to: asset.holder,
    });

    msg!("Asset {} transferred", asset.key());
    msg!("From: {}", from);
    msg!("To: {}", asset.holder);

    Ok(())
}
