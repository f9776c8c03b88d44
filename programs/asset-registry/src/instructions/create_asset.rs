use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_NAME_LEN, MAX_URI_LEN},
    error::RegistryError,
    events::AssetCreated,
    state::{Asset, Collection},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateAssetArgs {
    pub name: String,
    pub uri: String,
}

#[derive(Accounts)]
pub struct CreateAsset<'info> {
    /// Account paying for the asset's storage
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Address of the new asset
    #[account(
        init,
        payer = payer,
        space = Asset::LEN,
    )]
    pub asset: Account<'info, Asset>,

    /// The collection the asset is minted into
    #[account(
        mut,
        constraint = collection.update_authority == authority.key() @ RegistryError::NotUpdateAuthority,
    )]
    pub collection: Account<'info, Collection>,

    /// The collection's update authority
    pub authority: Signer<'info>,

    /// CHECK: Initial holder of the asset
    pub owner: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateAsset>, args: CreateAssetArgs) -> Result<()> {
    require!(args.name.len() <= MAX_NAME_LEN, RegistryError::NameTooLong);
    require!(args.uri.len() <= MAX_URI_LEN, RegistryError::UriTooLong);

    let collection = &mut ctx.accounts.collection;
    collection.num_minted = collection
        .num_minted
        .checked_add(1)
        .ok_or(RegistryError::MathOverflow)?;

    let asset = &mut ctx.accounts.asset;
    asset.collection = collection.key();
    asset.holder = ctx.accounts.owner.key();
    asset.update_authority = collection.key();
    asset.name = args.name;
    asset.uri = args.uri;

    emit!(AssetCreated {
        asset: asset.key(),
        collection: asset.collection,
        holder: asset.holder,
    });

    msg!("Asset created: {}", asset.key());
    msg!("Collection: {}", asset.collection);
    msg!("Holder: {}", asset.holder);

    Ok(())
}
