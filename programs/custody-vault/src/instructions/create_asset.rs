use anchor_lang::prelude::*;
use asset_registry::{cpi::accounts, program::AssetRegistry, CreateAssetArgs};

#[derive(Accounts)]
pub struct CreateAsset<'info> {
    /// Account paying for the asset's storage
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Address of the new asset
    #[account(mut)]
    pub asset: Signer<'info>,

    /// CHECK: Checked in the registry
    #[account(mut)]
    pub collection: UncheckedAccount<'info>,

    /// The collection's update authority
    pub authority: Signer<'info>,

    /// CHECK: Initial holder of the asset, any address
    pub owner: UncheckedAccount<'info>,

    pub registry_program: Program<'info, AssetRegistry>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateAsset>, args: CreateAssetArgs) -> Result<()> {
    let create_accounts = accounts::CreateAsset {
        payer: ctx.accounts.payer.to_account_info(),
        asset: ctx.accounts.asset.to_account_info(),
        collection: ctx.accounts.collection.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
        owner: ctx.accounts.owner.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(
        ctx.accounts.registry_program.to_account_info(),
        create_accounts,
    );

    asset_registry::cpi::create_asset(cpi_ctx, args)
}
