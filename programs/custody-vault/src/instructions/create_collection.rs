use anchor_lang::prelude::*;
use asset_registry::{cpi::accounts, program::AssetRegistry, CreateCollectionArgs};

#[derive(Accounts)]
pub struct CreateCollection<'info> {
    /// Account paying for the collection's storage
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Address of the new collection
    #[account(mut)]
    pub collection: Signer<'info>,

    /// CHECK: Checked in the registry
    pub update_authority: UncheckedAccount<'info>,

    pub registry_program: Program<'info, AssetRegistry>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateCollection>, args: CreateCollectionArgs) -> Result<()> {
    let create_accounts = accounts::CreateCollection {
        payer: ctx.accounts.payer.to_account_info(),
        collection: ctx.accounts.collection.to_account_info(),
        update_authority: ctx.accounts.update_authority.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(
        ctx.accounts.registry_program.to_account_info(),
        create_accounts,
    );

    asset_registry::cpi::create_collection(cpi_ctx, args)
}
