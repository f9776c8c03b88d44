use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_NAME_LEN, MAX_URI_LEN},
    error::RegistryError,
    events::CollectionCreated,
    state::Collection,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateCollectionArgs {
    pub name: String,
    pub uri: String,
}

#[derive(Accounts)]
pub struct CreateCollection<'info> {
    /// Account paying for the collection's storage
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Address of the new collection
    #[account(
        init,
        payer = payer,
        space = Collection::LEN,
    )]
    pub collection: Account<'info, Collection>,

    /// CHECK: Recorded as the collection's update authority
    pub update_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateCollection>, args: CreateCollectionArgs) -> Result<()> {
    require!(args.name.len() <= MAX_NAME_LEN, RegistryError::NameTooLong);
    require!(args.uri.len() <= MAX_URI_LEN, RegistryError::UriTooLong);

    let collection = &mut ctx.accounts.collection;

    collection.update_authority = ctx.accounts.update_authority.key();
    collection.num_minted = 0;
    collection.name = args.name;
    collection.uri = args.uri;

    emit!(CollectionCreated {
        collection: collection.key(),
        update_authority: collection.update_authority,
    });

    msg!("Collection created: {}", collection.key());
    msg!("Update authority: {}", collection.update_authority);

    Ok(())
}
