use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use asset_registry::{
    cpi::accounts::TransferAsset,
    program::AssetRegistry,
    state::{Asset, Collection},
};

use crate::{
    auth,
    constants::{SWAP_PRICE, VAULT_SEED},
    error::CustodyError,
    events::AssetSwapped,
    pda,
    state::{ProtocolConfig, VaultRecord},
};

#[derive(Accounts)]
pub struct SwapAsset<'info> {
    /// The asset held in the vault
    #[account(mut)]
    pub asset: Account<'info, Asset>,

    /// The collection the asset belongs to
    pub collection: Account<'info, Collection>,

    /// The acquirer; pays the swap price and becomes the holder
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Derived address and record presence are validated in the handler
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: Must be the admin recorded in `protocol`
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Compared against the vault record in the handler
    #[account(mut)]
    pub previous_owner: UncheckedAccount<'info>,

    /// Fee policy; its admin is checked against `owner` in the handler
    pub protocol: Account<'info, ProtocolConfig>,

    pub registry_program: Program<'info, AssetRegistry>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SwapAsset>) -> Result<()> {
    let asset_key = ctx.accounts.asset.key();
    let (vault_address, _) = pda::vault_address(&asset_key)?;

    require_keys_eq!(
        ctx.accounts.vault.key(),
        vault_address,
        CustodyError::InvalidVaultAddress
    );

    let record = VaultRecord::load(&ctx.accounts.vault)?;

    require_keys_eq!(
        ctx.accounts.previous_owner.key(),
        record.previous_owner,
        CustodyError::Mismatch
    );

    let protocol = &ctx.accounts.protocol;
    auth::require_admin(&protocol.admin, &ctx.accounts.owner.key())?;
    require_keys_eq!(protocol.key(), record.protocol, CustodyError::Unauthorized);

    let asset = &ctx.accounts.asset;
    auth::require_collection(&asset.collection, &ctx.accounts.collection.key())?;
    require_keys_eq!(asset.holder, vault_address, CustodyError::NotLocked);

    auth::require_funds(ctx.accounts.payer.lamports(), SWAP_PRICE)?;

    // Price goes straight to the depositor
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.previous_owner.to_account_info(),
            },
        ),
        SWAP_PRICE,
    )?;

    // The vault signs the release to the acquirer
    let vault_seeds = &[VAULT_SEED, asset_key.as_ref(), &[record.bump]];
    let signer_seeds = &[&vault_seeds[..]];

    let transfer_accounts = TransferAsset {
        asset: ctx.accounts.asset.to_account_info(),
        collection: ctx.accounts.collection.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
        new_holder: ctx.accounts.payer.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.registry_program.to_account_info(),
        transfer_accounts,
        signer_seeds,
    );

    asset_registry::cpi::transfer_asset(cpi_ctx)?;

    VaultRecord::retire(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.payer.to_account_info(),
    )?;

    let acquirer = ctx.accounts.payer.key();

    emit!(AssetSwapped {
        asset: asset_key,
        vault: vault_address,
        previous_owner: record.previous_owner,
        acquirer,
        price: SWAP_PRICE,
    });

    msg!("Asset swapped!");
    msg!("Asset: {}", asset_key);
    msg!("Paid {} to previous owner {}", SWAP_PRICE, record.previous_owner);
    msg!("New holder: {}", acquirer);

    Ok(())
}
