use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use asset_registry::{
    cpi::accounts::TransferAsset,
    program::AssetRegistry,
    state::{Asset, Collection},
};

use crate::{
    auth,
    constants::VAULT_SEED,
    error::CustodyError,
    events::AssetLocked,
    pda,
    state::{ProtocolConfig, VaultRecord},
};

#[derive(Accounts)]
pub struct LockAsset<'info> {
    /// The asset being surrendered
    #[account(mut)]
    pub asset: Account<'info, Asset>,

    /// The collection the asset belongs to
    pub collection: Account<'info, Collection>,

    /// Pays the lock fee and the vault record's rent
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The asset's current holder
    pub authority: Signer<'info>,

    /// CHECK: Derived address and vacancy are validated in the handler
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: Must be the admin recorded in `protocol`
    pub owner: UncheckedAccount<'info>,

    /// Fee policy; its admin is checked against `owner` in the handler
    pub protocol: Account<'info, ProtocolConfig>,

    /// Receives the lock fee
    #[account(mut)]
    pub treasury: SystemAccount<'info>,

    pub registry_program: Program<'info, AssetRegistry>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<LockAsset>) -> Result<()> {
    let asset_key = ctx.accounts.asset.key();
    let (vault_address, vault_bump) = pda::vault_address(&asset_key)?;

    require_keys_eq!(
        ctx.accounts.vault.key(),
        vault_address,
        CustodyError::InvalidVaultAddress
    );
    require!(
        !VaultRecord::exists(&ctx.accounts.vault),
        CustodyError::AlreadyLocked
    );

    let protocol = &ctx.accounts.protocol;
    auth::require_admin(&protocol.admin, &ctx.accounts.owner.key())?;
    require_keys_eq!(
        ctx.accounts.treasury.key(),
        protocol.treasury,
        CustodyError::InvalidTreasury
    );

    let asset = &ctx.accounts.asset;
    auth::require_collection(&asset.collection, &ctx.accounts.collection.key())?;
    auth::require_holder(&asset.holder, &ctx.accounts.authority.key())?;

    let rent_fee = protocol.rent_fee;
    let record_rent = Rent::get()?.minimum_balance(VaultRecord::LEN);
    let required = rent_fee
        .checked_add(record_rent)
        .ok_or(CustodyError::MathOverflow)?;
    auth::require_funds(ctx.accounts.payer.lamports(), required)?;

    // Fee goes to the treasury
    if rent_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.treasury.to_account_info(),
                },
            ),
            rent_fee,
        )?;
    }

    let previous_owner = ctx.accounts.authority.key();
    let record = VaultRecord {
        previous_owner,
        protocol: protocol.key(),
        bump: vault_bump,
    };

    let vault_seeds = &[VAULT_SEED, asset_key.as_ref(), &[vault_bump]];
    let signer_seeds = &[&vault_seeds[..]];

    record.open(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.payer.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        signer_seeds,
    )?;

    // Hand the asset to the vault
    let transfer_accounts = TransferAsset {
        asset: ctx.accounts.asset.to_account_info(),
        collection: ctx.accounts.collection.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
        new_holder: ctx.accounts.vault.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(
        ctx.accounts.registry_program.to_account_info(),
        transfer_accounts,
    );

    asset_registry::cpi::transfer_asset(cpi_ctx)?;

    emit!(AssetLocked {
        asset: asset_key,
        vault: vault_address,
        previous_owner,
        rent_fee,
    });

    msg!("Asset locked!");
    msg!("Asset: {}", asset_key);
    msg!("Vault: {}", vault_address);
    msg!("Previous owner: {}", previous_owner);
    msg!("Rent fee paid: {}", rent_fee);

    Ok(())
}
