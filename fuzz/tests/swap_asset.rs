use custody_vault::{error::CustodyError, SWAP_PRICE};
use fuzz_helpers::*;
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    signature::{Keypair, Signer},
};

const RENT_FEE: u64 = LAMPORTS_PER_SOL / 2;

async fn locked_environment() -> FuzzResult<(FuzzTestEnv, CompleteSetup)> {
    let (mut env, setup) = setup_complete_environment(RENT_FEE).await?;
    let holder = setup.holder.pubkey();

    let ix = lock_asset_ix(lock_accounts(&setup, &holder));
    process_instructions(&mut env.context, &[ix], &[&setup.holder]).await?;

    Ok((env, setup))
}

#[tokio::test]
async fn swap_pays_previous_owner_and_releases_asset() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();
    let record_rent = vault_record_rent(&mut env.context).await?;

    let holder_before = get_balance(&mut env.context, &holder).await?;
    let acquirer_before = get_balance(&mut env.context, &acquirer).await?;
    let treasury_before = get_balance(&mut env.context, &setup.protocol.treasury).await?;

    let ix = swap_asset_ix(swap_accounts(&setup, &acquirer, &holder));
    process_instructions(&mut env.context, &[ix], &[&setup.acquirer]).await?;

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, acquirer);

    assert!(get_vault_record(&mut env.context, &setup.asset.vault).await?.is_none());
    assert_eq!(get_balance(&mut env.context, &setup.asset.vault).await?, 0);

    // Price routes to the depositor, never the treasury
    assert_eq!(SWAP_PRICE, LAMPORTS_PER_SOL);
    assert_eq!(get_balance(&mut env.context, &holder).await?, holder_before + SWAP_PRICE);
    assert_eq!(
        get_balance(&mut env.context, &setup.protocol.treasury).await?,
        treasury_before
    );

    // The acquirer pays the price and reclaims the record's rent
    assert_eq!(
        get_balance(&mut env.context, &acquirer).await?,
        acquirer_before - SWAP_PRICE + record_rent
    );

    Ok(())
}

#[tokio::test]
async fn swap_without_lock_fails_not_locked() -> FuzzResult<()> {
    let (mut env, setup) = setup_complete_environment(RENT_FEE).await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();

    let ix = swap_asset_ix(swap_accounts(&setup, &acquirer, &holder));
    let result = process_instructions(&mut env.context, &[ix], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::NotLocked);

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, holder);

    Ok(())
}

#[tokio::test]
async fn swap_with_wrong_previous_owner_fails_mismatch() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let acquirer = setup.acquirer.pubkey();
    let impostor = Keypair::new().pubkey();

    let ix = swap_asset_ix(swap_accounts(&setup, &acquirer, &impostor));
    let result = process_instructions(&mut env.context, &[ix], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::Mismatch);

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, setup.asset.vault);
    assert_eq!(get_balance(&mut env.context, &impostor).await?, 0);
    assert!(get_vault_record(&mut env.context, &setup.asset.vault).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn swap_under_another_protocol_fails_unauthorized() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();
    let rival = setup_protocol(&mut env.context, 0).await?;

    let mut accounts = swap_accounts(&setup, &acquirer, &holder);
    accounts.owner = rival.admin.pubkey();
    accounts.protocol = rival.protocol;

    let result = process_instructions(&mut env.context, &[swap_asset_ix(accounts)], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::Unauthorized);

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, setup.asset.vault);

    Ok(())
}

#[tokio::test]
async fn swap_with_non_admin_owner_fails_unauthorized() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();

    let mut accounts = swap_accounts(&setup, &acquirer, &holder);
    accounts.owner = Keypair::new().pubkey();

    let result = process_instructions(&mut env.context, &[swap_asset_ix(accounts)], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::Unauthorized);
    assert!(get_vault_record(&mut env.context, &setup.asset.vault).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn swap_rejects_other_collection() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();
    let other_collection = setup_collection(&mut env.context).await?;

    let holder_before = get_balance(&mut env.context, &holder).await?;

    let mut accounts = swap_accounts(&setup, &acquirer, &holder);
    accounts.collection = other_collection.collection;

    let result = process_instructions(&mut env.context, &[swap_asset_ix(accounts)], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::InvalidCollection);

    assert_eq!(get_balance(&mut env.context, &holder).await?, holder_before);
    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, setup.asset.vault);

    Ok(())
}

#[tokio::test]
async fn swap_rejects_foreign_vault_address() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();

    let (wrong_vault, _) = derive_vault_pda(&env.program_id, &Keypair::new().pubkey());

    let mut accounts = swap_accounts(&setup, &acquirer, &holder);
    accounts.vault = wrong_vault;

    let result = process_instructions(&mut env.context, &[swap_asset_ix(accounts)], &[&setup.acquirer]).await;

    assert_error_code(result, CustodyError::InvalidVaultAddress);

    Ok(())
}

#[tokio::test]
async fn swap_fails_when_acquirer_cannot_pay() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let short_acquirer = funded_keypair(&mut env.context, SWAP_PRICE / 2).await?;

    let holder_before = get_balance(&mut env.context, &holder).await?;

    let ix = swap_asset_ix(swap_accounts(&setup, &short_acquirer.pubkey(), &holder));
    let result = process_instructions(&mut env.context, &[ix], &[&short_acquirer]).await;

    assert_error_code(result, CustodyError::InsufficientFunds);

    assert_eq!(get_balance(&mut env.context, &holder).await?, holder_before);

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, setup.asset.vault);

    Ok(())
}

#[tokio::test]
async fn swapped_slot_can_be_locked_again() -> FuzzResult<()> {
    let (mut env, setup) = locked_environment().await?;
    let holder = setup.holder.pubkey();
    let acquirer = setup.acquirer.pubkey();

    let ix = swap_asset_ix(swap_accounts(&setup, &acquirer, &holder));
    process_instructions(&mut env.context, &[ix], &[&setup.acquirer]).await?;

    // The new holder deposits the same asset again
    let ix = lock_asset_ix(lock_accounts(&setup, &acquirer));
    process_instructions(&mut env.context, &[ix], &[&setup.acquirer]).await?;

    let record = get_vault_record(&mut env.context, &setup.asset.vault)
        .await?
        .ok_or("vault record missing after relock")?;
    assert_eq!(record.previous_owner, acquirer);

    let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
    assert_eq!(asset.holder, setup.asset.vault);

    // Two locks paid the fee twice
    assert_eq!(
        get_balance(&mut env.context, &setup.protocol.treasury).await?,
        2 * RENT_FEE
    );

    Ok(())
}
