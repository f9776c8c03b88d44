use custody_vault::error::CustodyError;
use fuzz_helpers::*;
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    signature::{Keypair, Signer},
};

#[tokio::test]
async fn initializes_protocol_config() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let rent_fee = LAMPORTS_PER_SOL / 2;

    let protocol = setup_protocol(&mut env.context, rent_fee).await?;

    let config = get_protocol_config(&mut env.context, &protocol.protocol).await?;
    assert_eq!(config.admin, protocol.admin.pubkey());
    assert_eq!(config.treasury, protocol.treasury);
    assert_eq!(config.rent_fee, rent_fee);

    let (expected, bump) = custody_vault::pda::protocol_address(&protocol.admin.pubkey())?;
    assert_eq!(protocol.protocol, expected);
    assert_eq!(config.bump, bump);

    Ok(())
}

#[tokio::test]
async fn second_initialization_fails() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let protocol = setup_protocol(&mut env.context, LAMPORTS_PER_SOL / 2).await?;

    let other_treasury = Keypair::new().pubkey();
    let ix = initialize_protocol_ix(&protocol.admin.pubkey(), &other_treasury, 0);
    let result = process_instructions(&mut env.context, &[ix], &[&protocol.admin]).await;

    assert_error_code(result, CustodyError::AlreadyInitialized);

    // Fee policy and treasury are untouched
    let config = get_protocol_config(&mut env.context, &protocol.protocol).await?;
    assert_eq!(config.treasury, protocol.treasury);
    assert_eq!(config.rent_fee, LAMPORTS_PER_SOL / 2);

    Ok(())
}

#[tokio::test]
async fn each_admin_gets_its_own_config() -> FuzzResult<()> {
    let mut env = setup_program_test().await;

    let first = setup_protocol(&mut env.context, LAMPORTS_PER_SOL / 2).await?;
    let second = setup_protocol(&mut env.context, LAMPORTS_PER_SOL / 4).await?;

    assert_ne!(first.protocol, second.protocol);

    let first_config = get_protocol_config(&mut env.context, &first.protocol).await?;
    let second_config = get_protocol_config(&mut env.context, &second.protocol).await?;

    assert_eq!(first_config.rent_fee, LAMPORTS_PER_SOL / 2);
    assert_eq!(second_config.rent_fee, LAMPORTS_PER_SOL / 4);
    assert_eq!(second_config.admin, second.admin.pubkey());

    Ok(())
}

#[tokio::test]
async fn fee_below_rent_exempt_minimum_fails_for_empty_treasury() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let admin = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let treasury = Keypair::new().pubkey();

    let ix = initialize_protocol_ix(&admin.pubkey(), &treasury, 1_000);
    let result = process_instructions(&mut env.context, &[ix], &[&admin]).await;

    assert_error_code(result, CustodyError::RentFeeTooLow);

    let (protocol, _) = derive_protocol_pda(&env.program_id, &admin.pubkey());
    assert!(env.context.banks_client.get_account(protocol).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn small_fee_is_lockable_when_treasury_is_rent_exempt() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let rent_fee = 1_000;

    let admin = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let minimum = env.context.banks_client.get_rent().await?.minimum_balance(0);
    let treasury = funded_keypair(&mut env.context, minimum).await?.pubkey();

    let ix = initialize_protocol_ix(&admin.pubkey(), &treasury, rent_fee);
    process_instructions(&mut env.context, &[ix], &[&admin]).await?;

    let (protocol, _) = derive_protocol_pda(&env.program_id, &admin.pubkey());
    let collection = setup_collection(&mut env.context).await?;
    let holder = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let acquirer = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let asset = setup_asset(&mut env.context, &collection, &holder.pubkey()).await?;

    let setup = CompleteSetup {
        protocol: ProtocolAccounts {
            protocol,
            admin,
            treasury,
            rent_fee,
        },
        collection,
        asset,
        holder,
        acquirer,
    };

    let ix = lock_asset_ix(lock_accounts(&setup, &setup.holder.pubkey()));
    process_instructions(&mut env.context, &[ix], &[&setup.holder]).await?;

    assert_eq!(get_balance(&mut env.context, &treasury).await?, minimum + rent_fee);

    Ok(())
}
