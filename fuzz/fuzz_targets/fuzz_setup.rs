use anchor_lang::solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey as ProgramPubkey,
};
use anchor_lang::AccountDeserialize;
use anchor_lang::InstructionData;
use anchor_lang::ToAccountMetas;
use asset_registry::state::{Asset, Collection};
use asset_registry::{CreateAssetArgs, CreateCollectionArgs};
use custody_vault::state::{ProtocolConfig, VaultRecord};
use solana_program_test::*;
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

// Re-export for convenience
pub use solana_program_test::{BanksClientError, ProgramTestContext};

pub type FuzzResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Lamports handed to every actor created by the harness
pub const ACTOR_FUNDING: u64 = 10 * LAMPORTS_PER_SOL;

/// Test environment with both programs loaded
pub struct FuzzTestEnv {
    pub program_id: Pubkey,
    pub registry_id: Pubkey,
    pub context: ProgramTestContext,
}

/// Protocol config and the admin that owns it
#[derive(Debug)]
pub struct ProtocolAccounts {
    pub protocol: Pubkey,
    pub admin: Keypair,
    pub treasury: Pubkey,
    pub rent_fee: u64,
}

/// Registry collection and its update authority
#[derive(Debug)]
pub struct CollectionAccounts {
    pub collection: Pubkey,
    pub update_authority: Keypair,
}

/// Registry asset and the vault address derived for it
#[derive(Debug, Clone)]
pub struct AssetAccounts {
    pub asset: Pubkey,
    pub collection: Pubkey,
    pub vault: Pubkey,
}

/// Complete setup: protocol, one collection, one asset held by `holder`,
/// and a funded acquirer
pub struct CompleteSetup {
    pub protocol: ProtocolAccounts,
    pub collection: CollectionAccounts,
    pub asset: AssetAccounts,
    pub holder: Keypair,
    pub acquirer: Keypair,
}

// ============================================================================
// Program Loading
// ============================================================================

fn process_custody_vault(
    program_id: &ProgramPubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    custody_vault::entry(program_id, accounts, data)
}

fn process_asset_registry(
    program_id: &ProgramPubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    asset_registry::entry(program_id, accounts, data)
}

// ============================================================================
// Core Setup Functions
// ============================================================================

/// Creates the program test environment with the vault and registry loaded
pub async fn setup_program_test() -> FuzzTestEnv {
    let program_id = custody_vault::id();
    let registry_id = asset_registry::id();

    let mut program_test = ProgramTest::default();
    program_test.prefer_bpf(false);
    program_test.add_program(
        "custody_vault",
        program_id,
        processor!(process_custody_vault),
    );
    program_test.add_program(
        "asset_registry",
        registry_id,
        processor!(process_asset_registry),
    );

    let context = program_test.start_with_context().await;

    FuzzTestEnv {
        program_id,
        registry_id,
        context,
    }
}

/// Signs `instructions` with the context payer plus `signers` and processes
/// them against a fresh blockhash, so identical retries are not deduplicated
pub async fn process_instructions(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await?;

    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        blockhash,
    );

    context.banks_client.process_transaction(tx).await
}

/// Transfers lamports from the context payer to `to`
pub async fn fund_account(
    context: &mut ProgramTestContext,
    to: &Pubkey,
    lamports: u64,
) -> FuzzResult<()> {
    let ix = solana_sdk::system_instruction::transfer(&context.payer.pubkey(), to, lamports);

    process_instructions(context, &[ix], &[]).await?;

    Ok(())
}

/// Creates a new keypair holding `lamports`
pub async fn funded_keypair(context: &mut ProgramTestContext, lamports: u64) -> FuzzResult<Keypair> {
    let keypair = Keypair::new();
    fund_account(context, &keypair.pubkey(), lamports).await?;
    Ok(keypair)
}

/// Initializes a protocol config for a new admin with a fresh, unfunded treasury
pub async fn setup_protocol(
    context: &mut ProgramTestContext,
    rent_fee: u64,
) -> FuzzResult<ProtocolAccounts> {
    let admin = funded_keypair(context, ACTOR_FUNDING).await?;
    let treasury = Keypair::new().pubkey();

    let ix = initialize_protocol_ix(&admin.pubkey(), &treasury, rent_fee);
    process_instructions(context, &[ix], &[&admin]).await?;

    let (protocol, _) = derive_protocol_pda(&custody_vault::id(), &admin.pubkey());

    Ok(ProtocolAccounts {
        protocol,
        admin,
        treasury,
        rent_fee,
    })
}

/// Creates a registry collection through the vault program's delegation
pub async fn setup_collection(context: &mut ProgramTestContext) -> FuzzResult<CollectionAccounts> {
    let update_authority = funded_keypair(context, ACTOR_FUNDING).await?;
    let collection = Keypair::new();

    let ix = create_collection_ix(
        &update_authority.pubkey(),
        &collection.pubkey(),
        &update_authority.pubkey(),
        CreateCollectionArgs {
            name: "Custody Test Collection".to_string(),
            uri: "https://example.com/collection.json".to_string(),
        },
    );

    process_instructions(context, &[ix], &[&update_authority, &collection]).await?;

    Ok(CollectionAccounts {
        collection: collection.pubkey(),
        update_authority,
    })
}

/// Mints an asset into `collection` held by `owner`
pub async fn setup_asset(
    context: &mut ProgramTestContext,
    collection: &CollectionAccounts,
    owner: &Pubkey,
) -> FuzzResult<AssetAccounts> {
    let asset = Keypair::new();

    let ix = create_asset_ix(
        &collection.update_authority.pubkey(),
        &asset.pubkey(),
        &collection.collection,
        &collection.update_authority.pubkey(),
        owner,
        CreateAssetArgs {
            name: "Custody Test Asset".to_string(),
            uri: "https://example.com/asset.json".to_string(),
        },
    );

    process_instructions(context, &[ix], &[&collection.update_authority, &asset]).await?;

    let (vault, _) = derive_vault_pda(&custody_vault::id(), &asset.pubkey());

    Ok(AssetAccounts {
        asset: asset.pubkey(),
        collection: collection.collection,
        vault,
    })
}

/// Sets up everything: protocol + collection + asset held by a funded holder
/// + a funded acquirer
pub async fn setup_complete_environment(rent_fee: u64) -> FuzzResult<(FuzzTestEnv, CompleteSetup)> {
    let mut env = setup_program_test().await;

    let protocol = setup_protocol(&mut env.context, rent_fee).await?;
    let collection = setup_collection(&mut env.context).await?;

    let holder = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let acquirer = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;

    let asset = setup_asset(&mut env.context, &collection, &holder.pubkey()).await?;

    let setup = CompleteSetup {
        protocol,
        collection,
        asset,
        holder,
        acquirer,
    };

    Ok((env, setup))
}

// ============================================================================
// Instruction Builders
// ============================================================================

pub fn initialize_protocol_ix(admin: &Pubkey, treasury: &Pubkey, rent_fee: u64) -> Instruction {
    let program_id = custody_vault::id();
    let (protocol, _) = derive_protocol_pda(&program_id, admin);

    let accounts = custody_vault::accounts::InitializeProtocol {
        payer: *admin,
        treasury: *treasury,
        protocol,
        system_program: solana_sdk::system_program::ID,
    };

    Instruction {
        program_id,
        accounts: accounts.to_account_metas(None),
        data: custody_vault::instruction::InitializeProtocol { rent_fee }.data(),
    }
}

pub fn create_collection_ix(
    payer: &Pubkey,
    collection: &Pubkey,
    update_authority: &Pubkey,
    args: CreateCollectionArgs,
) -> Instruction {
    let accounts = custody_vault::accounts::CreateCollection {
        payer: *payer,
        collection: *collection,
        update_authority: *update_authority,
        registry_program: asset_registry::id(),
        system_program: solana_sdk::system_program::ID,
    };

    Instruction {
        program_id: custody_vault::id(),
        accounts: accounts.to_account_metas(None),
        data: custody_vault::instruction::CreateCollection { args }.data(),
    }
}

pub fn create_asset_ix(
    payer: &Pubkey,
    asset: &Pubkey,
    collection: &Pubkey,
    authority: &Pubkey,
    owner: &Pubkey,
    args: CreateAssetArgs,
) -> Instruction {
    let accounts = custody_vault::accounts::CreateAsset {
        payer: *payer,
        asset: *asset,
        collection: *collection,
        authority: *authority,
        owner: *owner,
        registry_program: asset_registry::id(),
        system_program: solana_sdk::system_program::ID,
    };

    Instruction {
        program_id: custody_vault::id(),
        accounts: accounts.to_account_metas(None),
        data: custody_vault::instruction::CreateAsset { args }.data(),
    }
}

/// Lock accounts for `holder` locking the setup asset and paying for it
/// themselves; tests override individual fields to exercise failures
pub fn lock_accounts(setup: &CompleteSetup, holder: &Pubkey) -> custody_vault::accounts::LockAsset {
    custody_vault::accounts::LockAsset {
        asset: setup.asset.asset,
        collection: setup.asset.collection,
        payer: *holder,
        authority: *holder,
        vault: setup.asset.vault,
        owner: setup.protocol.admin.pubkey(),
        protocol: setup.protocol.protocol,
        treasury: setup.protocol.treasury,
        registry_program: asset_registry::id(),
        system_program: solana_sdk::system_program::ID,
    }
}

pub fn lock_asset_ix(accounts: custody_vault::accounts::LockAsset) -> Instruction {
    Instruction {
        program_id: custody_vault::id(),
        accounts: accounts.to_account_metas(None),
        data: custody_vault::instruction::LockAsset {}.data(),
    }
}

/// Swap accounts for `acquirer` buying the setup asset from `previous_owner`
pub fn swap_accounts(
    setup: &CompleteSetup,
    acquirer: &Pubkey,
    previous_owner: &Pubkey,
) -> custody_vault::accounts::SwapAsset {
    custody_vault::accounts::SwapAsset {
        asset: setup.asset.asset,
        collection: setup.asset.collection,
        payer: *acquirer,
        vault: setup.asset.vault,
        owner: setup.protocol.admin.pubkey(),
        previous_owner: *previous_owner,
        protocol: setup.protocol.protocol,
        registry_program: asset_registry::id(),
        system_program: solana_sdk::system_program::ID,
    }
}

pub fn swap_asset_ix(accounts: custody_vault::accounts::SwapAsset) -> Instruction {
    Instruction {
        program_id: custody_vault::id(),
        accounts: accounts.to_account_metas(None),
        data: custody_vault::instruction::SwapAsset {}.data(),
    }
}

// ============================================================================
// PDA Derivation Helpers
// ============================================================================

/// Derive protocol config PDA
pub fn derive_protocol_pda(program_id: &Pubkey, admin: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"protocol", admin.as_ref()], program_id)
}

/// Derive vault record PDA
pub fn derive_vault_pda(program_id: &Pubkey, asset: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"vault", asset.as_ref()], program_id)
}

// ============================================================================
// Error Helpers
// ============================================================================

/// Custom program error code carried by a failed transaction, if any
pub fn custom_error_code(err: &BanksClientError) -> Option<u32> {
    match err {
        BanksClientError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(code),
        ))
        | BanksClientError::SimulationError {
            err: TransactionError::InstructionError(_, InstructionError::Custom(code)),
            ..
        } => Some(*code),
        _ => None,
    }
}

/// Asserts the transaction failed with the given program error
pub fn assert_error_code<E: Into<u32>>(result: Result<(), BanksClientError>, expected: E) {
    let expected = expected.into();
    let err = result.expect_err("transaction should have failed");

    assert_eq!(
        custom_error_code(&err),
        Some(expected),
        "unexpected error: {:?}",
        err
    );
}

// ============================================================================
// Account State Verification Helpers
// ============================================================================

/// Lamport balance of any account (zero when it does not exist)
pub async fn get_balance(context: &mut ProgramTestContext, account: &Pubkey) -> FuzzResult<u64> {
    Ok(context.banks_client.get_balance(*account).await?)
}

/// Rent-exempt minimum for a vault record
pub async fn vault_record_rent(context: &mut ProgramTestContext) -> FuzzResult<u64> {
    let rent = context.banks_client.get_rent().await?;
    Ok(rent.minimum_balance(VaultRecord::LEN))
}

/// Get protocol config
pub async fn get_protocol_config(
    context: &mut ProgramTestContext,
    protocol: &Pubkey,
) -> FuzzResult<ProtocolConfig> {
    let account = context
        .banks_client
        .get_account(*protocol)
        .await?
        .ok_or("Protocol config account not found")?;

    let config = ProtocolConfig::try_deserialize(&mut account.data.as_ref())?;
    Ok(config)
}

/// Fetch the vault record, or `None` while the asset is not locked
pub async fn get_vault_record(
    context: &mut ProgramTestContext,
    vault: &Pubkey,
) -> FuzzResult<Option<VaultRecord>> {
    let account = match context.banks_client.get_account(*vault).await? {
        Some(account) if account.owner == custody_vault::id() && !account.data.is_empty() => account,
        _ => return Ok(None),
    };

    let record = VaultRecord::try_deserialize(&mut account.data.as_ref())?;
    Ok(Some(record))
}

/// Fetch and return asset state
pub async fn get_asset(context: &mut ProgramTestContext, asset: &Pubkey) -> FuzzResult<Asset> {
    let account = context
        .banks_client
        .get_account(*asset)
        .await?
        .ok_or("Asset account not found")?;

    let asset = Asset::try_deserialize(&mut account.data.as_ref())?;
    Ok(asset)
}

/// Fetch and return collection state
pub async fn get_collection(
    context: &mut ProgramTestContext,
    collection: &Pubkey,
) -> FuzzResult<Collection> {
    let account = context
        .banks_client
        .get_account(*collection)
        .await?
        .ok_or("Collection account not found")?;

    let collection = Collection::try_deserialize(&mut account.data.as_ref())?;
    Ok(collection)
}
