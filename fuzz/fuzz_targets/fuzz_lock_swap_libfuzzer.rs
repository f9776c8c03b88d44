#![no_main]

use arbitrary::Arbitrary;
use custody_vault::{error::CustodyError, SWAP_PRICE};
use fuzz_helpers::*;
use libfuzzer_sys::fuzz_target;
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

/// One attempted call against the vault
#[derive(Debug, Clone, Arbitrary)]
enum Action {
    /// Lock the asset, signed either by its holder or by a stranger
    Lock { by_holder: bool },
    /// Swap the asset out, naming either the real depositor or a stranger
    Swap { name_depositor: bool },
}

/// Fuzzable input for a lock/swap session
#[derive(Debug, Clone, Arbitrary)]
struct LockSwapFuzzInput {
    /// Lock fee in tenths of a SOL
    rent_fee_tenths: u8,
    /// Sequence of calls to replay
    actions: Vec<Action>,
}

/// What the vault should look like after every call
struct Model {
    locked: bool,
    /// Index into the actor list of the current holder or depositor
    owner: usize,
}

/// Execute a single fuzz iteration
async fn fuzz_lock_swap_once(input: LockSwapFuzzInput) -> Result<(), Box<dyn std::error::Error>> {
    let rent_fee = (input.rent_fee_tenths % 21) as u64 * LAMPORTS_PER_SOL / 10;
    let actions: Vec<Action> = input.actions.into_iter().take(8).collect();

    let (mut env, setup) = match setup_complete_environment(rent_fee).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Setup failed: {}", e);
            return Ok(());
        }
    };

    // Holder and acquirer take turns owning the asset
    let stranger = funded_keypair(&mut env.context, ACTOR_FUNDING).await?;
    let actors: [&Keypair; 2] = [&setup.holder, &setup.acquirer];
    let mut model = Model {
        locked: false,
        owner: 0,
    };

    for action in actions {
        let treasury_before = get_balance(&mut env.context, &setup.protocol.treasury).await?;

        match action {
            Action::Lock { by_holder } => {
                let signer = if by_holder { actors[model.owner] } else { &stranger };
                let ix = lock_asset_ix(lock_accounts(&setup, &signer.pubkey()));
                let result = process_instructions(&mut env.context, &[ix], &[signer]).await;

                if model.locked {
                    assert_error_code(result, CustodyError::AlreadyLocked);
                } else if !by_holder {
                    assert_error_code(result, CustodyError::Unauthorized);
                } else {
                    result.map_err(|e| format!("lock by holder failed: {:?}", e))?;
                    model.locked = true;

                    let treasury_after = get_balance(&mut env.context, &setup.protocol.treasury).await?;
                    assert_eq!(
                        treasury_after,
                        treasury_before + rent_fee,
                        "Treasury must grow by exactly the rent fee"
                    );
                }
            }
            Action::Swap { name_depositor } => {
                let acquirer = actors[1 - model.owner];
                let depositor = actors[model.owner].pubkey();
                let named: Pubkey = if name_depositor { depositor } else { stranger.pubkey() };

                let depositor_before = get_balance(&mut env.context, &depositor).await?;

                let ix = swap_asset_ix(swap_accounts(&setup, &acquirer.pubkey(), &named));
                let result = process_instructions(&mut env.context, &[ix], &[acquirer]).await;

                if !model.locked {
                    assert_error_code(result, CustodyError::NotLocked);
                } else if !name_depositor {
                    assert_error_code(result, CustodyError::Mismatch);
                } else {
                    result.map_err(|e| format!("swap failed: {:?}", e))?;
                    model.locked = false;
                    model.owner = 1 - model.owner;

                    let depositor_after = get_balance(&mut env.context, &depositor).await?;
                    assert_eq!(
                        depositor_after,
                        depositor_before + SWAP_PRICE,
                        "Depositor must receive exactly the swap price"
                    );

                    let treasury_after = get_balance(&mut env.context, &setup.protocol.treasury).await?;
                    assert_eq!(treasury_after, treasury_before, "Swap must not touch the treasury");
                }
            }
        }

        // Custody invariant: the record exists iff the vault holds the asset
        let asset = get_asset(&mut env.context, &setup.asset.asset).await?;
        let record = get_vault_record(&mut env.context, &setup.asset.vault).await?;

        match (model.locked, record) {
            (true, Some(record)) => {
                assert_eq!(asset.holder, setup.asset.vault);
                assert_eq!(record.previous_owner, actors[model.owner].pubkey());
            }
            (false, None) => {
                assert_eq!(asset.holder, actors[model.owner].pubkey());
            }
            (locked, record) => panic!(
                "Custody diverged from model: locked={} record={:?} holder={}",
                locked,
                record.map(|r| r.previous_owner),
                asset.holder
            ),
        }
    }

    Ok(())
}

fuzz_target!(|input: LockSwapFuzzInput| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        if let Err(e) = fuzz_lock_swap_once(input).await {
            panic!("Fuzz iteration failed: {}", e);
        }
    });
});
