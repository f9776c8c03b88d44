use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::CustodyError;

/// Escrow slot for a single locked asset.
///
/// Lives at `derive("vault", asset)`; the asset key is implied by the address.
/// The account exists exactly while the asset is in custody.
#[account]
pub struct VaultRecord {
    /// The party that surrendered the asset and receives the swap price
    pub previous_owner: Pubkey,
    /// The protocol config the vault was opened under
    pub protocol: Pubkey,
    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl VaultRecord {
    pub const LEN: usize = 8 + // discriminator
        32 + // previous_owner
        32 + // protocol
        1; // bump

    /// Whether a record currently occupies `vault`.
    pub fn exists(vault: &AccountInfo) -> bool {
        vault.owner == &crate::ID && !vault.data_is_empty()
    }

    /// Reads the record stored at `vault`.
    pub fn load(vault: &AccountInfo) -> Result<Self> {
        require!(Self::exists(vault), CustodyError::NotLocked);

        let data = vault.try_borrow_data()?;
        Self::try_deserialize(&mut &data[..])
    }

    /// Allocates the record at the vault PDA, funded by `payer`, and writes it.
    ///
    /// An address that already holds lamports is topped up, allocated and
    /// assigned instead of created.
    pub fn open<'info>(
        &self,
        vault: &AccountInfo<'info>,
        payer: &AccountInfo<'info>,
        system: &AccountInfo<'info>,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        let required = Rent::get()?.minimum_balance(Self::LEN);
        let current = vault.lamports();

        if current == 0 {
            system_program::create_account(
                CpiContext::new_with_signer(
                    system.clone(),
                    CreateAccount {
                        from: payer.clone(),
                        to: vault.clone(),
                    },
                    signer_seeds,
                ),
                required,
                Self::LEN as u64,
                &crate::ID,
            )?;
        } else {
            let top_up = required.saturating_sub(current);
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system.clone(),
                        Transfer {
                            from: payer.clone(),
                            to: vault.clone(),
                        },
                    ),
                    top_up,
                )?;
            }

            system_program::allocate(
                CpiContext::new_with_signer(
                    system.clone(),
                    Allocate {
                        account_to_allocate: vault.clone(),
                    },
                    signer_seeds,
                ),
                Self::LEN as u64,
            )?;

            system_program::assign(
                CpiContext::new_with_signer(
                    system.clone(),
                    Assign {
                        account_to_assign: vault.clone(),
                    },
                    signer_seeds,
                ),
                &crate::ID,
            )?;
        }

        let mut data = vault.try_borrow_mut_data()?;
        self.try_serialize(&mut &mut data[..])
    }

    /// Destroys the record at `vault`, moving its lamports to `destination`.
    ///
    /// Data is zeroed and ownership handed back to the system program, so the
    /// slot can be opened again by a later lock.
    pub fn retire<'info>(vault: &AccountInfo<'info>, destination: &AccountInfo<'info>) -> Result<()> {
        let reclaimed = vault.lamports();

        let credited = destination
            .lamports()
            .checked_add(reclaimed)
            .ok_or(CustodyError::MathOverflow)?;
        **destination.try_borrow_mut_lamports()? = credited;
        **vault.try_borrow_mut_lamports()? = 0;

        vault.assign(&system_program::ID);
        vault.resize(0)?;

        Ok(())
    }
}
