use anchor_lang::prelude::*;

use crate::{
    constants::PROTOCOL_SEED,
    error::CustodyError,
    events::ProtocolInitialized,
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    /// The admin creating the config; also pays for it
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Account to receive lock fees
    pub treasury: SystemAccount<'info>,

    /// Per-admin config holding the fee policy
    #[account(
        init_if_needed,
        payer = payer,
        space = ProtocolConfig::LEN,
        seeds = [PROTOCOL_SEED, payer.key().as_ref()],
        bump
    )]
    pub protocol: Account<'info, ProtocolConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeProtocol>, rent_fee: u64) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;

    require!(!protocol.is_initialized(), CustodyError::AlreadyInitialized);

    // A nonzero fee must be able to fund an empty treasury on the first lock
    if rent_fee > 0 {
        let funded = ctx
            .accounts
            .treasury
            .lamports()
            .checked_add(rent_fee)
            .ok_or(CustodyError::MathOverflow)?;
        require_gte!(
            funded,
            Rent::get()?.minimum_balance(0),
            CustodyError::RentFeeTooLow
        );
    }

    protocol.admin = ctx.accounts.payer.key();
    protocol.treasury = ctx.accounts.treasury.key();
    protocol.rent_fee = rent_fee;
    protocol.bump = ctx.bumps.protocol;

    emit!(ProtocolInitialized {
        protocol: protocol.key(),
        admin: protocol.admin,
        treasury: protocol.treasury,
        rent_fee,
    });

    msg!("Protocol initialized successfully!");
    msg!("Protocol Config: {}", protocol.key());
    msg!("Admin: {}", protocol.admin);
    msg!("Treasury: {}", protocol.treasury);
    msg!("Rent fee: {}", protocol.rent_fee);

    Ok(())
}
