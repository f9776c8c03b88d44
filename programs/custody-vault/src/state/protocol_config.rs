use anchor_lang::prelude::*;

#[account]
pub struct ProtocolConfig {
    /// The admin whose key seeds this config's address
    pub admin: Pubkey,
    /// Account credited with the lock fee
    pub treasury: Pubkey,
    /// Lamports charged on every lock, fixed at initialization
    pub rent_fee: u64,
    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl ProtocolConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        32 + // treasury
        8 + // rent_fee
        1; // bump

    /// A freshly allocated config still carries the zeroed admin key.
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }
}
