use anchor_lang::prelude::*;

#[error_code]
pub enum CustodyError {
    #[msg("Signer is not authorized for this asset or protocol")]
    Unauthorized,
    #[msg("Protocol config already exists for this admin")]
    AlreadyInitialized,
    #[msg("Asset is already locked in its vault")]
    AlreadyLocked,
    #[msg("Asset is not locked")]
    NotLocked,
    #[msg("Previous owner does not match the vault record")]
    Mismatch,
    #[msg("Payer cannot cover the required amount")]
    InsufficientFunds,
    #[msg("Collection does not match the asset's collection")]
    InvalidCollection,
    #[msg("Vault address does not match the derived address")]
    InvalidVaultAddress,
    #[msg("Derivation seed is empty, oversized or malformed")]
    InvalidSeed,
    #[msg("Treasury does not match the protocol config")]
    InvalidTreasury,
    #[msg("Math operation overflow")]
    MathOverflow,
    #[msg("Rent fee would leave the treasury below the rent-exempt minimum")]
    RentFeeTooLow,
}
