use anchor_lang::prelude::*;

#[error_code]
pub enum RegistryError {
    #[msg("Signer is not the current holder of the asset")]
    NotHolder,
    #[msg("Collection does not match the asset's collection")]
    CollectionMismatch,
    #[msg("Signer is not the collection's update authority")]
    NotUpdateAuthority,
    #[msg("Name exceeds the maximum length")]
    NameTooLong,
    #[msg("Uri exceeds the maximum length")]
    UriTooLong,
    #[msg("Math operation overflow")]
    MathOverflow,
}
