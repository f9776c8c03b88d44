use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Tag for protocol config addresses, seeded by the admin key
pub const PROTOCOL_SEED: &[u8] = b"protocol";

/// Tag for vault record addresses, seeded by the asset key
pub const VAULT_SEED: &[u8] = b"vault";

/// Fixed price in lamports an acquirer pays to swap an asset out of its vault
pub const SWAP_PRICE: u64 = LAMPORTS_PER_SOL;
