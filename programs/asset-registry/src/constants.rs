/// Longest collection or asset name accepted, in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Longest metadata uri accepted, in bytes
pub const MAX_URI_LEN: usize = 200;
