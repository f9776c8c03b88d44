pub mod protocol_config;
pub mod vault_record;

pub use protocol_config::*;
pub use vault_record::*;
