pub mod create_asset;
pub mod create_collection;
pub mod initialize_protocol;
pub mod lock_asset;
pub mod swap_asset;

pub use create_asset::*;
pub use create_collection::*;
pub use initialize_protocol::*;
pub use lock_asset::*;
pub use swap_asset::*;
