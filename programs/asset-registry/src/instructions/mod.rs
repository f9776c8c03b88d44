pub mod create_asset;
pub mod create_collection;
pub mod transfer_asset;

pub use create_asset::*;
pub use create_collection::*;
pub use transfer_asset::*;
