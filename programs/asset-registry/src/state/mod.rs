pub mod asset;
pub mod collection;

pub use asset::*;
pub use collection::*;
