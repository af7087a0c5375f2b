//! Item system: equipment types, loadouts, and catalogs.

pub mod catalog;
pub mod equipment;
pub mod types;

pub use catalog::*;
pub use equipment::*;
pub use types::*;
