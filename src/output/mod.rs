//! Output directory management: locking and staged commits

pub mod lock;
pub mod transaction;

pub use lock::OutputGuard;
pub use transaction::{OutputTransaction, remove_leftovers};
