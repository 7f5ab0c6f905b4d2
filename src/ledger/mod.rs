//! The ledger: state, store and snapshots

pub mod snapshot;
pub mod state;
pub mod store;

pub use snapshot::{ImportSummary, LedgerSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use state::LedgerState;
pub use store::LedgerStore;
